//! Lookup primitives and the narrowing rules for typed reads.

use serde_json::{Map, Value};

/// A parsed configuration: the root JSON object.
pub type Document = Map<String, Value>;

/// Raw value for `key` in `mapping`.
pub fn lookup<'a>(mapping: &'a Document, key: &str) -> Option<&'a Value> {
    mapping.get(key)
}

/// The group named `name`, if it exists and is an object.
pub fn group<'a>(document: &'a Document, name: &str) -> Option<&'a Document> {
    match document.get(name)? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Exact narrowing from a JSON value to a Rust type.
///
/// `None` means the value cannot be read as `Self`, which callers treat the
/// same as a missing key.
pub trait FromValue: Sized {
    /// Type name used in diagnostics.
    const KIND: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for bool {
    const KIND: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for String {
    const KIND: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

/// Fractional numbers truncate toward zero; out-of-range numbers saturate.
impl FromValue for i64 {
    const KIND: &'static str = "int";

    fn from_value(value: &Value) -> Option<Self> {
        let Value::Number(n) = value else {
            return None;
        };
        n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64))
    }
}

impl FromValue for f64 {
    const KIND: &'static str = "float";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

/// Any present value, `null`, objects and arrays included.
impl FromValue for Value {
    const KIND: &'static str = "value";

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

/// Typed read of `key` at the root of `document`.
pub fn read<T: FromValue>(document: &Document, key: &str) -> Option<T> {
    lookup(document, key).and_then(T::from_value)
}

/// Typed read of `key` inside `group_name`.
pub fn read_group<T: FromValue>(document: &Document, group_name: &str, key: &str) -> Option<T> {
    group(document, group_name).and_then(|g| read(g, key))
}
