//! Accessors for configuration the program cannot start without.
//!
//! Every method has the same lookup rules as its [`ConfigStore`] counterpart,
//! but a miss terminates the process with exit status [`EXIT_MISSING_KEY`]
//! after writing the key (and group) to stderr. There is no way to recover
//! from it: use the plain accessors for anything optional.

use serde_json::Value;

use crate::config::access::FromValue;
use crate::config::store::ConfigStore;

/// Exit status used when a required key is missing.
pub const EXIT_MISSING_KEY: i32 = 1;

/// Fatal view over a [`ConfigStore`], from [`ConfigStore::required`].
#[derive(Clone, Copy)]
pub struct Required<'a> {
    store: &'a ConfigStore,
}

impl<'a> Required<'a> {
    pub(crate) fn new(store: &'a ConfigStore) -> Self {
        Self { store }
    }

    pub fn get<T: FromValue>(&self, key: &str) -> T {
        match self.store.get(key) {
            Some(value) => value,
            None => missing(T::KIND, None, key),
        }
    }

    pub fn group_get<T: FromValue>(&self, group: &str, key: &str) -> T {
        match self.store.group_get(group, key) {
            Some(value) => value,
            None => missing(T::KIND, Some(group), key),
        }
    }

    pub fn bool(&self, key: &str) -> bool {
        self.get(key)
    }

    pub fn string(&self, key: &str) -> String {
        self.get(key)
    }

    pub fn int(&self, key: &str) -> i64 {
        self.get(key)
    }

    pub fn float(&self, key: &str) -> f64 {
        self.get(key)
    }

    pub fn value(&self, key: &str) -> Value {
        self.get(key)
    }

    pub fn group_bool(&self, group: &str, key: &str) -> bool {
        self.group_get(group, key)
    }

    pub fn group_string(&self, group: &str, key: &str) -> String {
        self.group_get(group, key)
    }

    pub fn group_int(&self, group: &str, key: &str) -> i64 {
        self.group_get(group, key)
    }

    pub fn group_float(&self, group: &str, key: &str) -> f64 {
        self.group_get(group, key)
    }

    pub fn group_value(&self, group: &str, key: &str) -> Value {
        self.group_get(group, key)
    }
}

/// Report a missing required key and exit. Does not unwind.
fn missing(kind: &'static str, group: Option<&str>, key: &str) -> ! {
    tracing::error!(key, group, kind, "Required config key missing");
    match group {
        Some(group) => eprintln!(
            "Error: failed to retrieve '{key}' {kind} from group '{group}' in config"
        ),
        None => eprintln!("Error: failed to retrieve '{key}' {kind} from config"),
    }
    std::process::exit(EXIT_MISSING_KEY);
}
