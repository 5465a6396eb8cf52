//! Thread-safe configuration storage.
//!
//! The current document is an `Arc<Document>` behind a lock. Readers hold the
//! read lock only while looking up and cloning a single value. Reload and
//! `set_config` swap the `Arc`; the `set_*` family writes through
//! `Arc::make_mut`, so snapshots already handed out never change.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::access::{self, Document, FromValue};
use crate::config::loader::{read_from, ConfigError, Loaded, Loader};
use crate::config::required::Required;

#[derive(Debug, Default)]
struct State {
    document: Arc<Document>,
    source: Option<PathBuf>,
}

/// Thread-safe config container with interior mutability.
///
/// Cloning is cheap and yields a handle to the same document.
#[derive(Clone)]
pub struct ConfigStore {
    inner: Arc<RwLock<State>>,
    loader: Loader,
}

impl ConfigStore {
    /// Empty store that reloads through `loader`.
    pub fn new(loader: Loader) -> Self {
        Self {
            inner: Arc::new(RwLock::new(State::default())),
            loader,
        }
    }

    /// Store seeded with `document` and the default loader.
    pub fn from_document(document: Document) -> Self {
        let store = Self::new(Loader::default());
        store.set_config(document);
        store
    }

    /// Store seeded from an in-memory JSON buffer.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        Ok(Self::from_document(read_from(bytes)?))
    }

    /// Load through `loader`, failing if the file is missing or malformed.
    pub fn load(loader: Loader) -> Result<Self, ConfigError> {
        let store = Self::new(loader);
        store.install()?;
        Ok(store)
    }

    /// Load through `loader`, starting empty if that fails.
    ///
    /// Every plain accessor reports not-found until a later `reload` succeeds.
    pub fn load_or_empty(loader: Loader) -> Self {
        let store = Self::new(loader);
        if let Err(e) = store.install() {
            tracing::warn!("Starting with empty configuration: {}", e);
        }
        store
    }

    /// Re-read the file, replacing the document and discarding in-memory
    /// changes.
    ///
    /// On failure the previous document stays in place and the error is
    /// returned.
    pub fn reload(&self) -> Result<(), ConfigError> {
        self.install().inspect_err(|e| {
            tracing::warn!("Config reload failed, keeping current configuration: {}", e);
        })
    }

    fn install(&self) -> Result<(), ConfigError> {
        let Loaded { path, document } = self.loader.load()?;
        tracing::info!(
            path = %path.display(),
            keys = document.len(),
            "Configuration loaded"
        );
        let mut state = self.inner.write();
        state.document = Arc::new(document);
        state.source = Some(path);
        Ok(())
    }

    /// Replace the whole document.
    pub fn set_config(&self, document: Document) {
        let mut state = self.inner.write();
        state.document = Arc::new(document);
        state.source = None;
    }

    /// The current document. Later writes do not affect the returned value.
    pub fn snapshot(&self) -> Arc<Document> {
        Arc::clone(&self.inner.read().document)
    }

    /// File the current document was loaded from, if it came from disk.
    pub fn source_path(&self) -> Option<PathBuf> {
        self.inner.read().source.clone()
    }

    /// Fatal variants of the accessors.
    pub fn required(&self) -> Required<'_> {
        Required::new(self)
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Typed read of a root key. `None` when absent or of another type.
    pub fn get<T: FromValue>(&self, key: &str) -> Option<T> {
        access::read(&self.inner.read().document, key)
    }

    /// Typed read of `key` inside `group`. `None` when the group is absent or
    /// not an object, or the key is absent or of another type.
    pub fn group_get<T: FromValue>(&self, group: &str, key: &str) -> Option<T> {
        access::read_group(&self.inner.read().document, group, key)
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key)
    }

    pub fn string(&self, key: &str) -> Option<String> {
        self.get(key)
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        self.get(key)
    }

    pub fn float(&self, key: &str) -> Option<f64> {
        self.get(key)
    }

    pub fn value(&self, key: &str) -> Option<Value> {
        self.get(key)
    }

    pub fn group_bool(&self, group: &str, key: &str) -> Option<bool> {
        self.group_get(group, key)
    }

    pub fn group_string(&self, group: &str, key: &str) -> Option<String> {
        self.group_get(group, key)
    }

    pub fn group_int(&self, group: &str, key: &str) -> Option<i64> {
        self.group_get(group, key)
    }

    pub fn group_float(&self, group: &str, key: &str) -> Option<f64> {
        self.group_get(group, key)
    }

    pub fn group_value(&self, group: &str, key: &str) -> Option<Value> {
        self.group_get(group, key)
    }

    /// Deserialize a root value into `T`, e.g. a whole group into a struct.
    pub fn decode<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.value(key)?;
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::debug!(key, "Config value does not decode: {}", e);
                None
            }
        }
    }

    /// Root keys, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        self.inner.read().document.keys().cloned().collect()
    }

    /// Keys of `group`; empty when the group is absent or not an object.
    pub fn group_keys(&self, group: &str) -> Vec<String> {
        let state = self.inner.read();
        access::group(&state.document, group)
            .map(|g| g.keys().cloned().collect())
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Overwrite a root key that is already readable as `T`.
    ///
    /// Never inserts a key or changes its type: a value with no JSON form of
    /// the same type (a non-finite float) is refused. Returns whether the
    /// value was written.
    pub fn set<T>(&self, key: &str, value: T) -> bool
    where
        T: FromValue + Into<Value>,
    {
        let Some(value) = representable::<T>(value) else {
            tracing::debug!(key, kind = T::KIND, "Ignoring set with unrepresentable value");
            return false;
        };
        let mut state = self.inner.write();
        if access::read::<T>(&state.document, key).is_none() {
            tracing::debug!(key, kind = T::KIND, "Ignoring set of missing config key");
            return false;
        }
        Arc::make_mut(&mut state.document).insert(key.to_string(), value);
        true
    }

    /// Overwrite `key` inside `group` when it is already readable as `T`.
    ///
    /// Never inserts a key, creates a group or changes a key's type. Returns
    /// whether the value was written.
    pub fn set_group<T>(&self, group: &str, key: &str, value: T) -> bool
    where
        T: FromValue + Into<Value>,
    {
        let Some(value) = representable::<T>(value) else {
            tracing::debug!(group, key, kind = T::KIND, "Ignoring set with unrepresentable value");
            return false;
        };
        let mut state = self.inner.write();
        if access::read_group::<T>(&state.document, group, key).is_none() {
            tracing::debug!(group, key, kind = T::KIND, "Ignoring set of missing config key");
            return false;
        }
        match Arc::make_mut(&mut state.document).get_mut(group) {
            Some(Value::Object(map)) => {
                map.insert(key.to_string(), value);
                true
            }
            _ => false,
        }
    }

    pub fn set_bool(&self, key: &str, value: bool) -> bool {
        self.set(key, value)
    }

    pub fn set_string(&self, key: &str, value: impl Into<String>) -> bool {
        self.set(key, value.into())
    }

    pub fn set_int(&self, key: &str, value: i64) -> bool {
        self.set(key, value)
    }

    /// NaN and infinities are refused; JSON has no number for them.
    pub fn set_float(&self, key: &str, value: f64) -> bool {
        self.set(key, value)
    }

    pub fn set_group_bool(&self, group: &str, key: &str, value: bool) -> bool {
        self.set_group(group, key, value)
    }

    pub fn set_group_string(&self, group: &str, key: &str, value: impl Into<String>) -> bool {
        self.set_group(group, key, value.into())
    }

    pub fn set_group_int(&self, group: &str, key: &str, value: i64) -> bool {
        self.set_group(group, key, value)
    }

    pub fn set_group_float(&self, group: &str, key: &str, value: f64) -> bool {
        self.set_group(group, key, value)
    }
}

/// `value` as JSON, if it still reads back as `T`.
fn representable<T>(value: T) -> Option<Value>
where
    T: FromValue + Into<Value>,
{
    let value = value.into();
    T::from_value(&value).map(|_| value)
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.read();
        f.debug_struct("ConfigStore")
            .field("keys", &state.document.len())
            .field("source", &state.source)
            .field("loader", &self.loader)
            .finish()
    }
}
