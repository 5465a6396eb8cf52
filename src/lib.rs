//! In-memory JSON configuration store.
//!
//! A [`ConfigStore`] loads a JSON object from disk once and answers typed
//! lookups at the root and one group level below it. Values can be
//! overwritten in memory; nothing is ever written back to the file.

pub mod config;
pub mod logging;

pub use config::{ConfigError, ConfigStore, Document, Loader};
