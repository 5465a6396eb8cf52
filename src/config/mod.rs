//! Configuration store.
//!
//! ```text
//! config.json / config.<ENVIRONMENT>.json
//!     → loader.rs (search exe dir, then cwd; parse into Document)
//!     → store.rs (Arc<Document> behind a lock, typed reads, Set*)
//!     → required.rs (same reads, exit the process on a miss)
//! ```

pub mod access;
pub mod global;
pub mod loader;
pub mod required;
pub mod store;

pub use access::{group, lookup, Document, FromValue};
pub use global::global;
pub use loader::{config_file_name, read_from, ConfigError, Loaded, Loader};
pub use required::Required;
pub use store::ConfigStore;
