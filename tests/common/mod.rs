//! Shared test utilities.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use jsonconf::config::{ConfigStore, Loader};
use tempfile::TempDir;

/// A config covering every value kind the accessors read.
pub const SAMPLE_CONFIG: &str = r#"{
    "host": "google.com",
    "port": 8080,
    "ratio": 3.7,
    "debug": true,
    "nothing": null,
    "tags": ["a", "b"],
    "links": {
        "google": "https://google.com",
        "retries": 3,
        "weight": 0.5,
        "enabled": false
    },
    "flat": "notAMap"
}"#;

pub fn write_config(dir: &Path, file_name: &str, contents: &str) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Loader for `config.json` that only searches `dir`.
pub fn loader_in(dir: &TempDir) -> Loader {
    Loader::new("config.json").with_search_dirs([dir.path()])
}

/// Temp dir holding `config.json` with `contents`, and a store loaded from it.
pub fn store_on_disk(contents: &str) -> (TempDir, ConfigStore) {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "config.json", contents);
    let store = ConfigStore::load(loader_in(&dir)).unwrap();
    (dir, store)
}

pub fn sample_store() -> ConfigStore {
    ConfigStore::from_bytes(SAMPLE_CONFIG.as_bytes()).unwrap()
}
