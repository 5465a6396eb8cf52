//! Process-wide default store.
//!
//! Loaded on first use with [`Loader::from_env`]. A missing or malformed file
//! is tolerated: the store starts empty and every plain accessor reports
//! not-found until a reload succeeds.

use std::sync::LazyLock;

use crate::config::loader::Loader;
use crate::config::store::ConfigStore;

static GLOBAL: LazyLock<ConfigStore> =
    LazyLock::new(|| ConfigStore::load_or_empty(Loader::from_env()));

#[inline]
pub fn global() -> &'static ConfigStore {
    &GLOBAL
}
