//! Key-value storage slots for the location list.
//!
//! Backends mirror the browser `localStorage` API: string keys, string
//! values, whole-value overwrites. The board only ever touches one key.

mod file;
mod memory;
#[cfg(target_arch = "wasm32")]
mod web;

pub use file::FileStorage;
pub use memory::MemoryStorage;
#[cfg(target_arch = "wasm32")]
pub use web::WebStorage;

use std::path::PathBuf;

use crate::error::StorageError;

/// A synchronous string key-value store
pub trait KeyValueStorage {
    /// Value under `key`, or `None` if nothing was ever stored there
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value under `key`
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &mut S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// Default directory for the file-backed store.
/// `~/.local/share/queuezero` on Linux, platform equivalent elsewhere.
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("queuezero")
}
