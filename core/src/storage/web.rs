//! Browser `window.localStorage`, for front ends compiled to WASM.

use wasm_bindgen::JsValue;
use web_sys::Storage;

use super::KeyValueStorage;
use crate::error::StorageError;

pub struct WebStorage {
    inner: Storage,
}

impl WebStorage {
    /// Handle on the current window's local storage.
    /// Fails when there is no window or storage is disabled.
    pub fn local() -> Result<Self, StorageError> {
        let window = web_sys::window().ok_or_else(|| StorageError::Unavailable {
            reason: "no global window".to_string(),
        })?;
        let inner = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable {
                reason: describe(&e),
            })?
            .ok_or_else(|| StorageError::Unavailable {
                reason: "localStorage is disabled".to_string(),
            })?;
        Ok(Self { inner })
    }
}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

impl KeyValueStorage for WebStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner
            .get_item(key)
            .map_err(|e| StorageError::Unavailable {
                reason: describe(&e),
            })
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // Quota exhaustion surfaces here as a DOMException
        self.inner
            .set_item(key, value)
            .map_err(|e| StorageError::Rejected {
                key: key.to_string(),
                reason: describe(&e),
            })
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner
            .remove_item(key)
            .map_err(|e| StorageError::Rejected {
                key: key.to_string(),
                reason: describe(&e),
            })
    }
}
