//! `localStorage` adapter.
//!
//! TRADE-OFFS
//! ==========
//! The store is looked up on every call instead of cached, so private-mode
//! and policy failures surface per operation as `StorageError` values the
//! controller can log and absorb.

use seaton_web::error::StorageError;
use seaton_web::platform::KeyValueStore;

use super::js_error_message;

/// `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(|_| StorageError::Unavailable)?
            .ok_or(StorageError::Unavailable)
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::ReadFailed(js_error_message(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::WriteFailed(js_error_message(&e)))
    }
}
