//! LocalStorage backend (WASM only)

use wasm_bindgen::JsValue;
use web_sys::Storage;

use super::{KeyValueStore, StorageError};

/// `window.localStorage`
pub struct BrowserStorage {
    storage: Storage,
}

impl BrowserStorage {
    /// Fails when there is no window or storage is blocked (private mode, sandboxed iframe)
    pub fn open() -> Result<Self, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(js_error)
    }
}

fn js_error(err: JsValue) -> StorageError {
    StorageError::Access(format!("{:?}", err))
}
