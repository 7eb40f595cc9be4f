use nanofi::error::StorageError;
use nanofi::kv::KeyValueStore;

/// `window.localStorage`, looked up on every call so the handle never has to be
/// kept in reactive state.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct LocalStorage;

fn local_storage() -> Result<web_sys::Storage, StorageError> {
    let w = web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
    w.local_storage()
        .map_err(|_| StorageError::Unavailable("local_storage() threw".to_string()))?
        .ok_or_else(|| StorageError::Unavailable("localStorage unavailable".to_string()))
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?
            .get_item(key)
            .map_err(|_| StorageError::Backend("get_item() threw".to_string()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|_| StorageError::Backend("set_item() threw (quota exceeded?)".to_string()))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        local_storage()?
            .remove_item(key)
            .map_err(|_| StorageError::Backend("remove_item() threw".to_string()))
    }
}
