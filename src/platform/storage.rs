//! Key/value persistence
//!
//! LocalStorage on web. Native builds keep a per-thread map so the demo and
//! tests see the same load/save behaviour without touching disk.

use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("no window object")]
    NoWindow,
    #[error("localStorage unavailable")]
    Unavailable,
    #[error("failed to write key {0}")]
    Write(String),
    #[error("bad stored value: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    let window = web_sys::window().ok_or(StorageError::NoWindow)?;
    window
        .local_storage()
        .ok()
        .flatten()
        .ok_or(StorageError::Unavailable)
}

/// Read a raw string value
#[cfg(target_arch = "wasm32")]
pub fn get(key: &str) -> Result<Option<String>, StorageError> {
    local_storage()?
        .get_item(key)
        .map_err(|_| StorageError::Unavailable)
}

/// Write a raw string value
#[cfg(target_arch = "wasm32")]
pub fn set(key: &str, value: &str) -> Result<(), StorageError> {
    local_storage()?
        .set_item(key, value)
        .map_err(|_| StorageError::Write(key.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
thread_local! {
    static MEMORY: std::cell::RefCell<std::collections::HashMap<String, String>> =
        std::cell::RefCell::new(std::collections::HashMap::new());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn get(key: &str) -> Result<Option<String>, StorageError> {
    Ok(MEMORY.with(|m| m.borrow().get(key).cloned()))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set(key: &str, value: &str) -> Result<(), StorageError> {
    MEMORY.with(|m| {
        m.borrow_mut().insert(key.to_string(), value.to_string());
    });
    Ok(())
}

/// Read and deserialize a JSON value
pub fn load_json<T: DeserializeOwned>(key: &str) -> Result<Option<T>, StorageError> {
    match get(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Serialize and write a JSON value
pub fn save_json<T: Serialize>(key: &str, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        assert_eq!(get("storage_test_missing").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        set("storage_test_key", "17").unwrap();
        assert_eq!(get("storage_test_key").unwrap().as_deref(), Some("17"));
    }

    #[test]
    fn test_corrupt_json_is_an_error() {
        set("storage_test_json", "{not json").unwrap();
        let result = load_json::<Vec<u32>>("storage_test_json");
        assert!(matches!(result, Err(StorageError::Json(_))));
    }

    #[test]
    fn test_json_values() {
        save_json("storage_test_vec", &vec![1u32, 2, 3]).unwrap();
        let loaded: Option<Vec<u32>> = load_json("storage_test_vec").unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }
}
