//! Key-value store wrapper with automatic JSON serialization.
//!
//! On `wasm32` the backing medium is Spin's Key-Value Store. Native
//! builds get an in-process map with the same open-by-name semantics
//! (two handles opened with the same name share state), so the adapter
//! behaves identically under test.

use serde::{de::DeserializeOwned, Serialize};

use crate::StorageError;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex, OnceLock, PoisonError};

    pub type Shared = Arc<Mutex<HashMap<String, Vec<u8>>>>;

    fn registry() -> &'static Mutex<HashMap<String, Shared>> {
        static REGISTRY: OnceLock<Mutex<HashMap<String, Shared>>> = OnceLock::new();
        REGISTRY.get_or_init(|| Mutex::new(HashMap::new()))
    }

    /// Fetch or create the shared map for a named store.
    pub fn open(name: &str) -> Shared {
        let mut stores = registry()
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(stores.entry(name.to_string()).or_default())
    }

    pub fn lock(store: &Shared) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Type-safe key-value store.
///
/// Values are serialized to JSON on write and deserialized on read for
/// any type implementing `Serialize` / `DeserializeOwned`.
pub struct KvStore {
    #[cfg(target_arch = "wasm32")]
    store: spin_sdk::key_value::Store,
    #[cfg(not(target_arch = "wasm32"))]
    store: native::Shared,
}

impl KvStore {
    /// Open the default store.
    #[cfg(target_arch = "wasm32")]
    pub fn open_default() -> Result<Self, StorageError> {
        let store = spin_sdk::key_value::Store::open_default()
            .map_err(|e| StorageError::Open(e.to_string()))?;
        Ok(Self { store })
    }

    /// Open a named store.
    #[cfg(target_arch = "wasm32")]
    pub fn open(name: &str) -> Result<Self, StorageError> {
        let store = spin_sdk::key_value::Store::open(name)
            .map_err(|e| StorageError::Open(e.to_string()))?;
        Ok(Self { store })
    }

    /// Get a value. Returns `Ok(None)` when the key does not exist.
    #[cfg(target_arch = "wasm32")]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.store.get(key) {
            Ok(Some(bytes)) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(StorageError::Backend(e.to_string())),
        }
    }

    /// Set a value.
    #[cfg(target_arch = "wasm32")]
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(value)?;
        self.store
            .set(key, &bytes)
            .map_err(|e| StorageError::Backend(e.to_string()))
    }

    /// Delete a value. Deleting a missing key is not an error.
    #[cfg(target_arch = "wasm32")]
    pub fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.store
            .delete(key)
            .map_err(|e| StorageError::Backend(e.to_string()))
    }

    /// Check if a key exists.
    #[cfg(target_arch = "wasm32")]
    pub fn exists(&self, key: &str) -> Result<bool, StorageError> {
        self.store
            .exists(key)
            .map_err(|e| StorageError::Backend(e.to_string()))
    }

    // Native backend: in-process map shared per store name.

    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self {
            store: native::open("default"),
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn open(name: &str) -> Result<Self, StorageError> {
        Ok(Self {
            store: native::open(name),
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match native::lock(&self.store).get(key) {
            Some(bytes) => {
                let value: T = serde_json::from_slice(bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(value)?;
        native::lock(&self.store).insert(key.to_string(), bytes);
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn delete(&self, key: &str) -> Result<(), StorageError> {
        native::lock(&self.store).remove(key);
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(native::lock(&self.store).contains_key(key))
    }
}
