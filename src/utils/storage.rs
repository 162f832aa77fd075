// ============================================================================
// STORAGE - Almacenamiento clave/valor (localStorage en el navegador)
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use serde::{Serialize, de::DeserializeOwned};

pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove_item(&self, key: &str) -> Result<(), String>;
}

pub fn save_to_storage<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), String> {
    let json = serde_json::to_string(value)
        .map_err(|e| format!("Error serializando datos: {}", e))?;
    store.set_item(key, &json)
}

pub fn load_from_storage<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let json = store.get_item(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("⚠️ [STORAGE] Valor corrupto en '{}', se ignora: {}", key, e);
            None
        }
    }
}

/// Almacén en memoria (fuera del navegador y en tests)
#[derive(Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), String> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::KeyValueStore;
    use web_sys::{window, Storage};

    /// `window.localStorage`
    pub struct LocalStorage;

    fn get_local_storage() -> Option<Storage> {
        window()?.local_storage().ok()?
    }

    impl KeyValueStore for LocalStorage {
        fn get_item(&self, key: &str) -> Option<String> {
            get_local_storage()?.get_item(key).ok()?
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
            let storage = get_local_storage().ok_or("No se pudo acceder a localStorage")?;
            storage.set_item(key, value)
                .map_err(|_| "Error guardando en localStorage".to_string())
        }

        fn remove_item(&self, key: &str) -> Result<(), String> {
            let storage = get_local_storage().ok_or("No se pudo acceder a localStorage")?;
            storage.remove_item(key)
                .map_err(|_| "Error eliminando de localStorage".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_value_is_ignored() {
        let store = MemoryStore::new();
        store.set_item("k", "{not json").unwrap();
        assert_eq!(load_from_storage::<Vec<u32>>(&store, "k"), None);

        save_to_storage(&store, "k", &vec![1u32, 2]).unwrap();
        assert_eq!(load_from_storage::<Vec<u32>>(&store, "k"), Some(vec![1, 2]));
    }
}
