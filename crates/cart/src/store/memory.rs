//! In-memory store for tests and throwaway sessions.

use std::collections::HashMap;
use std::sync::Mutex;

use super::LocalStore;
use crate::error::StoreError;

/// A [`LocalStore`] that lives only as long as the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let items = self.items.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self.items.lock().map_err(|_| StoreError::Poisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let mut items = self.items.lock().map_err(|_| StoreError::Poisoned)?;
        items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("cart").unwrap(), None);

        store.set_item("cart", "[]").unwrap();
        assert_eq!(store.get_item("cart").unwrap().as_deref(), Some("[]"));

        store.remove_item("cart").unwrap();
        store.remove_item("cart").unwrap();
        assert_eq!(store.get_item("cart").unwrap(), None);
    }
}
