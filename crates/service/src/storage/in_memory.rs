use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::BlobStorage;
use crate::errors::ServiceError;

/// In-memory blob storage for tests and embedding.
///
/// Clones share the same map, so a test can keep a handle and reopen a
/// `DataStore` against what a previous instance wrote.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one item.
    pub fn with_item(key: &str, value: &str) -> Result<Self, ServiceError> {
        let storage = Self::new();
        storage.set_item(key, value)?;
        Ok(storage)
    }
}

impl BlobStorage for InMemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, ServiceError> {
        let items = self.items.read().map_err(|_| ServiceError::Persistence("lock poisoned".into()))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), ServiceError> {
        let mut items = self.items.write().map_err(|_| ServiceError::Persistence("lock poisoned".into()))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
