//! Storage abstractions for the service layer
//!
//! The store is persisted as one opaque blob under a fixed key, the way a
//! browser's local storage works. Backends implement [`BlobStorage`]; the
//! data store never depends on a concrete backend.

pub mod json_file_storage;
pub mod in_memory;

pub use in_memory::InMemoryStorage;
pub use json_file_storage::JsonFileStorage;

use crate::errors::ServiceError;

/// Key/value blob persistence port.
///
/// Implementations must make `set_item` all-or-nothing: a reader never
/// observes a partially written value.
pub trait BlobStorage: Send + Sync {
    /// Read the value stored under `key`. Returns `Ok(None)` when absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, ServiceError>;

    /// Overwrite the value stored under `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<(), ServiceError>;
}

impl<T: BlobStorage + ?Sized> BlobStorage for std::sync::Arc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, ServiceError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), ServiceError> {
        (**self).set_item(key, value)
    }
}
