use std::sync::Arc;

use service::assist::TextAssist;
use service::storage::BlobStorage;
use service::DataStore;
use tokio::sync::Mutex;

pub type SharedStore = Arc<Mutex<DataStore<Arc<dyn BlobStorage>>>>;

/// Shared handler state. The store is single-writer; every request takes the lock.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub assist: Arc<dyn TextAssist>,
}

impl AppState {
    pub fn new(store: DataStore<Arc<dyn BlobStorage>>, assist: Arc<dyn TextAssist>) -> Self {
        Self { store: Arc::new(Mutex::new(store)), assist }
    }
}
