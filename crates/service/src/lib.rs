//! Service layer owning the catalogue dataset.
//! - `store::DataStore` mediates every read and write against the in-memory `Store`.
//! - `storage` is the persistence port the store writes its JSON blob through.
//! - `assist` wraps the external generative-text API used for draft revision.

pub mod errors;
pub mod ids;
pub mod seed;
pub mod storage;
pub mod store;
pub mod assist;
pub mod runtime;

pub use errors::ServiceError;
pub use store::{CommentThread, DataStore, FeedKind, STORAGE_KEY};
