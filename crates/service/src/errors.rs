use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}
