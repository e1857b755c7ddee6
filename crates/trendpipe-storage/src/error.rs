use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested object does not exist.
    #[error("object not found: {0}")]
    NotFound(String),

    /// Any other failure from the storage backend.
    #[error("storage error: {0}")]
    Backend(String),
}
