//! Error types for document store operations

/// Error type for loading and addressing documents in a store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Snapshot could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot is not valid JSON or has the wrong shape
    #[error("Snapshot parse error: {0}")]
    Parse(String),

    /// No document exists at the given path
    #[error("Document not found: {0}")]
    NotFound(String),

    /// A document failed basic structural checks
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Parse(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
