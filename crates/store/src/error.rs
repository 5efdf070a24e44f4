use thiserror::Error;

/// Errors that can occur when interacting with the resource store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced document does not exist.
    #[error("Document not found: {kind} {id}")]
    NotFound { kind: &'static str, id: String },

    /// The storage backend failed.
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
