use thiserror::Error;

/// Errors that can occur in item store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A required field is missing or empty.
    #[error("kv: invalid argument: {0}")]
    InvalidArgument(String),

    /// The referenced id has no record.
    #[error("kv: not found: {0}")]
    NotFound(String),

    /// A caller-supplied id is already taken.
    #[error("kv: already exists: {0}")]
    AlreadyExists(String),

    /// The name index and the record map disagree.
    #[error("kv: internal consistency fault: {0}")]
    InternalConsistency(String),

    /// The backend could not be queried.
    #[error("kv: backend error: {0}")]
    Backend(String),
}

/// Result type for item store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
