use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("local storage is not available")]
    StorageUnavailable,
    #[error("local storage access failed: {0}")]
    Storage(String),
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode snapshot: {0}")]
    Decode(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WorkspaceError>;
