use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures raised by a backing-store provider. These are opaque to the
/// accessor layer, which propagates them unchanged and never retries.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(#[from] Box<dyn std::error::Error + Send + Sync>),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Unknown error occurred: {0}")]
    Unknown(String),
}
