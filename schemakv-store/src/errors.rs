use thiserror::Error;

use crate::validator::ValidationErrors;
use schemakv_core::StoreError;

pub type Result<T> = std::result::Result<T, KeyStoreError>;

#[derive(Error, Debug)]
pub enum KeyStoreError {
    /// The key is not present in the schema registry. Raised before any
    /// backing-store interaction; a config/programming error, never retried.
    #[error("Unknown key: {0}")]
    UnknownKey(String),

    /// A written value or decoded stored value failed its key's schema.
    #[error("Validation failed for key '{key}': {errors}")]
    Validation {
        key: String,
        errors: ValidationErrors,
    },

    /// Stored text could not be decoded as JSON. Only surfaced from
    /// single-key reads; bulk reads downgrade this to a null result.
    #[error("Corrupt stored data for key '{key}': {source}")]
    CorruptData {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid store configuration: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage backend error: {0}")]
    Store(#[from] StoreError),
}
