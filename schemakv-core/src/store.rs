use async_trait::async_trait;
use std::collections::HashMap;

use super::errors::Result;

/// Backend-agnostic contract for the remote key-value service.
///
/// Values cross this boundary as raw text; interpreting the text is the
/// caller's concern. Absence is the backend's native "no value", never an
/// encoded null literal.
#[async_trait]
pub trait BackingStore: Send + Sync + 'static {
    /// Read the raw text stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Read a batch of keys in a single request. Every requested key appears
    /// in the returned map; keys with no stored value map to `None`.
    async fn get_many(&self, keys: &[String]) -> Result<HashMap<String, Option<String>>>;

    /// Store `text` under `key`, overwriting any existing value.
    async fn put(&self, key: &str, text: String) -> Result<()>;

    /// Remove `key` from the store. Removing an absent key is a no-op.
    async fn delete(&self, key: &str) -> Result<()>;
}
