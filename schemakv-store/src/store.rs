use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{KeyStoreError, Result};
use crate::registry::{SchemaDefinition, SchemaRegistry};
use crate::validator::Validator;
use schemakv_core::{BackingStore, StorageBackend};

/// Maximum number of keys fetched from the backing store in one batched
/// request. Bulk reads window their key set at this size and issue the
/// batches sequentially; the chunking is invisible in the returned mapping.
pub const MAX_BATCH_KEYS: usize = 100;

/// Schema-validated accessor over a remote key-value store.
///
/// Every operation resolves the key against the immutable [`SchemaRegistry`]
/// before touching the backing store: writes are normalized by the key's
/// validator and serialized to JSON text, reads are decoded and coerced back
/// through the same validator. Malformed data is rejected on the way in and
/// surfaced (never silently trusted) on the way out.
///
/// The store holds no mutable state of its own, so clones are cheap and
/// concurrent use needs no locking; consistency across concurrent calls is
/// whatever the backing store provides.
#[derive(Debug, Clone)]
pub struct ValidatedKeyStore<S = StorageBackend> {
    store: S,
    registry: Arc<SchemaRegistry>,
}

impl<S: BackingStore> ValidatedKeyStore<S> {
    /// Wrap `store` with per-key schema enforcement. An empty registry is
    /// accepted and yields a store on which every operation fails with
    /// [`KeyStoreError::UnknownKey`].
    pub fn new(store: S, registry: SchemaRegistry) -> Self {
        Self {
            store,
            registry: Arc::new(registry),
        }
    }

    /// Compile `definitions` into a registry and wrap `store` with it.
    /// Fails with [`KeyStoreError::Configuration`] on a malformed schema.
    pub fn with_definitions(
        store: S,
        definitions: HashMap<String, SchemaDefinition>,
    ) -> Result<Self> {
        let registry = SchemaRegistry::from_definitions(definitions)?;
        Ok(Self::new(store, registry))
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    fn validator_for(&self, key: &str) -> Result<&dyn Validator> {
        self.registry
            .validator(key)
            .ok_or_else(|| KeyStoreError::UnknownKey(key.to_string()))
    }

    /// Validate `value` against `key`'s schema and write its normalized form
    /// to the backing store, overwriting any existing value. Nothing reaches
    /// the store unless validation passes.
    pub async fn set(&self, key: &str, value: Value) -> Result<()> {
        let validator = self.validator_for(key)?;
        let normalized = validator
            .normalize(value)
            .map_err(|errors| KeyStoreError::Validation {
                key: key.to_string(),
                errors,
            })?;
        let text = serde_json::to_string(&normalized)?;
        self.store.put(key, text).await?;
        debug!(key = %key, "stored validated value");
        Ok(())
    }

    /// Read and coerce the value stored under `key`. An absent value is
    /// coerced as the null sentinel, so the key's validator decides whether
    /// absence is acceptable. Stored text that fails to decode raises
    /// [`KeyStoreError::CorruptData`]; it is a genuine stored-data problem
    /// and is never coerced to null here.
    pub async fn get(&self, key: &str) -> Result<Value> {
        let validator = self.validator_for(key)?;
        let raw = self.store.get(key).await?;
        let decoded = match raw {
            Some(text) => {
                serde_json::from_str(&text).map_err(|source| KeyStoreError::CorruptData {
                    key: key.to_string(),
                    source,
                })?
            }
            None => Value::Null,
        };
        validator
            .coerce(decoded)
            .map_err(|errors| KeyStoreError::Validation {
                key: key.to_string(),
                errors,
            })
    }

    /// Remove `key` from the backing store. Deleting a key with no stored
    /// value is a no-op success; only registry membership is checked.
    pub async fn delete(&self, key: &str) -> Result<()> {
        if !self.registry.contains(key) {
            return Err(KeyStoreError::UnknownKey(key.to_string()));
        }
        self.store.delete(key).await?;
        debug!(key = %key, "deleted value");
        Ok(())
    }

    /// Fetch every registered key in batches and return a mapping from each
    /// key to its coerced value, or to the null sentinel where the key has no
    /// usable stored data. Unlike [`get`](Self::get), a per-key decode or
    /// schema failure does not abort the call; the failure is logged and the
    /// key resolves to null.
    pub async fn get_all(&self) -> Result<HashMap<String, Value>> {
        let keys: Vec<String> = self.registry.keys().map(str::to_string).collect();
        self.fetch_lenient(keys).await
    }

    /// Batched read restricted to `keys`, with the same per-key leniency as
    /// [`get_all`](Self::get_all). Every key is checked for registry
    /// membership up front; the first unregistered key (in input order) fails
    /// the whole call before anything is fetched.
    pub async fn get_multiple<K: AsRef<str>>(&self, keys: &[K]) -> Result<HashMap<String, Value>> {
        for key in keys {
            if !self.registry.contains(key.as_ref()) {
                return Err(KeyStoreError::UnknownKey(key.as_ref().to_string()));
            }
        }
        let keys: Vec<String> = keys.iter().map(|k| k.as_ref().to_string()).collect();
        self.fetch_lenient(keys).await
    }

    // Batches are issued sequentially to bound concurrent load on the store.
    async fn fetch_lenient(&self, keys: Vec<String>) -> Result<HashMap<String, Value>> {
        let mut out = HashMap::with_capacity(keys.len());
        for batch in keys.chunks(MAX_BATCH_KEYS) {
            let mut raw = self.store.get_many(batch).await?;
            for key in batch {
                let value = self.decode_lenient(key, raw.remove(key).flatten());
                out.insert(key.clone(), value);
            }
        }
        Ok(out)
    }

    /// Read-path decode for bulk operations: any per-key failure resolves to
    /// the null sentinel instead of an error. Registry membership has already
    /// been established by the caller.
    fn decode_lenient(&self, key: &str, raw: Option<String>) -> Value {
        let Some(validator) = self.registry.validator(key) else {
            return Value::Null;
        };
        let decoded = match raw {
            Some(text) => match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(error) => {
                    warn!(key = %key, %error, "undecodable stored value, resolving to null in bulk read");
                    return Value::Null;
                }
            },
            // Absence is not a data problem; coerce the null sentinel and
            // fall back to null quietly if the schema rejects it.
            None => return validator.coerce(Value::Null).unwrap_or(Value::Null),
        };
        match validator.coerce(decoded) {
            Ok(value) => value,
            Err(errors) => {
                warn!(key = %key, %errors, "stored value failed its schema, resolving to null in bulk read");
                Value::Null
            }
        }
    }
}
