mod errors;
pub use errors::{Result, StoreError};

mod store;
pub use store::BackingStore;

mod providers;
pub use providers::in_memory::MemoryStore;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

/// Dispatch enum over backing-store providers.
///
/// Production wraps a remote client behind `Arc<dyn BackingStore>`; tests use
/// the in-memory backend.
pub enum StorageBackend {
    Remote(Arc<dyn BackingStore>),
    InMemory(MemoryStore),
}

impl Clone for StorageBackend {
    fn clone(&self) -> Self {
        match self {
            Self::Remote(store) => Self::Remote(Arc::clone(store)),
            Self::InMemory(store) => Self::InMemory(store.clone()),
        }
    }
}

impl fmt::Debug for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(_) => f.debug_tuple("Remote").field(&"...").finish(),
            Self::InMemory(store) => f.debug_tuple("InMemory").field(store).finish(),
        }
    }
}

#[async_trait]
impl BackingStore for StorageBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            StorageBackend::Remote(store) => store.get(key).await,
            StorageBackend::InMemory(store) => store.get(key).await,
        }
    }

    async fn get_many(&self, keys: &[String]) -> Result<HashMap<String, Option<String>>> {
        match self {
            StorageBackend::Remote(store) => store.get_many(keys).await,
            StorageBackend::InMemory(store) => store.get_many(keys).await,
        }
    }

    async fn put(&self, key: &str, text: String) -> Result<()> {
        match self {
            StorageBackend::Remote(store) => store.put(key, text).await,
            StorageBackend::InMemory(store) => store.put(key, text).await,
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        match self {
            StorageBackend::Remote(store) => store.delete(key).await,
            StorageBackend::InMemory(store) => store.delete(key).await,
        }
    }
}
