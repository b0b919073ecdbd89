use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::errors::Result;
use crate::store::BackingStore;

/// MemoryStore is a simple in-memory key-value store that implements the
/// BackingStore trait.
/// SHOULD BE USED ONLY FOR TESTING PURPOSES
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<DashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            inner: Arc::new(DashMap::new()),
        }
    }

    /// Number of stored entries. Handy for test assertions.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl BackingStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.inner.get(key).map(|entry| entry.value().clone()))
    }

    async fn get_many(&self, keys: &[String]) -> Result<HashMap<String, Option<String>>> {
        let mut out = HashMap::with_capacity(keys.len());
        for key in keys {
            let value = self.inner.get(key).map(|entry| entry.value().clone());
            out.insert(key.clone(), value);
        }
        Ok(out)
    }

    async fn put(&self, key: &str, text: String) -> Result<()> {
        self.inner.insert(key.to_string(), text);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let _value = self.inner.remove(key);
        Ok(())
    }
}
