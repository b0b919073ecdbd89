#![allow(dead_code)] // each test binary uses a different subset of helpers

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use schemakv_store::{BackingStore, MemoryStore, SchemaDefinition, StoreError, ValidatedKeyStore};

/// Installs a compact subscriber so downgrade warnings from bulk reads are
/// visible under `--nocapture`. Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Registry used across the suites: a boolean feature flag and a numeric
/// sampling rate.
pub fn flag_rate_definitions() -> HashMap<String, SchemaDefinition> {
    HashMap::from([
        ("flag".to_string(), SchemaDefinition::Boolean),
        ("rate".to_string(), SchemaDefinition::Number),
    ])
}

/// Builds a validated store over a fresh in-memory backend and returns both,
/// so tests can reach past the validation layer to inspect or corrupt the
/// raw stored text.
pub fn flag_rate_store() -> (ValidatedKeyStore<MemoryStore>, MemoryStore) {
    let memory = MemoryStore::new();
    let store = ValidatedKeyStore::with_definitions(memory.clone(), flag_rate_definitions())
        .expect("compile registry");
    (store, memory)
}

/// Wraps the in-memory backend and counts every backend call, so tests can
/// assert that an operation never reached the store.
#[derive(Debug, Clone)]
pub struct RecordingStore {
    inner: MemoryStore,
    calls: Arc<AtomicUsize>,
}

impl RecordingStore {
    pub fn new() -> Self {
        RecordingStore {
            inner: MemoryStore::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackingStore for RecordingStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }

    async fn get_many(&self, keys: &[String]) -> Result<HashMap<String, Option<String>>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_many(keys).await
    }

    async fn put(&self, key: &str, text: String) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.put(key, text).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(key).await
    }
}

/// Backend whose every call fails with a transport error, for asserting
/// that store-level failures propagate unchanged.
#[derive(Debug, Clone)]
pub struct FailingStore;

#[async_trait]
impl BackingStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Transport("connection refused".to_string()))
    }

    async fn get_many(
        &self,
        _keys: &[String],
    ) -> Result<HashMap<String, Option<String>>, StoreError> {
        Err(StoreError::Transport("connection refused".to_string()))
    }

    async fn put(&self, _key: &str, _text: String) -> Result<(), StoreError> {
        Err(StoreError::Transport("connection refused".to_string()))
    }

    async fn delete(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Transport("connection refused".to_string()))
    }
}
