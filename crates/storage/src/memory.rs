use std::collections::BTreeMap;

use crate::error::StorageError;
use crate::key::StorageKey;
use crate::traits::PactumStorage;

/// Volatile backend holding documents in memory. Used by tests and by
/// sessions configured with `backend = "memory"`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    documents: BTreeMap<StorageKey, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document, as if it had been saved by an earlier session.
    pub fn with_document(mut self, key: StorageKey, payload: impl Into<String>) -> Self {
        self.documents.insert(key, payload.into());
        self
    }

    pub fn document(&self, key: StorageKey) -> Option<&str> {
        self.documents.get(&key).map(String::as_str)
    }
}

impl PactumStorage for MemoryStorage {
    fn load(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        Ok(self.documents.get(&key).cloned())
    }

    fn save(&mut self, key: StorageKey, payload: &str) -> Result<(), StorageError> {
        self.documents.insert(key, payload.to_string());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
