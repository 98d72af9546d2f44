//! In-memory storage backend for testing.

use crate::error::{Error, Result};
use crate::storage::traits::Storage;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage backend for testing.
///
/// An optional capacity (total bytes across keys and values) simulates the
/// quota behavior of a real backend, so tests can exercise the truncation
/// cascade without touching disk.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
    capacity: Option<u64>,
}

impl MemoryBackend {
    /// Create a new in-memory backend with no byte budget.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new in-memory backend limited to `capacity` total bytes.
    #[must_use]
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity: Some(capacity),
        }
    }

}

impl Storage for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().unwrap();
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap();

        if let Some(limit) = self.capacity {
            let others: u64 = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| (k.len() + v.len()) as u64)
                .sum();
            let attempted = others + (key.len() + value.len()) as u64;
            if attempted > limit {
                return Err(Error::QuotaExceeded {
                    key: key.to_string(),
                    attempted,
                    limit,
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        entries.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        entries.clear();
        Ok(())
    }
}
