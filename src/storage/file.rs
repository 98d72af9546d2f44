//! File-based storage backend.

use crate::error::{Error, Result};
use crate::storage::traits::Storage;
use std::fs;
use std::path::PathBuf;

/// File-based storage backend with atomic writes.
///
/// Each key is one file under `<base_dir>/store/`. An optional byte quota
/// covers the whole directory, mirroring the budget a browser profile puts
/// on local storage.
#[derive(Debug)]
pub struct FileBackend {
    base_dir: PathBuf,
    quota: Option<u64>,
}

impl FileBackend {
    /// Create a new file backend with no byte quota.
    ///
    /// Creates the store directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the store directory cannot be created.
    pub fn new(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(base_dir.join("store"))?;
        Ok(Self {
            base_dir,
            quota: None,
        })
    }

    /// Create a new file backend limited to `quota` total bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the store directory cannot be created.
    pub fn with_quota(base_dir: PathBuf, quota: u64) -> Result<Self> {
        let mut backend = Self::new(base_dir)?;
        backend.quota = Some(quota);
        Ok(backend)
    }

    /// Get the path to a key's file.
    fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join("store").join(key)
    }

    /// Total bytes held by every key except `skip`.
    fn bytes_excluding(&self, skip: &str) -> Result<u64> {
        let store_dir = self.base_dir.join("store");
        let mut total = 0;

        for entry in fs::read_dir(&store_dir)? {
            let entry = entry?;
            let path = entry.path();

            // Skip .tmp leftovers; they are not committed values
            if path.extension().is_some_and(|e| e == "tmp") {
                continue;
            }
            if entry.file_name().to_str() == Some(skip) {
                continue;
            }
            total += entry.metadata()?.len();
        }

        Ok(total)
    }
}

impl Storage for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        if let Some(limit) = self.quota {
            let attempted = self.bytes_excluding(key)? + value.len() as u64;
            if attempted > limit {
                return Err(Error::QuotaExceeded {
                    key: key.to_string(),
                    attempted,
                    limit,
                });
            }
        }

        let path = self.key_path(key);
        let temp = path.with_extension("tmp");

        // Write to temp file first
        fs::write(&temp, value)?;

        // Atomic rename - prevents corruption if process crashes mid-write
        fs::rename(&temp, &path)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let store_dir = self.base_dir.join("store");
        if !store_dir.exists() {
            return Ok(());
        }
        for entry in fs::read_dir(&store_dir)? {
            let entry = entry?;
            if entry.path().is_file() {
                fs::remove_file(entry.path())?;
            }
        }
        Ok(())
    }
}
