//! File-backed key-value persistence.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

use snapjournal_core::error::InvalidInputError;
use snapjournal_core::traits::KeyValueStore;
use snapjournal_core::{Error, Result};

use crate::fs_util::{atomic_write, is_plain_file_name, with_lock};

/// Key-value persistence with one file per key.
///
/// Values are stored verbatim in `<root>/kv/<key>.json`. Writes go through a
/// temporary file and a rename under an exclusive lock, so a crash mid-write
/// leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store rooted at the given data directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn kv_dir(&self) -> PathBuf {
        self.root.join("kv")
    }

    fn lock_path(&self) -> PathBuf {
        self.kv_dir().join(".lock")
    }

    /// Get the file path backing a key.
    pub fn key_path(&self, key: &str) -> Result<PathBuf> {
        if !is_plain_file_name(key) {
            return Err(Error::InvalidInput(InvalidInputError::Other {
                message: format!("invalid storage key '{}'", key),
            }));
        }
        Ok(self.kv_dir().join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        Ok(Some(content))
    }

    #[instrument(skip(self, value), fields(len = value.len()))]
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;

        with_lock(&self.lock_path(), || atomic_write(&path, value.as_bytes()))?;

        debug!("Stored key");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;

        with_lock(&self.lock_path(), || {
            if path.exists() {
                fs::remove_file(&path)?;
                debug!("Removed key");
            }
            Ok(())
        })
    }
}
