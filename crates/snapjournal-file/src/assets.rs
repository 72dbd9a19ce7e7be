//! Document-area asset storage.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

use snapjournal_core::error::{InvalidInputError, StorageError};
use snapjournal_core::traits::{DeleteOutcome, FileStorage};
use snapjournal_core::{Error, Result};

use crate::fs_util::{atomic_write, is_plain_file_name};

/// Scheme of handles returned by [`FileAssetStorage::write`].
pub const DOCUMENTS_SCHEME: &str = "documents:";

/// Scheme of viewable URIs, served by the host shell's asset protocol.
const VIEWABLE_PREFIX: &str = "asset://localhost";

/// Photo assets stored as files in `<root>/documents`.
///
/// Handles are relative (`documents:<file name>`) so they stay valid when the
/// data directory moves. Viewable URIs are absolute and resolved on demand.
#[derive(Debug, Clone)]
pub struct FileAssetStorage {
    root: PathBuf,
}

impl FileAssetStorage {
    /// Create asset storage rooted at the given data directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the documents directory.
    pub fn documents_dir(&self) -> PathBuf {
        self.root.join("documents")
    }

    fn handle_for(file_name: &str) -> String {
        format!("{}{}", DOCUMENTS_SCHEME, file_name)
    }

    /// Map a handle back to its file path.
    pub fn path_for(&self, handle: &str) -> Result<PathBuf> {
        let name = handle
            .strip_prefix(DOCUMENTS_SCHEME)
            .filter(|name| is_plain_file_name(name))
            .ok_or_else(|| {
                Error::InvalidInput(InvalidInputError::Other {
                    message: format!("not a document handle: {}", handle),
                })
            })?;
        Ok(self.documents_dir().join(name))
    }
}

#[async_trait]
impl FileStorage for FileAssetStorage {
    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    async fn write(&self, file_name: &str, bytes: &[u8]) -> Result<String> {
        if !is_plain_file_name(file_name) {
            return Err(Error::InvalidInput(InvalidInputError::Other {
                message: format!("invalid asset file name '{}'", file_name),
            }));
        }

        let path = self.documents_dir().join(file_name);
        atomic_write(&path, bytes)?;

        let handle = Self::handle_for(file_name);
        debug!(handle = %handle, "Wrote asset");

        Ok(handle)
    }

    async fn resolve_viewable_uri(&self, handle: &str) -> Result<String> {
        let path = self.path_for(handle)?;

        if !path.exists() {
            return Err(StorageError::NotFound {
                handle: handle.to_string(),
            }
            .into());
        }

        let path = fs::canonicalize(&path)?;
        let path = path.to_string_lossy().replace('\\', "/");
        let path = path.trim_start_matches('/');

        Ok(format!("{}/{}", VIEWABLE_PREFIX, path))
    }

    #[instrument(skip(self))]
    async fn delete(&self, handle: &str) -> Result<DeleteOutcome> {
        let path = self.path_for(handle)?;

        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Deleted asset");
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(DeleteOutcome::NotFound),
            Err(e) => Err(e.into()),
        }
    }
}
