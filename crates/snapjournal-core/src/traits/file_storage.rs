//! Asset file storage trait.

use async_trait::async_trait;

use crate::Result;

/// Result of deleting an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The asset existed and was removed.
    Deleted,
    /// Nothing was stored under the handle.
    NotFound,
}

/// Storage for photo assets in the app's document area.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Write `bytes` under `file_name` and return an opaque handle to the file.
    async fn write(&self, file_name: &str, bytes: &[u8]) -> Result<String>;

    /// Resolve a handle to a URI the renderer can load.
    async fn resolve_viewable_uri(&self, handle: &str) -> Result<String>;

    /// Delete the file behind a handle.
    async fn delete(&self, handle: &str) -> Result<DeleteOutcome>;
}
