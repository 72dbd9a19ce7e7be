//! Key-value persistence trait.

use async_trait::async_trait;

use crate::Result;

/// String key-value persistence.
///
/// `set` replaces the whole value for a key; readers never observe a
/// partially written value.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a key. A missing key is `Ok(None)`, not an error.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a key.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<()>;
}
