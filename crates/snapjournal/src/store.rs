//! Photo record store.
//!
//! Owns the canonical photo list, persists it as a single JSON blob under one
//! key, and heals stale or corrupt persisted state on load.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, instrument, warn};

use snapjournal_core::error::InvalidInputError;
use snapjournal_core::traits::KeyValueStore;
use snapjournal_core::types::{Environment, PhotoId, PhotoRecord, Staleness};
use snapjournal_core::{Error, Result};

use crate::updates::PhotoListStream;

/// A shared, immutable snapshot of the photo list.
pub type PhotoList = Arc<Vec<PhotoRecord>>;

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Persistence key holding the serialized list.
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            key: "photos".to_string(),
        }
    }
}

/// What `load` found and repaired.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records kept in the list.
    pub kept: usize,
    /// Records dropped because their handles went stale.
    pub stale: Vec<(PhotoId, Staleness)>,
    /// Later records dropped because an earlier record had the same id.
    pub duplicates: Vec<PhotoId>,
    /// Entries that could not be decoded as a record.
    pub malformed: usize,
    /// The blob was not a JSON list and the key was erased.
    pub reset: bool,
}

impl LoadReport {
    /// Number of records dropped from the persisted list.
    pub fn dropped(&self) -> usize {
        self.stale.len() + self.duplicates.len() + self.malformed
    }
}

/// The canonical photo list.
///
/// Readers get immutable snapshots; every mutation builds a new list from the
/// latest snapshot, persists it, then publishes it. Mutations are serialized
/// through a single writer lock, so two quick mutations never compute from
/// the same base list.
pub struct PhotoStore {
    kv: Arc<dyn KeyValueStore>,
    environment: Environment,
    config: StoreConfig,
    writer: Mutex<()>,
    current: watch::Sender<PhotoList>,
}

impl PhotoStore {
    /// Create an empty store. Call [`load`](Self::load) to read persisted state.
    pub fn new(kv: Arc<dyn KeyValueStore>, environment: Environment, config: StoreConfig) -> Self {
        let (current, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            kv,
            environment,
            config,
            writer: Mutex::new(()),
            current,
        }
    }

    /// The current list, newest first.
    pub fn snapshot(&self) -> PhotoList {
        self.current.borrow().clone()
    }

    /// Look up a record by id.
    pub fn get(&self, id: &PhotoId) -> Option<PhotoRecord> {
        self.current.borrow().iter().find(|r| &r.id == id).cloned()
    }

    /// Number of records in the current list.
    pub fn len(&self) -> usize {
        self.current.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Watch the current list.
    pub fn subscribe(&self) -> watch::Receiver<PhotoList> {
        self.current.subscribe()
    }

    /// Stream every list published after this call.
    pub fn updates(&self) -> PhotoListStream {
        PhotoListStream::new(self.subscribe())
    }

    /// Read the persisted list, dropping stale records.
    ///
    /// A missing key is an empty list. A blob that is not a JSON list resets
    /// the store to empty and erases the key; an entry that does not decode
    /// is dropped on its own. If any entry was dropped the trimmed list is
    /// persisted immediately so the same entries are not judged again.
    #[instrument(skip(self), fields(key = %self.config.key, environment = %self.environment))]
    pub async fn load(&self) -> Result<LoadReport> {
        let _guard = self.writer.lock().await;

        let Some(blob) = self.kv.get(&self.config.key).await? else {
            debug!("No persisted photos");
            self.publish(Vec::new());
            return Ok(LoadReport::default());
        };

        let entries: Vec<serde_json::Value> = match serde_json::from_str(&blob) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "Persisted photo list is corrupt, resetting");
                if let Err(e) = self.kv.remove(&self.config.key).await {
                    warn!(error = %e, "Failed to erase corrupt photo list");
                }
                self.publish(Vec::new());
                return Ok(LoadReport {
                    reset: true,
                    ..LoadReport::default()
                });
            }
        };

        let mut report = LoadReport::default();
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            let record: PhotoRecord = match serde_json::from_value(entry) {
                Ok(record) => record,
                Err(e) => {
                    debug!(index, error = %e, "Dropping malformed photo entry");
                    report.malformed += 1;
                    continue;
                }
            };
            if let Err(reason) = record.validate(self.environment) {
                debug!(id = %record.id, %reason, "Dropping stale photo");
                report.stale.push((record.id, reason));
                continue;
            }
            if !seen.insert(record.id.clone()) {
                debug!(id = %record.id, "Dropping duplicate photo id");
                report.duplicates.push(record.id);
                continue;
            }
            kept.push(record);
        }

        report.kept = kept.len();

        if report.dropped() > 0 {
            info!(
                dropped = report.dropped(),
                kept = report.kept,
                "Removed unusable photos from persisted list"
            );
            self.save(&kept).await;
        }

        self.publish(kept);
        Ok(report)
    }

    /// Persist `list` under the store key, replacing what was there.
    ///
    /// Failures are logged, not returned: the in-memory list stays
    /// authoritative until the next successful save or the next load.
    pub async fn save(&self, list: &[PhotoRecord]) {
        if let Err(e) = self.persist(list).await {
            warn!(error = %e, count = list.len(), "Failed to persist photo list");
        }
    }

    async fn persist(&self, list: &[PhotoRecord]) -> Result<()> {
        let blob = serde_json::to_string(list)?;
        self.kv.set(&self.config.key, &blob).await
    }

    /// Insert a record at the front of the list.
    #[instrument(skip(self, record), fields(id = %record.id))]
    pub async fn append(&self, record: PhotoRecord) -> Result<()> {
        let _guard = self.writer.lock().await;
        let current = self.snapshot();

        if current.iter().any(|r| r.id == record.id) {
            return Err(Error::InvalidInput(InvalidInputError::DuplicateId {
                value: record.id.to_string(),
            }));
        }

        let mut next = Vec::with_capacity(current.len() + 1);
        next.push(record);
        next.extend(current.iter().cloned());

        self.commit(next).await;
        debug!("Appended photo");
        Ok(())
    }

    /// Remove a record. Returns false if no record had the id.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &PhotoId) -> bool {
        let _guard = self.writer.lock().await;
        let current = self.snapshot();

        if !current.iter().any(|r| &r.id == id) {
            return false;
        }

        let next: Vec<_> = current.iter().filter(|r| &r.id != id).cloned().collect();

        self.commit(next).await;
        debug!("Removed photo");
        true
    }

    /// Replace a record's title. Returns false if no record had the id.
    ///
    /// Any title is accepted, including an empty one.
    #[instrument(skip(self, title))]
    pub async fn update_title(&self, id: &PhotoId, title: impl Into<String>) -> bool {
        let _guard = self.writer.lock().await;
        let current = self.snapshot();

        if !current.iter().any(|r| &r.id == id) {
            return false;
        }

        let title = title.into();
        let next: Vec<_> = current
            .iter()
            .map(|r| {
                if &r.id == id {
                    PhotoRecord {
                        title: title.clone(),
                        ..r.clone()
                    }
                } else {
                    r.clone()
                }
            })
            .collect();

        self.commit(next).await;
        debug!("Updated photo title");
        true
    }

    async fn commit(&self, next: Vec<PhotoRecord>) {
        self.save(&next).await;
        self.publish(next);
    }

    fn publish(&self, list: Vec<PhotoRecord>) {
        self.current.send_replace(Arc::new(list));
    }
}

impl std::fmt::Debug for PhotoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoStore")
            .field("key", &self.config.key)
            .field("environment", &self.environment)
            .field("len", &self.len())
            .finish()
    }
}
