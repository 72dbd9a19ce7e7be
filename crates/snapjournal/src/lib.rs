//! snapjournal - Local photo journal.
//!
//! A [`PhotoStore`] owns the photo list and its persisted form; a
//! [`LifecycleController`] turns captures, edits, deletes and shares into
//! platform calls and store mutations. Platform services are injected
//! through the traits in [`snapjournal_core::traits`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use snapjournal::{ControllerConfig, LifecycleController, Platform, PhotoStore, StoreConfig};
//! use snapjournal::{Environment, EnvironmentSignals};
//!
//! # async fn run(kv: Arc<dyn snapjournal::KeyValueStore>, platform: Platform) -> snapjournal::Result<()> {
//! let environment = Environment::detect(&EnvironmentSignals::default());
//! let store = Arc::new(PhotoStore::new(kv, environment, StoreConfig::default()));
//! store.load().await?;
//!
//! let journal = LifecycleController::new(store, environment, platform, ControllerConfig::default());
//! for photo in journal.store().snapshot().iter() {
//!     println!("{} {}", photo.id, photo.title);
//! }
//! # Ok(())
//! # }
//! ```

mod controller;
mod demo;
mod store;
mod updates;

pub use controller::{ControllerConfig, LifecycleController, Platform, ShareOutcome};
pub use demo::demo_image;
pub use store::{LoadReport, PhotoList, PhotoStore, StoreConfig};
pub use updates::PhotoListStream;

pub use snapjournal_core::error;
pub use snapjournal_core::traits;
pub use snapjournal_core::types;
pub use snapjournal_core::{
    CaptureOptions, CaptureOutcome, CaptureService, CaptureSource, CapturedImage, Clipboard,
    DeleteOutcome, Environment, EnvironmentSignals, Error, FileStorage, ImageFormat, InlineImage,
    KeyValueStore, PhotoId, PhotoListUpdates, PhotoRecord, PhotoRef, Representation, Result,
    SharePayload, ShareRequest, ShareService, Staleness,
};
