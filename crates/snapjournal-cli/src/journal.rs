//! Opening the journal over the data directory.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use snapjournal::{LifecycleController, Platform, PhotoStore};
use snapjournal_file::{
    ExportShare, FileAssetStorage, FileCapture, FileClipboard, FileKeyValueStore,
};

use crate::cli::GlobalArgs;
use crate::config::Config;

/// An opened journal and the configuration it was opened with.
pub struct Journal {
    pub config: Config,
    pub controller: LifecycleController,
}

/// Open and load the journal. `capture_source` feeds the capture service.
pub async fn open(args: &GlobalArgs, capture_source: Option<&Path>) -> Result<Journal> {
    let config = Config::resolve(args)?;

    let capture = match capture_source {
        Some(path) => FileCapture::new(path),
        None => FileCapture::dismissed(),
    };

    let platform = Platform {
        capture: Arc::new(capture),
        files: Arc::new(FileAssetStorage::new(&config.data_dir)),
        share: Arc::new(ExportShare::new(config.share_dir())),
        clipboard: Arc::new(FileClipboard::new(config.clipboard_path())),
    };

    let kv = Arc::new(FileKeyValueStore::new(&config.data_dir));
    let store = Arc::new(PhotoStore::new(
        kv,
        config.environment,
        config.store.clone(),
    ));

    let report = store.load().await.context("Failed to load photos")?;
    if report.reset {
        warn!("Photo list was corrupt and has been reset");
    }
    if report.dropped() > 0 {
        info!(
            stale = report.stale.len(),
            duplicates = report.duplicates.len(),
            malformed = report.malformed,
            "Dropped unusable photos"
        );
    }

    let controller = LifecycleController::new(
        store,
        config.environment,
        platform,
        config.controller.clone(),
    );

    Ok(Journal { config, controller })
}
