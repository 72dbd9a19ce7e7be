//! Photo lifecycle controller.
//!
//! Turns capture, delete, edit and share requests into platform calls and
//! store mutations. Every collaborator failure has a fallback: a failed
//! native write stores the photo inline, a failed capture records the demo
//! image, a failed share copies the title to the clipboard.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use snapjournal_core::error::ShareError;
use snapjournal_core::traits::{
    CaptureOptions, CaptureOutcome, CaptureService, CapturedImage, Clipboard, DeleteOutcome,
    FileStorage, ImageFormat, SharePayload, ShareRequest, ShareService,
};
use snapjournal_core::types::{
    ASSET_FILE_PREFIX, Environment, InlineImage, PhotoId, PhotoIdGenerator, PhotoRecord, PhotoRef,
    clamp_title, normalize_title,
};
use snapjournal_core::{Error, Result};

use crate::demo::demo_image;
use crate::store::PhotoStore;

/// Controller configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Upper bound on any single collaborator call.
    pub collaborator_timeout: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            collaborator_timeout: Duration::from_secs(30),
        }
    }
}

/// Platform services the controller drives.
#[derive(Clone)]
pub struct Platform {
    pub capture: Arc<dyn CaptureService>,
    pub files: Arc<dyn FileStorage>,
    pub share: Arc<dyn ShareService>,
    pub clipboard: Arc<dyn Clipboard>,
}

/// How a share request was fulfilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The platform share sheet took the photo.
    Shared,
    /// Sharing was unavailable or failed; the title was copied instead.
    CopiedToClipboard,
}

/// Drives the photo lifecycle over a [`PhotoStore`].
pub struct LifecycleController {
    store: Arc<PhotoStore>,
    environment: Environment,
    platform: Platform,
    config: ControllerConfig,
    ids: PhotoIdGenerator,
}

impl LifecycleController {
    pub fn new(
        store: Arc<PhotoStore>,
        environment: Environment,
        platform: Platform,
        config: ControllerConfig,
    ) -> Self {
        Self {
            store,
            environment,
            platform,
            config,
            ids: PhotoIdGenerator::new(),
        }
    }

    pub fn store(&self) -> &Arc<PhotoStore> {
        &self.store
    }

    /// The handle a renderer should load for `record`.
    pub fn display_uri<'a>(&self, record: &'a PhotoRecord) -> &'a str {
        record.display_handle()
    }

    /// Run the capture collaborator and record the result.
    ///
    /// Returns `Ok(None)` if the user cancelled. A genuine capture failure
    /// records the demo image instead.
    #[instrument(skip(self, options))]
    pub async fn take_photo(
        &self,
        title: &str,
        options: &CaptureOptions,
    ) -> Result<Option<PhotoRecord>> {
        let outcome = self
            .call("capture", self.platform.capture.capture(options))
            .await;

        let image = match outcome {
            Ok(CaptureOutcome::Captured(image)) => image,
            Ok(CaptureOutcome::Cancelled) => {
                debug!("Capture cancelled");
                return Ok(None);
            }
            Err(e) if e.is_cancellation() => {
                debug!("Capture cancelled");
                return Ok(None);
            }
            Err(e) => {
                warn!(error = %e, "Capture failed, recording demo image");
                demo_image()?
            }
        };

        self.capture(title, image).await.map(Some)
    }

    /// Store a captured image and prepend its record.
    ///
    /// In a native environment the image is written to the document area; if
    /// that fails for any reason it is stored inline instead. Capture only
    /// fails if the store rejects the record.
    #[instrument(skip(self, image), fields(format = ?image.format, len = image.bytes.len()))]
    pub async fn capture(&self, title: &str, image: CapturedImage) -> Result<PhotoRecord> {
        let now = Utc::now().timestamp_millis();
        let id = self.next_id(now);

        let (storage_ref, display_ref) = match self.environment {
            Environment::HostedWeb => inline_refs(&image),
            Environment::NativeMobile => match self.write_asset(&id, &image).await {
                Ok(refs) => refs,
                Err(e) => {
                    warn!(id = %id, error = %e, "Native write failed, storing photo inline");
                    inline_refs(&image)
                }
            },
        };

        let record = PhotoRecord {
            id,
            title: normalize_title(title),
            timestamp: now,
            storage_ref,
            display_ref: Some(display_ref),
        };

        self.store.append(record.clone()).await?;
        debug!(id = %record.id, inline = record.is_inline(), "Captured photo");

        Ok(record)
    }

    /// Delete a record and, where possible, its asset.
    ///
    /// The record leaves the list even if the asset could not be deleted.
    /// Returns false if the record was already gone.
    #[instrument(skip(self, record), fields(id = %record.id))]
    pub async fn delete_record(&self, record: &PhotoRecord) -> bool {
        if self.environment.is_native() && record.storage().is_referenced() {
            let handle = &record.storage_ref;
            match self.call("delete", self.platform.files.delete(handle)).await {
                Ok(DeleteOutcome::Deleted) => debug!("Deleted photo asset"),
                Ok(DeleteOutcome::NotFound) => debug!("Photo asset already gone"),
                Err(e) if e.is_not_found() => debug!("Photo asset already gone"),
                Err(e) => warn!(error = %e, "Failed to delete photo asset"),
            }
        }

        self.store.remove(&record.id).await
    }

    /// Delete by id. Returns false if no record had the id.
    pub async fn delete_by_id(&self, id: &PhotoId) -> bool {
        match self.store.get(id) {
            Some(record) => self.delete_record(&record).await,
            None => false,
        }
    }

    /// Replace a record's title. Returns false if no record had the id.
    pub async fn edit_title(&self, id: &PhotoId, title: &str) -> bool {
        self.store.update_title(id, clamp_title(title)).await
    }

    /// Share a record, falling back to copying its title.
    #[instrument(skip(self, record), fields(id = %record.id))]
    pub async fn share(&self, record: &PhotoRecord) -> Result<ShareOutcome> {
        let attempt = match (self.environment, record.storage()) {
            (Environment::HostedWeb, PhotoRef::Inline(image)) => {
                if !self.platform.share.can_share() {
                    debug!("No share capability");
                    return self.copy_title(record).await;
                }
                self.share_attachment(record, &image).await
            }
            _ => self.share_link(record).await,
        };

        match attempt {
            Ok(()) => Ok(ShareOutcome::Shared),
            Err(e) => {
                warn!(error = %e, "Share failed, copying title instead");
                self.copy_title(record).await
            }
        }
    }

    /// Handle a renderer report that a record's image failed to load.
    ///
    /// A referenced handle that no longer resolves means the asset is gone, so
    /// the record is deleted. Inline records are left alone. Returns true if a
    /// record was deleted.
    #[instrument(skip(self))]
    pub async fn report_display_failure(&self, id: &PhotoId) -> bool {
        let Some(record) = self.store.get(id) else {
            return false;
        };

        if PhotoRef::parse(record.display_handle()).is_inline() {
            debug!("Inline image failed to render, keeping record");
            return false;
        }

        warn!(handle = %record.display_handle(), "Photo no longer resolves, deleting");
        self.delete_record(&record).await
    }

    async fn write_asset(&self, id: &PhotoId, image: &CapturedImage) -> Result<(String, String)> {
        let file_name = format!(
            "{}{}.{}",
            ASSET_FILE_PREFIX,
            id,
            image.format.extension()
        );

        let handle = self
            .call("write", self.platform.files.write(&file_name, &image.bytes))
            .await?;

        match self
            .call("resolve", self.platform.files.resolve_viewable_uri(&handle))
            .await
        {
            Ok(uri) => Ok((handle, uri)),
            Err(e) => {
                // The record will be inline; don't leave the file behind.
                if let Err(cleanup) = self
                    .call("delete", self.platform.files.delete(&handle))
                    .await
                {
                    debug!(error = %cleanup, "Failed to remove orphaned asset");
                }
                Err(e)
            }
        }
    }

    async fn share_attachment(&self, record: &PhotoRecord, image: &InlineImage) -> Result<()> {
        let bytes = image.decode()?;
        let extension = match image.mime() {
            "image/png" => ImageFormat::Png.extension(),
            _ => ImageFormat::Jpeg.extension(),
        };

        let request = ShareRequest {
            title: record.title.clone(),
            text: record.title.clone(),
            payload: SharePayload::File {
                name: format!("{}{}.{}", ASSET_FILE_PREFIX, record.id, extension),
                mime: image.mime().to_string(),
                bytes,
            },
        };

        self.call("share", self.platform.share.share(request)).await
    }

    async fn share_link(&self, record: &PhotoRecord) -> Result<()> {
        let request = ShareRequest {
            title: record.title.clone(),
            text: record.title.clone(),
            payload: SharePayload::Url(record.display_handle().to_string()),
        };

        self.call("share", self.platform.share.share(request)).await
    }

    async fn copy_title(&self, record: &PhotoRecord) -> Result<ShareOutcome> {
        self.call(
            "clipboard",
            self.platform.clipboard.write_text(&record.title),
        )
        .await
        .map_err(|e| match e {
            Error::Share(share) => Error::Share(share),
            other => Error::Share(ShareError::Clipboard {
                message: other.to_string(),
            }),
        })?;

        Ok(ShareOutcome::CopiedToClipboard)
    }

    /// Issue an id that is unique against the current list.
    fn next_id(&self, now: i64) -> PhotoId {
        let current = self.store.snapshot();
        for record in current.iter() {
            if let Ok(n) = record.id.as_str().parse::<i64>() {
                self.ids.observe(n);
            }
        }

        // Issued ids never repeat, so this ends once past any loaded spill ids.
        loop {
            let id = self.ids.issue(now);
            if !current.iter().any(|r| r.id == id) {
                return id;
            }
        }
    }

    async fn call<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        let limit = self.config.collaborator_timeout;
        match tokio::time::timeout(limit, fut).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout {
                operation,
                duration_ms: limit.as_millis() as u64,
            }),
        }
    }
}

fn inline_refs(image: &CapturedImage) -> (String, String) {
    let inline = InlineImage::encode(image.format.mime(), &image.bytes);
    let uri = inline.as_str().to_string();
    (uri.clone(), uri)
}

impl std::fmt::Debug for LifecycleController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleController")
            .field("environment", &self.environment)
            .field("config", &self.config)
            .field("store", &self.store)
            .finish()
    }
}
