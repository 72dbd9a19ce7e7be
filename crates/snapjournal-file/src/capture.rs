//! Image-file capture.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

use snapjournal_core::error::CaptureError;
use snapjournal_core::Result;
use snapjournal_core::traits::{
    CaptureOptions, CaptureOutcome, CaptureService, CapturedImage, ImageFormat,
};

/// Capture that reads an existing image file instead of driving a camera.
///
/// With no source configured the capture is treated as dismissed, which is
/// what a shell without a camera reports when the user closes the picker.
#[derive(Debug, Clone, Default)]
pub struct FileCapture {
    source: Option<PathBuf>,
}

impl FileCapture {
    pub fn new(source: impl AsRef<Path>) -> Self {
        Self {
            source: Some(source.as_ref().to_path_buf()),
        }
    }

    /// A capture with no image source.
    pub fn dismissed() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CaptureService for FileCapture {
    #[instrument(skip(self))]
    async fn capture(&self, options: &CaptureOptions) -> Result<CaptureOutcome> {
        let Some(path) = &self.source else {
            debug!("No image source; capture dismissed");
            return Ok(CaptureOutcome::Cancelled);
        };

        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ImageFormat::from_extension)
            .unwrap_or(options.format);

        let bytes = fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CaptureError::Unavailable {
                message: format!("{} does not exist", path.display()),
            },
            _ => CaptureError::Failed {
                message: e.to_string(),
            },
        })?;

        if bytes.is_empty() {
            return Err(CaptureError::Failed {
                message: format!("{} is empty", path.display()),
            }
            .into());
        }

        debug!(path = %path.display(), len = bytes.len(), "Captured image from file");

        Ok(CaptureOutcome::Captured(CapturedImage::new(bytes, format)))
    }
}
