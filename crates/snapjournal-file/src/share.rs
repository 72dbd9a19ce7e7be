//! Export-directory share target and file clipboard.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use snapjournal_core::error::ShareError;
use snapjournal_core::traits::{Clipboard, SharePayload, ShareRequest, ShareService};
use snapjournal_core::{Error, Result};

use crate::fs_util::{atomic_write, is_plain_file_name, with_lock};

/// One line of the share log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLogEntry {
    /// ISO 8601 timestamp.
    pub time: String,
    pub title: String,
    pub text: String,
    /// Exported attachment path, for file payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Shared URL, for URL payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Share target that exports attachments into a directory.
///
/// Every share appends a line to `shares.jsonl` in the export directory;
/// file payloads are also written out next to it.
#[derive(Debug, Clone)]
pub struct ExportShare {
    dir: PathBuf,
    available: bool,
}

impl ExportShare {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            available: true,
        }
    }

    /// A share target that reports no share capability.
    pub fn unavailable(dir: impl AsRef<Path>) -> Self {
        Self {
            available: false,
            ..Self::new(dir)
        }
    }

    /// Get the share log path.
    pub fn log_path(&self) -> PathBuf {
        self.dir.join("shares.jsonl")
    }

    fn lock_path(&self) -> PathBuf {
        self.dir.join("shares.lock")
    }

    /// Read back every logged share.
    pub fn entries(&self) -> Result<Vec<ShareLogEntry>> {
        let path = self.log_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(Error::from))
            .collect()
    }

    fn append_log(&self, entry: &ShareLogEntry) -> Result<()> {
        let line = serde_json::to_string(entry)?;
        let log_path = self.log_path();

        with_lock(&self.lock_path(), || {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)?;
            writeln!(file, "{}", line)?;
            file.sync_data()?;
            Ok(())
        })
    }
}

#[async_trait]
impl ShareService for ExportShare {
    fn can_share(&self) -> bool {
        self.available
    }

    #[instrument(skip(self, request), fields(title = %request.title))]
    async fn share(&self, request: ShareRequest) -> Result<()> {
        if !self.available {
            return Err(ShareError::Unavailable.into());
        }

        let mut entry = ShareLogEntry {
            time: Utc::now().to_rfc3339(),
            title: request.title,
            text: request.text,
            file: None,
            url: None,
        };

        match request.payload {
            SharePayload::File { name, bytes, .. } => {
                if !is_plain_file_name(&name) {
                    return Err(ShareError::Failed {
                        message: format!("invalid attachment name '{}'", name),
                    }
                    .into());
                }
                let path = self.dir.join(&name);
                atomic_write(&path, &bytes)?;
                entry.file = Some(path.to_string_lossy().into_owned());
            }
            SharePayload::Url(url) => entry.url = Some(url),
        }

        self.append_log(&entry)?;
        debug!("Shared photo");

        Ok(())
    }
}

/// Clipboard backed by a single text file.
#[derive(Debug, Clone)]
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read the current clipboard text, if any.
    pub fn read_text(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }
}

#[async_trait]
impl Clipboard for FileClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        atomic_write(&self.path, text.as_bytes()).map_err(|e| {
            Error::Share(ShareError::Clipboard {
                message: e.to_string(),
            })
        })
    }
}
