//! Error types for snapjournal.
//!
//! A single error type with explicit variants for persistence, capture,
//! sharing, input validation, and collaborator timeouts. Most of these are
//! recovered from inside the lifecycle controller; they reach callers only
//! where no fallback exists.

use thiserror::Error;

/// The unified error type for snapjournal operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Key-value persistence or asset file storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The capture collaborator failed or was cancelled.
    #[error("capture error: {0}")]
    Capture(#[from] CaptureError),

    /// The share collaborator (or its clipboard fallback) failed.
    #[error("share error: {0}")]
    Share(#[from] ShareError),

    /// Input validation errors (invalid id, duplicate id, malformed inline URI).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// A collaborator call did not complete in time.
    #[error("{operation} timed out after {duration_ms}ms")]
    Timeout {
        operation: &'static str,
        duration_ms: u64,
    },
}

impl Error {
    /// Returns true if this error is a user-initiated capture cancellation.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Error::Capture(CaptureError::Cancelled))
    }

    /// Returns true if this error reports a missing file or key.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Storage(StorageError::NotFound { .. }))
    }
}

/// Persistence and file storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error("I/O error: {message}")]
    Io { message: String },

    /// The persisted blob could not be encoded or decoded.
    #[error("serialization error: {message}")]
    Serialization { message: String },

    /// The handle or key does not exist.
    #[error("not found: {handle}")]
    NotFound { handle: String },

    /// The collaborator does not exist in this environment.
    #[error("unsupported in this environment: {operation}")]
    Unsupported { operation: String },
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Storage(StorageError::from(err))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Storage(StorageError::from(err))
    }
}

/// Capture errors.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The user dismissed the camera or picker.
    #[error("capture cancelled by user")]
    Cancelled,

    /// No camera or image source is available.
    #[error("no image source available: {message}")]
    Unavailable { message: String },

    /// The platform reported a failure.
    #[error("capture failed: {message}")]
    Failed { message: String },
}

impl CaptureError {
    /// Classify a raw platform error message.
    ///
    /// Platforms report a dismissed camera as an ordinary error whose message
    /// mentions cancellation ("User cancelled photos app", "Camera canceled").
    pub fn from_platform_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        if lower.contains("cancel") {
            CaptureError::Cancelled
        } else {
            CaptureError::Failed { message }
        }
    }
}

/// Share errors.
#[derive(Debug, Error)]
pub enum ShareError {
    /// The platform has no share capability.
    #[error("sharing is not available")]
    Unavailable,

    /// The share sheet failed.
    #[error("share failed: {message}")]
    Failed { message: String },

    /// Writing the clipboard fallback failed.
    #[error("clipboard write failed: {message}")]
    Clipboard { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid photo id format.
    #[error("invalid photo id '{value}': {reason}")]
    PhotoId { value: String, reason: String },

    /// The photo id already exists in the list.
    #[error("duplicate photo id '{value}'")]
    DuplicateId { value: String },

    /// Malformed inline data URI.
    #[error("invalid inline image: {reason}")]
    InlineImage { reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
