//! snapjournal-core - Core photo journal types and collaborator traits.

pub mod error;
pub mod traits;
pub mod types;

pub use error::Error;
pub use traits::{
    CaptureOptions, CaptureOutcome, CaptureService, CaptureSource, CapturedImage, Clipboard,
    DeleteOutcome, FileStorage, ImageFormat, KeyValueStore, PhotoListUpdates, SharePayload,
    ShareRequest, ShareService,
};
pub use types::{
    Environment, EnvironmentSignals, InlineImage, PhotoId, PhotoIdGenerator, PhotoRecord,
    PhotoRef, Representation, Staleness,
};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
