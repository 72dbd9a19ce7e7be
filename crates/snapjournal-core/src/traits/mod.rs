//! Collaborator traits for the platform services the journal consumes.

mod capture;
mod file_storage;
mod key_value;
mod share;
mod updates;

pub use capture::{
    CaptureOptions, CaptureOutcome, CaptureService, CaptureSource, CapturedImage, ImageFormat,
};
pub use file_storage::{DeleteOutcome, FileStorage};
pub use key_value::KeyValueStore;
pub use share::{Clipboard, SharePayload, ShareRequest, ShareService};
pub use updates::PhotoListUpdates;
