//! snapjournal-file - Filesystem-backed platform collaborators.
//!
//! These stand in for the services a native shell provides: key-value
//! persistence, document-area asset storage, image capture, sharing and the
//! clipboard. Everything lives under a single data directory.

mod assets;
mod capture;
mod fs_util;
mod kv;
mod share;

pub use assets::{DOCUMENTS_SCHEME, FileAssetStorage};
pub use capture::FileCapture;
pub use kv::FileKeyValueStore;
pub use share::{ExportShare, FileClipboard, ShareLogEntry};
