//! Core snapjournal types.
//!
//! These types enforce record invariants at construction time where they
//! can, and expose named checks where stored data has to be judged after
//! the fact.

mod environment;
mod photo_id;
mod photo_ref;
mod record;

pub use environment::{Environment, EnvironmentSignals};
pub use photo_id::{PhotoId, PhotoIdGenerator};
pub use photo_ref::{
    ASSET_FILE_PREFIX, INLINE_PREFIX, InlineImage, PhotoRef, Staleness, is_asset_file_name,
    is_loopback_http,
};
pub use record::{MAX_TITLE_CHARS, PhotoRecord, Representation, clamp_title, normalize_title};
