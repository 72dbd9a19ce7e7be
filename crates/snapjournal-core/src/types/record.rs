//! Photo record type.

use serde::{Deserialize, Deserializer, Serialize};

use super::environment::Environment;
use super::photo_id::PhotoId;
use super::photo_ref::{PhotoRef, Staleness};

/// Maximum caption length in characters.
pub const MAX_TITLE_CHARS: usize = 150;

/// One captured photo.
///
/// Serialized as `{id, title, timestamp, storageRef, displayRef}`; this is the
/// persisted layout and must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    /// Stable identity, issued at capture time.
    pub id: PhotoId,

    /// User caption. May be empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,

    /// Capture time in epoch milliseconds.
    pub timestamp: i64,

    /// Handle used to locate and delete the asset.
    pub storage_ref: String,

    /// Handle used for rendering only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_ref: Option<String>,
}

/// How a record's image is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// Both handles carry the image inline.
    Inline,
    /// Both handles point at a platform asset.
    Referenced,
}

impl PhotoRecord {
    /// Parsed storage handle.
    pub fn storage(&self) -> PhotoRef {
        PhotoRef::parse(&self.storage_ref)
    }

    /// Parsed display handle.
    pub fn display(&self) -> PhotoRef {
        PhotoRef::parse(self.display_ref.as_deref().unwrap_or(""))
    }

    /// The handle a renderer should load: `displayRef`, or `storageRef` when
    /// no display handle was recorded.
    pub fn display_handle(&self) -> &str {
        match self.display_ref.as_deref() {
            Some(display) if !display.is_empty() => display,
            _ => &self.storage_ref,
        }
    }

    /// Determine the record's representation.
    ///
    /// The two handles must agree; a missing display handle inherits the
    /// storage handle's representation.
    pub fn representation(&self) -> Result<Representation, Staleness> {
        let storage = self.storage();
        let display = self.display();

        match (&storage, &display) {
            (PhotoRef::Empty, _) => Err(Staleness::EmptyStorage),
            (PhotoRef::Inline(_), PhotoRef::Inline(_) | PhotoRef::Empty) => {
                Ok(Representation::Inline)
            }
            (PhotoRef::Referenced(_), PhotoRef::Referenced(_) | PhotoRef::Empty) => {
                Ok(Representation::Referenced)
            }
            _ => Err(Staleness::MixedRepresentation),
        }
    }

    /// Returns true if the image is stored inline.
    pub fn is_inline(&self) -> bool {
        self.storage().is_inline()
    }

    /// Check whether this record can still be rendered in `environment`.
    pub fn validate(&self, environment: Environment) -> Result<(), Staleness> {
        match self.representation()? {
            Representation::Inline => Ok(()),
            Representation::Referenced => {
                if let Some(reason) = self.storage().staleness() {
                    return Err(reason);
                }
                if let Some(reason) = self.display().staleness() {
                    return Err(reason);
                }
                if environment == Environment::HostedWeb {
                    return Err(Staleness::ForeignEnvironment);
                }
                Ok(())
            }
        }
    }
}

/// Older builds wrote `null` for a caption that was never set.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Trim a caption and clamp it to [`MAX_TITLE_CHARS`].
pub fn normalize_title(title: &str) -> String {
    clamp_title(title.trim())
}

/// Clamp a caption to [`MAX_TITLE_CHARS`] without trimming.
pub fn clamp_title(title: &str) -> String {
    title.chars().take(MAX_TITLE_CHARS).collect()
}
