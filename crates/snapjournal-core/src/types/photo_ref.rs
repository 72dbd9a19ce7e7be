//! Photo reference handles.
//!
//! A photo record points at its image through string handles. Each handle is
//! either an inline `data:` URI carrying the image itself or a reference to
//! an asset the platform stores elsewhere. [`PhotoRef`] is the parsed, tagged
//! form of such a handle; the staleness checks below operate on it rather than
//! on raw substrings.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;
use url::{Host, Url};

use crate::error::{Error, InvalidInputError};

/// Prefix every inline image handle starts with.
pub const INLINE_PREFIX: &str = "data:image/";

const BASE64_MARKER: &str = ";base64,";

/// Path fragment of the document directory used by older platform builds.
const LEGACY_DOCUMENTS_FRAGMENT: &str = "/Documents/";

/// File name prefix of referenced photo assets.
pub const ASSET_FILE_PREFIX: &str = "photo_";

/// An image encoded directly into a `data:` URI.
#[derive(Clone, PartialEq, Eq)]
pub struct InlineImage {
    uri: String,
    payload_start: usize,
}

impl InlineImage {
    /// Parse an inline handle, requiring the image prefix and a base64 payload.
    pub fn parse(s: impl Into<String>) -> Result<Self, Error> {
        let uri = s.into();

        if !uri.starts_with(INLINE_PREFIX) {
            return Err(InvalidInputError::InlineImage {
                reason: format!("must start with '{}'", INLINE_PREFIX),
            }
            .into());
        }

        let marker = uri
            .find(BASE64_MARKER)
            .ok_or_else(|| InvalidInputError::InlineImage {
                reason: "missing ';base64,' marker".to_string(),
            })?;

        Ok(Self {
            payload_start: marker + BASE64_MARKER.len(),
            uri,
        })
    }

    /// Wrap an already base64-encoded payload.
    pub fn from_base64(mime: &str, payload: &str) -> Self {
        let prefix = format!("data:{}{}", mime, BASE64_MARKER);
        Self {
            payload_start: prefix.len(),
            uri: format!("{}{}", prefix, payload),
        }
    }

    /// Encode raw image bytes.
    pub fn encode(mime: &str, bytes: &[u8]) -> Self {
        Self::from_base64(mime, &STANDARD.encode(bytes))
    }

    /// The MIME type, e.g. `image/jpeg`.
    pub fn mime(&self) -> &str {
        let end = self.payload_start - BASE64_MARKER.len();
        &self.uri["data:".len()..end]
    }

    /// The base64 payload.
    pub fn payload(&self) -> &str {
        &self.uri[self.payload_start..]
    }

    /// Decode the payload back to image bytes.
    pub fn decode(&self) -> Result<Vec<u8>, Error> {
        STANDARD.decode(self.payload()).map_err(|e| {
            InvalidInputError::InlineImage {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// The full `data:` URI.
    pub fn as_str(&self) -> &str {
        &self.uri
    }
}

// Payloads run to megabytes; keep them out of logs.
impl fmt::Debug for InlineImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineImage")
            .field("mime", &self.mime())
            .field("payload_len", &self.payload().len())
            .finish()
    }
}

/// A parsed photo handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PhotoRef {
    /// No handle.
    Empty,
    /// Image bytes encoded into the handle itself.
    Inline(InlineImage),
    /// A platform file handle or URI.
    Referenced(String),
}

impl PhotoRef {
    /// Classify a raw handle.
    ///
    /// A handle is inline only if it carries both the image prefix and the
    /// base64 marker; anything else non-empty is a reference.
    pub fn parse(s: &str) -> Self {
        if s.is_empty() {
            return PhotoRef::Empty;
        }

        match InlineImage::parse(s) {
            Ok(image) => PhotoRef::Inline(image),
            Err(_) => PhotoRef::Referenced(s.to_string()),
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, PhotoRef::Inline(_))
    }

    pub fn is_referenced(&self) -> bool {
        matches!(self, PhotoRef::Referenced(_))
    }

    /// Returns the raw handle.
    pub fn as_str(&self) -> &str {
        match self {
            PhotoRef::Empty => "",
            PhotoRef::Inline(image) => image.as_str(),
            PhotoRef::Referenced(handle) => handle,
        }
    }

    /// Run the handle-level staleness checks against a referenced handle.
    ///
    /// Inline and empty handles never go stale on their own.
    pub fn staleness(&self) -> Option<Staleness> {
        match self {
            PhotoRef::Referenced(handle) => referenced_staleness(handle),
            _ => None,
        }
    }
}

impl fmt::Display for PhotoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoRef::Empty => write!(f, "<empty>"),
            PhotoRef::Inline(image) => write!(f, "<inline {}>", image.mime()),
            PhotoRef::Referenced(handle) => write!(f, "{}", handle),
        }
    }
}

/// Why a stored record can no longer be used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Staleness {
    /// `storageRef` is empty.
    EmptyStorage,
    /// One field is inline and the other is a reference.
    MixedRepresentation,
    /// A `file:` URI into a container path that does not survive reinstalls.
    FileScheme,
    /// An `http(s)` URL served from the loopback host of a past session.
    LoopbackUrl,
    /// An absolute path into the old platform document directory.
    LegacyDocumentsPath,
    /// A bare asset file name with no locator.
    BareAssetName,
    /// A referenced asset in an environment with no file system to resolve it.
    ForeignEnvironment,
}

impl Staleness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Staleness::EmptyStorage => "empty_storage",
            Staleness::MixedRepresentation => "mixed_representation",
            Staleness::FileScheme => "file_scheme",
            Staleness::LoopbackUrl => "loopback_url",
            Staleness::LegacyDocumentsPath => "legacy_documents_path",
            Staleness::BareAssetName => "bare_asset_name",
            Staleness::ForeignEnvironment => "foreign_environment",
        }
    }
}

impl fmt::Display for Staleness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn referenced_staleness(handle: &str) -> Option<Staleness> {
    if handle.starts_with("file:") {
        return Some(Staleness::FileScheme);
    }

    match Url::parse(handle) {
        Ok(url) => {
            if is_loopback_http(&url) {
                return Some(Staleness::LoopbackUrl);
            }
        }
        Err(_) => {
            if handle.contains(LEGACY_DOCUMENTS_FRAGMENT) {
                return Some(Staleness::LegacyDocumentsPath);
            }
            if is_asset_file_name(handle) {
                return Some(Staleness::BareAssetName);
            }
        }
    }

    None
}

/// Returns true for `http`/`https` URLs on a loopback host.
pub fn is_loopback_http(url: &Url) -> bool {
    if url.scheme() != "http" && url.scheme() != "https" {
        return false;
    }

    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

/// Returns true if `name` is exactly `photo_<digits>.<ext>`.
pub fn is_asset_file_name(name: &str) -> bool {
    let Some(rest) = name.strip_prefix(ASSET_FILE_PREFIX) else {
        return false;
    };
    let Some((stem, ext)) = rest.split_once('.') else {
        return false;
    };

    !stem.is_empty()
        && stem.chars().all(|c| c.is_ascii_digit())
        && !ext.is_empty()
        && ext.chars().all(|c| c.is_ascii_alphanumeric())
}
