//! Share and clipboard traits.

use std::fmt;

use async_trait::async_trait;

use crate::Result;

/// What a share carries.
#[derive(Clone, PartialEq, Eq)]
pub enum SharePayload {
    /// The image itself as an attachment.
    File {
        name: String,
        mime: String,
        bytes: Vec<u8>,
    },
    /// A URL pointing at the image.
    Url(String),
}

impl fmt::Debug for SharePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SharePayload::File { name, mime, bytes } => f
                .debug_struct("File")
                .field("name", name)
                .field("mime", mime)
                .field("len", &bytes.len())
                .finish(),
            SharePayload::Url(url) => f.debug_tuple("Url").field(url).finish(),
        }
    }
}

/// A request to the platform share sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    /// Subject line.
    pub title: String,
    /// Body text.
    pub text: String,
    pub payload: SharePayload,
}

/// Platform share sheet.
#[async_trait]
pub trait ShareService: Send + Sync {
    /// Returns true if the platform can share at all.
    fn can_share(&self) -> bool;

    /// Present the share sheet.
    async fn share(&self, request: ShareRequest) -> Result<()>;
}

/// System clipboard.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<()>;
}
