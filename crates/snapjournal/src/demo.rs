//! Built-in placeholder image used when capture fails.

use snapjournal_core::Result;
use snapjournal_core::traits::{CapturedImage, ImageFormat};
use snapjournal_core::types::InlineImage;

/// A single-pixel PNG.
const DEMO_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// The image recorded in place of a failed capture.
pub fn demo_image() -> Result<CapturedImage> {
    let bytes = InlineImage::from_base64(ImageFormat::Png.mime(), DEMO_PNG_BASE64).decode()?;
    Ok(CapturedImage::new(bytes, ImageFormat::Png))
}
