//! Turning user-supplied images into [`ImageData`].
//!
//! The format is sniffed from the content rather than trusted from a file
//! extension, and anything that is not a supported image is rejected before
//! it reaches the provider.

use std::fs;
use std::path::Path;

use image::ImageFormat;
use tracing::info;

use crate::error::{Result, StudioError};
use crate::models::ImageData;
use crate::provider::Provider;

fn mime_for(format: ImageFormat) -> Result<&'static str> {
    match format {
        ImageFormat::Png => Ok("image/png"),
        ImageFormat::Jpeg => Ok("image/jpeg"),
        ImageFormat::WebP => Ok("image/webp"),
        ImageFormat::Gif => Ok("image/gif"),
        other => Err(StudioError::MissingInput(format!(
            "Unsupported image format: {:?}",
            other
        ))),
    }
}

/// Detect the image format of `bytes` and encode them.
pub fn image_from_bytes(bytes: &[u8]) -> Result<ImageData> {
    if bytes.is_empty() {
        return Err(StudioError::MissingInput("The image file is empty.".into()));
    }
    let format = image::guess_format(bytes)?;
    Ok(ImageData::from_raw(mime_for(format)?, bytes))
}

/// Read an image file from disk.
pub fn load_image_file<P: AsRef<Path>>(path: P) -> Result<ImageData> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let image = image_from_bytes(&bytes)?;
    info!(path = %path.display(), mime = %image.mime_type, "loaded image");
    Ok(image)
}

/// Fetch an image from a public URL.
///
/// The sniffed format wins over the server's `Content-Type`, which CDNs
/// frequently get wrong.
pub fn fetch_image(provider: &dyn Provider, url: &str) -> Result<ImageData> {
    let download = provider.fetch(url)?;
    match image_from_bytes(&download.bytes) {
        Ok(image) => Ok(image),
        Err(StudioError::Image(_)) => match download.content_type {
            Some(ct) if ct.starts_with("image/") => Ok(ImageData::from_raw(ct, &download.bytes)),
            _ => Err(StudioError::MissingInput(format!(
                "{} did not return an image",
                url
            ))),
        },
        Err(e) => Err(e),
    }
}
