//! Website preview images from the on-demand screenshot service.
//!
//! The URL is derived deterministically from the audited site. The image is
//! only fetched when a worksheet is exported; it is decoded, scaled down and
//! re-encoded as JPEG so it can be embedded in the PDF.

use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use tracing::{info, warn};

/// Third-party screenshot renderer; the percent-encoded target sits between
/// prefix and suffix.
const SCREENSHOT_TEMPLATE_PREFIX: &str = "https://s0.wp.com/mshots/v1/";
const SCREENSHOT_TEMPLATE_SUFFIX: &str = "?w=1200&h=800";

/// Longest edge of the embedded preview in pixels.
pub const MAX_PREVIEW_DIMENSION: u32 = 1200;

/// Preview image ready for embedding.
#[derive(Debug, Clone)]
pub struct PreviewImage {
    /// JPEG-encoded bytes
    pub jpeg: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Build the screenshot URL for a target site.
pub fn screenshot_url(target: &str) -> String {
    format!(
        "{}{}{}",
        SCREENSHOT_TEMPLATE_PREFIX,
        urlencoding::encode(target.trim()),
        SCREENSHOT_TEMPLATE_SUFFIX
    )
}

/// Fetch and re-encode the preview image.
///
/// Every failure (network, status, decoding) yields `None`: the worksheet
/// is laid out without the image instead of aborting.
pub async fn fetch_preview_image(client: &reqwest::Client, url: &str) -> Option<PreviewImage> {
    let response = match client.get(url).send().await {
        Ok(r) => r,
        Err(e) => {
            warn!("Screenshot request failed for {}: {}", url, e);
            return None;
        }
    };

    if !response.status().is_success() {
        warn!("Screenshot service returned {} for {}", response.status(), url);
        return None;
    }

    let bytes = match response.bytes().await {
        Ok(b) => b,
        Err(e) => {
            warn!("Failed to read screenshot body from {}: {}", url, e);
            return None;
        }
    };

    match prepare_preview(&bytes) {
        Ok(image) => {
            info!(
                "Prepared preview image: {}x{}, {} bytes",
                image.width,
                image.height,
                image.jpeg.len()
            );
            Some(image)
        }
        Err(e) => {
            warn!("Discarding screenshot from {}: {}", url, e);
            None
        }
    }
}

/// Decode arbitrary image bytes, scale down and re-encode as JPEG.
pub fn prepare_preview(image_bytes: &[u8]) -> Result<PreviewImage, String> {
    let img = image::load_from_memory(image_bytes)
        .map_err(|e| format!("Failed to load image: {}", e))?;

    let resized = resize_if_needed(img, MAX_PREVIEW_DIMENSION);
    let jpeg = encode_to_jpeg(&resized)?;

    Ok(PreviewImage {
        jpeg,
        width: resized.width(),
        height: resized.height(),
    })
}

/// Resize image if either dimension exceeds max, maintaining aspect ratio.
fn resize_if_needed(img: DynamicImage, max_dimension: u32) -> DynamicImage {
    let (width, height) = (img.width(), img.height());

    if width <= max_dimension && height <= max_dimension {
        return img;
    }

    let scale = max_dimension as f32 / width.max(height) as f32;
    let new_width = (width as f32 * scale) as u32;
    let new_height = (height as f32 * scale) as u32;

    img.resize(new_width, new_height, image::imageops::FilterType::Lanczos3)
}

/// Encode to JPEG bytes. JPEG has no alpha channel, so flatten to RGB first.
fn encode_to_jpeg(img: &DynamicImage) -> Result<Vec<u8>, String> {
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut buffer = Cursor::new(Vec::new());
    rgb.write_to(&mut buffer, ImageFormat::Jpeg)
        .map_err(|e| format!("Failed to encode image to JPEG: {}", e))?;
    Ok(buffer.into_inner())
}
