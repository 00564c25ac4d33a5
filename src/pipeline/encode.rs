//! Lossy WebP encoding of a finished variant.
//!
//! The `image` crate only writes lossless WebP, so encoding goes through the
//! `webp` crate (libwebp), which takes a raw RGB buffer and a quality factor.

use image::RgbImage;
use tracing::debug;

/// Encode an RGB buffer as lossy WebP at the given quality (0–100).
pub fn encode_webp(img: &RgbImage, quality: f32) -> Vec<u8> {
    let encoder = webp::Encoder::from_rgb(img.as_raw(), img.width(), img.height());
    let bytes = encoder.encode(quality).to_vec();
    debug!(
        width = img.width(),
        height = img.height(),
        quality,
        out_bytes = bytes.len(),
        "Encoded WebP variant"
    );
    bytes
}
