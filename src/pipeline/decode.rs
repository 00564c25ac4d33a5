//! Image decoding and colour-mode normalisation.
//!
//! Sources arrive in any supported container (JPEG/PNG/GIF/BMP/WebP) and any
//! colour mode. Geometry and encoding both assume 8-bit RGB, so everything
//! is flattened to [`RgbImage`] first. Alpha channels are discarded, not
//! composited; palette images are expanded by the decoder.

use crate::error::ItemError;
use image::{DynamicImage, RgbImage};
use std::path::Path;
use tracing::debug;

/// Decode `path` and normalise to 8-bit RGB.
pub fn load_rgb(path: &Path) -> Result<RgbImage, ItemError> {
    let img = image::open(path).map_err(|e| ItemError::DecodeFailed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "Decoded source image"
    );
    Ok(flatten(img))
}

/// Convert any decoded buffer to `Rgb8`, dropping alpha.
pub fn flatten(img: DynamicImage) -> RgbImage {
    match img {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other => other.to_rgb8(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn rgba_is_flattened_without_compositing() {
        // A fully transparent red pixel keeps its red channel: alpha is
        // dropped, not blended against a background.
        let rgba = RgbaImage::from_pixel(4, 4, Rgba([200, 10, 10, 0]));
        let rgb = flatten(DynamicImage::ImageRgba8(rgba));
        assert_eq!(rgb.get_pixel(0, 0).0, [200, 10, 10]);
    }

    #[test]
    fn rgb_passes_through() {
        let src = RgbImage::from_pixel(2, 2, image::Rgb([1, 2, 3]));
        let out = flatten(DynamicImage::ImageRgb8(src.clone()));
        assert_eq!(out, src);
    }

    #[test]
    fn missing_file_is_a_decode_error() {
        let err = load_rgb(Path::new("/nonexistent/image.png")).unwrap_err();
        assert!(matches!(err, ItemError::DecodeFailed { .. }));
    }
}
