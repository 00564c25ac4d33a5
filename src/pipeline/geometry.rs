//! Pure crop/scale arithmetic for the two output variants.
//!
//! The thumbnail variant needs an aspect-ratio-preserving centred crop: the
//! longer dimension is cut down so the crop matches the target ratio, then
//! the crop is resampled to the exact target size. The large variant keeps
//! the full frame and scales to a fixed width.
//!
//! All fractional dimensions round to the nearest pixel (`f64::round`) and
//! clamp to at least 1. The rounding rule is fixed here and pinned by tests
//! so output dimensions are reproducible pixel-for-pixel.

/// A crop window inside a source image. `x`/`y` are the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Compute the centred crop of a `width`×`height` image matching the
/// `target_w`:`target_h` aspect ratio.
///
/// Sources wider than the target ratio keep full height and crop width,
/// centred horizontally; everything else (including an exact ratio match)
/// keeps full width and crops height, centred vertically. An exact match
/// yields a full-frame crop.
pub fn centered_crop(width: u32, height: u32, target_w: u32, target_h: u32) -> CropBox {
    let aspect = f64::from(target_w) / f64::from(target_h);
    let w = f64::from(width);
    let h = f64::from(height);

    if w / h > aspect {
        // Wider than the target: crop width to height × aspect.
        let new_w = ((h * aspect).round() as u32).clamp(1, width);
        CropBox {
            x: (width - new_w) / 2,
            y: 0,
            width: new_w,
            height,
        }
    } else {
        // Taller (or exact): crop height to width ÷ aspect.
        let new_h = ((w / aspect).round() as u32).clamp(1, height);
        CropBox {
            x: 0,
            y: (height - new_h) / 2,
            width,
            height: new_h,
        }
    }
}

/// Scale `width`×`height` proportionally to `target_w` wide.
///
/// Returns `(target_w, round(height × target_w / width))`, height at least 1.
pub fn scale_to_width(width: u32, height: u32, target_w: u32) -> (u32, u32) {
    let ratio = f64::from(target_w) / f64::from(width);
    let new_h = (f64::from(height) * ratio).round() as u32;
    (target_w, new_h.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taller_source_crops_height_centred() {
        // 800×600 is 1.333, narrower than 556:400 = 1.39:
        // keep full width, crop height to round(800 / 1.39) = 576,
        // top offset (600 - 576) / 2 = 12.
        let c = centered_crop(800, 600, 556, 400);
        assert_eq!(
            c,
            CropBox {
                x: 0,
                y: 12,
                width: 800,
                height: 576
            }
        );
    }

    #[test]
    fn wider_source_crops_width_centred() {
        // 1200×400 is 3.0, wider than 1.39:
        // keep full height, crop width to round(400 × 1.39) = 556,
        // left offset (1200 - 556) / 2 = 322.
        let c = centered_crop(1200, 400, 556, 400);
        assert_eq!(
            c,
            CropBox {
                x: 322,
                y: 0,
                width: 556,
                height: 400
            }
        );
    }

    #[test]
    fn exact_ratio_is_full_frame() {
        let c = centered_crop(1112, 800, 556, 400);
        assert_eq!(
            c,
            CropBox {
                x: 0,
                y: 0,
                width: 1112,
                height: 800
            }
        );
    }

    #[test]
    fn crop_never_exceeds_source() {
        for (w, h) in [(1, 1), (3, 1000), (1000, 3), (557, 401)] {
            let c = centered_crop(w, h, 556, 400);
            assert!(c.width >= 1 && c.height >= 1);
            assert!(c.x + c.width <= w, "{w}x{h}");
            assert!(c.y + c.height <= h, "{w}x{h}");
        }
    }

    #[test]
    fn scale_rounds_to_nearest() {
        // 500 × 575/1000 = 287.5 → rounds up to 288.
        assert_eq!(scale_to_width(1000, 500, 575), (575, 288));
        // 600 × 575/800 = 431.25 → rounds down to 431.
        assert_eq!(scale_to_width(800, 600, 575), (575, 431));
    }

    #[test]
    fn scale_at_target_width_is_identity() {
        assert_eq!(scale_to_width(575, 287, 575), (575, 287));
    }

    #[test]
    fn scale_preserves_non_zero_height() {
        // Very wide, very short image must not collapse to zero height.
        assert_eq!(scale_to_width(10_000, 1, 575), (575, 1));
    }
}
