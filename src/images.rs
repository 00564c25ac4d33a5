//! Batch driver for the image transform pipeline.
//!
//! [`process_images`] walks the input list strictly in order, producing two
//! WebP derivatives per source:
//!
//! * **thumbnail**: centred crop to the configured aspect ratio, resampled
//!   to exactly `thumb_width`×`thumb_height`, named `<base>_thumb.webp`;
//! * **large**: the full frame scaled to `large_width` wide, named
//!   `<base>.webp`.
//!
//! `<base>` is the normalised prefix if one is configured, otherwise the
//! normalised source stem. One failing image never aborts the batch: its
//! error is recorded in the item's [`ItemResult`] and iteration continues.
//! Each item's files are fully written before the next item starts.

use crate::config::BatchConfig;
use crate::error::{AssetPrepError, ItemError};
use crate::fsutil::write_atomic;
use crate::normalize::output_basename;
use crate::output::{BatchOutput, BatchStats, ItemResult};
use crate::pipeline::{decode, encode, geometry};
use image::imageops::{self, FilterType};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// Process a batch of images into `config.output_dir`.
///
/// Returns `Ok(BatchOutput)` even if some (or all) items failed; inspect
/// `stats.failed_items` or [`BatchOutput::failures`]. Fatal errors are
/// limited to the output directory being uncreatable.
pub fn process_images(
    paths: &[PathBuf],
    config: &BatchConfig,
) -> Result<BatchOutput, AssetPrepError> {
    let start = Instant::now();
    let total = paths.len();

    std::fs::create_dir_all(&config.output_dir).map_err(|e| AssetPrepError::OutputWriteFailed {
        path: config.output_dir.clone(),
        source: e,
    })?;

    info!("Processing {} images into {}", total, config.output_dir.display());

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(total);
    }

    let mut items = Vec::with_capacity(total);
    for (i, path) in paths.iter().enumerate() {
        let item_num = i + 1;
        if let Some(ref cb) = config.progress_callback {
            cb.on_item_start(item_num, total, path);
        }

        match process_one(path, config) {
            Ok((thumbnail, large)) => {
                if let Some(ref cb) = config.progress_callback {
                    cb.on_item_complete(item_num, total, path);
                }
                items.push(ItemResult {
                    source: path.clone(),
                    thumbnail: Some(thumbnail),
                    large: Some(large),
                    error: None,
                });
            }
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                if let Some(ref cb) = config.progress_callback {
                    cb.on_item_error(item_num, total, path, &e.to_string());
                }
                items.push(ItemResult {
                    source: path.clone(),
                    thumbnail: None,
                    large: None,
                    error: Some(e),
                });
            }
        }
    }

    let processed = items.iter().filter(|i| i.is_success()).count();
    let failed = total - processed;

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(total, processed);
    }

    info!("Batch complete: {}/{} images processed", processed, total);

    Ok(BatchOutput {
        items,
        stats: BatchStats {
            total_items: total,
            processed_items: processed,
            failed_items: failed,
            total_duration_ms: start.elapsed().as_millis() as u64,
        },
    })
}

/// Produce and write both variants for a single source image.
fn process_one(path: &Path, config: &BatchConfig) -> Result<(PathBuf, PathBuf), ItemError> {
    let rgb = decode::load_rgb(path)?;
    let base = base_name(path, config)?;

    // Thumbnail: centred crop to the target ratio, then exact resample.
    let crop = geometry::centered_crop(
        rgb.width(),
        rgb.height(),
        config.thumb_width,
        config.thumb_height,
    );
    let cropped = imageops::crop_imm(&rgb, crop.x, crop.y, crop.width, crop.height).to_image();
    let thumb = imageops::resize(
        &cropped,
        config.thumb_width,
        config.thumb_height,
        FilterType::Lanczos3,
    );
    let thumb_path = config
        .output_dir
        .join(format!("{}.webp", output_basename(&base, "_thumb")));
    write_variant(&thumb_path, &encode::encode_webp(&thumb, config.webp_quality))?;

    // Large: full frame scaled to the target width.
    let (lw, lh) = geometry::scale_to_width(rgb.width(), rgb.height(), config.large_width);
    let large = imageops::resize(&rgb, lw, lh, FilterType::Lanczos3);
    let large_path = config
        .output_dir
        .join(format!("{}.webp", output_basename(&base, "")));
    write_variant(&large_path, &encode::encode_webp(&large, config.webp_quality))?;

    Ok((thumb_path, large_path))
}

/// The un-normalised base name for an item: the configured prefix, or the
/// source's file stem.
fn base_name(path: &Path, config: &BatchConfig) -> Result<String, ItemError> {
    if let Some(ref prefix) = config.prefix {
        return Ok(prefix.clone());
    }
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| ItemError::DecodeFailed {
            path: path.to_path_buf(),
            detail: "path has no file stem".into(),
        })
}

fn write_variant(path: &Path, bytes: &[u8]) -> Result<(), ItemError> {
    write_atomic(path, bytes).map_err(|e| ItemError::WriteFailed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}
