//! Configuration for the image batch pipeline.
//!
//! All batch behaviour is controlled through [`BatchConfig`], built via its
//! [`BatchConfigBuilder`]. Callers set only what they care about and rely on
//! the documented defaults for the rest; `build()` validates the combination.

use crate::error::AssetPrepError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;

/// Configuration for one image batch.
///
/// Built via [`BatchConfig::builder`], which takes the one field with no
/// sensible default: the output directory.
///
/// # Example
/// ```
/// use assetprep::BatchConfig;
///
/// let config = BatchConfig::builder("out/assets")
///     .prefix("spring-sale")
///     .webp_quality(85.0)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct BatchConfig {
    /// Directory every derived file is written into. Created if missing.
    pub output_dir: PathBuf,

    /// Optional name prefix replacing each source's file stem.
    ///
    /// When set, *every* image in the batch maps to the same pair of output
    /// names, so later items silently overwrite earlier ones. This matches
    /// the tool's contract; the hazard is documented, not auto-fixed.
    pub prefix: Option<String>,

    /// Thumbnail output width in pixels. Default: 556.
    pub thumb_width: u32,

    /// Thumbnail output height in pixels. Default: 400.
    ///
    /// Together with `thumb_width` this fixes the crop aspect ratio
    /// (556:400 = 1.39 by default).
    pub thumb_height: u32,

    /// Width of the uncropped "large" variant in pixels. Default: 575.
    /// Height scales proportionally, rounded to the nearest pixel.
    pub large_width: u32,

    /// Lossy WebP quality, `0 < q ≤ 100`. Default: 85.0.
    pub webp_quality: f32,

    /// Optional per-item progress events. Default: none.
    pub progress_callback: Option<ProgressCallback>,
}

impl fmt::Debug for BatchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchConfig")
            .field("output_dir", &self.output_dir)
            .field("prefix", &self.prefix)
            .field("thumb_width", &self.thumb_width)
            .field("thumb_height", &self.thumb_height)
            .field("large_width", &self.large_width)
            .field("webp_quality", &self.webp_quality)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn BatchProgressCallback>"),
            )
            .finish()
    }
}

impl BatchConfig {
    /// Create a builder writing into `output_dir`.
    pub fn builder(output_dir: impl Into<PathBuf>) -> BatchConfigBuilder {
        BatchConfigBuilder {
            config: BatchConfig {
                output_dir: output_dir.into(),
                prefix: None,
                thumb_width: 556,
                thumb_height: 400,
                large_width: 575,
                webp_quality: 85.0,
                progress_callback: None,
            },
        }
    }
}

/// Builder for [`BatchConfig`].
pub struct BatchConfigBuilder {
    config: BatchConfig,
}

impl BatchConfigBuilder {
    /// Replace each source stem with a fixed prefix. Empty or
    /// whitespace-only values are treated as unset.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        let p = prefix.into();
        let trimmed = p.trim();
        self.config.prefix = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    pub fn thumb_size(mut self, width: u32, height: u32) -> Self {
        self.config.thumb_width = width.max(1);
        self.config.thumb_height = height.max(1);
        self
    }

    pub fn large_width(mut self, width: u32) -> Self {
        self.config.large_width = width.max(1);
        self
    }

    pub fn webp_quality(mut self, quality: f32) -> Self {
        self.config.webp_quality = quality;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<BatchConfig, AssetPrepError> {
        let c = &self.config;
        if !(c.webp_quality > 0.0 && c.webp_quality <= 100.0) {
            return Err(AssetPrepError::InvalidConfig(format!(
                "WebP quality must be in (0, 100], got {}",
                c.webp_quality
            )));
        }
        if c.output_dir.as_os_str().is_empty() {
            return Err(AssetPrepError::InvalidConfig(
                "output directory must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}
