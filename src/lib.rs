//! # assetprep
//!
//! Batch-prepare web image assets and extract PDF page ranges, with
//! normalised filenames throughout.
//!
//! Two independent pipelines share one normalisation utility:
//!
//! * **Image transform**: each source image yields two WebP derivatives, a
//!   centred 556×400 crop (`<name>_thumb.webp`) and a 575-wide proportional
//!   scale (`<name>.webp`), both lossy quality 85.
//! * **PDF page extraction**: an inclusive 1-based page range is copied
//!   into a new document without re-encoding page content.
//!
//! ## Pipeline Overview
//!
//! ```text
//! images
//!  │
//!  ├─ 1. Decode    open + flatten to 8-bit RGB (alpha dropped)
//!  ├─ 2. Geometry  centred crop box / proportional scale (pure math)
//!  ├─ 3. Resample  Lanczos3 to the exact output size
//!  ├─ 4. Encode    lossy WebP
//!  └─ 5. Write     temp file + rename, named via normalize()
//!
//! pdf
//!  │
//!  ├─ 1. Validate  page fields well-formed, 1 ≤ start ≤ end ≤ page count
//!  ├─ 2. Copy      drop pages outside the range, prune orphaned objects
//!  └─ 3. Write     temp file + rename, stem normalised, extension .pdf
//! ```
//!
//! Execution is strictly synchronous and single-threaded: items are
//! processed in order, and each item's write completes before the next item
//! starts. One failing image never aborts a batch: its error is recorded in
//! the per-item result and iteration continues.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use assetprep::{process_images, BatchConfig};
//! use std::path::PathBuf;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BatchConfig::builder("out/assets").build()?;
//!     let batch = process_images(&[PathBuf::from("hero.jpg")], &config)?;
//!     println!("{} of {} images processed",
//!         batch.stats.processed_items, batch.stats.total_items);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `assetprep` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! assetprep = { version = "0.4", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
mod fsutil;
pub mod images;
pub mod normalize;
pub mod output;
pub mod pdf;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{BatchConfig, BatchConfigBuilder};
pub use error::{AssetPrepError, ItemError};
pub use images::process_images;
pub use normalize::{normalize, output_basename};
pub use output::{BatchOutput, BatchStats, ItemResult};
pub use pdf::{
    extract_pages, inspect, parse_page_number, suggested_filename, ExtractReport, PageRange,
    PdfInfo,
};
pub use progress::{BatchProgressCallback, NoopProgressCallback, ProgressCallback};
