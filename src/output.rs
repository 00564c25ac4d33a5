//! Result types for the image batch pipeline.
//!
//! A batch never aborts on a single bad image; instead every item produces an
//! [`ItemResult`] carrying either the two written paths or an
//! [`ItemError`](crate::error::ItemError). [`BatchStats`] summarises the run
//! for status lines and the CLI's `--json` report.

use crate::error::ItemError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of one image in a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResult {
    /// The source image path.
    pub source: PathBuf,

    /// Path of the written thumbnail variant, if the item succeeded.
    pub thumbnail: Option<PathBuf>,

    /// Path of the written large variant, if the item succeeded.
    pub large: Option<PathBuf>,

    /// The failure, if any. `None` means both variants were written.
    pub error: Option<ItemError>,
}

impl ItemResult {
    /// True when both variants were written.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate statistics for one batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchStats {
    /// Number of images in the batch.
    pub total_items: usize,
    /// Items that produced both variants.
    pub processed_items: usize,
    /// Items that failed.
    pub failed_items: usize,
    /// Wall-clock duration of the whole batch in milliseconds.
    pub total_duration_ms: u64,
}

/// Full result of [`crate::images::process_images`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutput {
    /// Per-item outcomes, in input order.
    pub items: Vec<ItemResult>,
    /// Aggregate statistics.
    pub stats: BatchStats,
}

impl BatchOutput {
    /// Count of successful items.
    pub fn success_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_success()).count()
    }

    /// Iterate over the failures.
    pub fn failures(&self) -> impl Iterator<Item = &ItemResult> {
        self.items.iter().filter(|i| !i.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_item(name: &str) -> ItemResult {
        ItemResult {
            source: PathBuf::from(name),
            thumbnail: Some(PathBuf::from("out/a_thumb.webp")),
            large: Some(PathBuf::from("out/a.webp")),
            error: None,
        }
    }

    fn failed_item(name: &str) -> ItemResult {
        ItemResult {
            source: PathBuf::from(name),
            thumbnail: None,
            large: None,
            error: Some(ItemError::DecodeFailed {
                path: PathBuf::from(name),
                detail: "truncated".into(),
            }),
        }
    }

    #[test]
    fn success_count_and_failures() {
        let out = BatchOutput {
            items: vec![ok_item("a.png"), failed_item("b.png"), ok_item("c.png")],
            stats: BatchStats {
                total_items: 3,
                processed_items: 2,
                failed_items: 1,
                total_duration_ms: 12,
            },
        };
        assert_eq!(out.success_count(), 2);
        assert_eq!(out.failures().count(), 1);
        assert_eq!(out.failures().next().unwrap().source, PathBuf::from("b.png"));
    }

    #[test]
    fn serialises_to_json() {
        let out = BatchOutput {
            items: vec![failed_item("b.png")],
            stats: BatchStats {
                total_items: 1,
                processed_items: 0,
                failed_items: 1,
                total_duration_ms: 3,
            },
        };
        let json = serde_json::to_string(&out).unwrap();
        assert!(json.contains("\"failed_items\":1"));
        assert!(json.contains("DecodeFailed"));
    }
}
