//! Progress-callback trait for per-item batch events.
//!
//! Inject an [`Arc<dyn BatchProgressCallback>`] via
//! [`crate::config::BatchConfigBuilder::progress_callback`] to receive an
//! event after each image is processed. The batch runs strictly
//! sequentially, so events arrive in item order and `on_item_*` is never
//! called concurrently; the `Send + Sync` bound only lets callers share one
//! callback across invocations.
//!
//! All methods have default no-op implementations so callers only override
//! what they care about.

use std::path::Path;
use std::sync::Arc;

/// Called by the image batch driver as it processes each item.
pub trait BatchProgressCallback: Send + Sync {
    /// Called once before the first item.
    ///
    /// # Arguments
    /// * `total_items`: number of images in the batch
    fn on_batch_start(&self, total_items: usize) {
        let _ = total_items;
    }

    /// Called just before an item is decoded.
    ///
    /// # Arguments
    /// * `item_num`: 1-indexed position in the batch
    /// * `total_items`: number of images in the batch
    /// * `source`: the input image path
    fn on_item_start(&self, item_num: usize, total_items: usize, source: &Path) {
        let _ = (item_num, total_items, source);
    }

    /// Called after both variants of an item were written successfully.
    fn on_item_complete(&self, item_num: usize, total_items: usize, source: &Path) {
        let _ = (item_num, total_items, source);
    }

    /// Called when an item fails; the batch continues with the next item.
    fn on_item_error(&self, item_num: usize, total_items: usize, source: &Path, error: &str) {
        let _ = (item_num, total_items, source, error);
    }

    /// Called once after the last item.
    ///
    /// # Arguments
    /// * `total_items`: number of images in the batch
    /// * `success_count`: items that produced both variants without error
    fn on_batch_complete(&self, total_items: usize, success_count: usize) {
        let _ = (total_items, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl BatchProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::BatchConfig`].
pub type ProgressCallback = Arc<dyn BatchProgressCallback>;
