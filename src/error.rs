//! Error types for the assetprep library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`AssetPrepError`] is fatal: the operation cannot proceed at all
//!   (missing file, invalid page range, unwritable output directory).
//!   Returned as `Err(AssetPrepError)` from the top-level entry points.
//!
//! * [`ItemError`] is non-fatal: a single image in a batch failed (decode
//!   error, write error) but the rest of the batch is fine. Stored inside
//!   [`crate::output::ItemResult`] so callers can inspect partial success
//!   rather than losing the whole batch to one bad file.
//!
//! The PDF extractor additionally distinguishes two classes of user-input
//! error: [`AssetPrepError::InvalidPageNumber`] for malformed page fields and
//! [`AssetPrepError::InvalidRange`] for well-formed numbers that violate
//! `1 ≤ start ≤ end ≤ page count`. Both are rejected before any write.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the assetprep library.
///
/// Per-image failures use [`ItemError`] and are stored in
/// [`crate::output::ItemResult`] rather than propagated here.
#[derive(Debug, Error)]
pub enum AssetPrepError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("file is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// PDF structure is corrupt and cannot be parsed.
    #[error("PDF '{path}' could not be parsed: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    // ── User-input errors (PDF extraction) ────────────────────────────────
    /// A page field did not parse as a positive integer.
    #[error("invalid page number: '{input}' is not a positive integer")]
    InvalidPageNumber { input: String },

    /// Page numbers parsed but violate `1 ≤ start ≤ end ≤ page count`.
    #[error("invalid page range {start}–{end}: document has {total} pages")]
    InvalidRange { start: u32, end: u32, total: u32 },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an output file.
    #[error("failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A non-fatal error for a single image in a batch.
///
/// Stored in [`crate::output::ItemResult`] when an item fails. The batch
/// continues with the remaining items.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum ItemError {
    /// The source image could not be opened or decoded.
    #[error("'{path}': decode failed: {detail}")]
    DecodeFailed { path: PathBuf, detail: String },

    /// WebP encoding of a derived variant failed.
    #[error("'{path}': WebP encoding failed: {detail}")]
    EncodeFailed { path: PathBuf, detail: String },

    /// A derived variant could not be written to the output directory.
    #[error("'{path}': write failed: {detail}")]
    WriteFailed { path: PathBuf, detail: String },
}

impl ItemError {
    /// The source path of the item that failed.
    pub fn path(&self) -> &PathBuf {
        match self {
            ItemError::DecodeFailed { path, .. }
            | ItemError::EncodeFailed { path, .. }
            | ItemError::WriteFailed { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_range_display() {
        let e = AssetPrepError::InvalidRange {
            start: 3,
            end: 1,
            total: 10,
        };
        let msg = e.to_string();
        assert!(msg.contains("3"), "got: {msg}");
        assert!(msg.contains("10 pages"), "got: {msg}");
    }

    #[test]
    fn invalid_page_number_display() {
        let e = AssetPrepError::InvalidPageNumber {
            input: "abc".into(),
        };
        assert!(e.to_string().contains("'abc'"));
    }

    #[test]
    fn item_error_carries_path() {
        let e = ItemError::DecodeFailed {
            path: PathBuf::from("/tmp/broken.png"),
            detail: "bad header".into(),
        };
        assert_eq!(e.path(), &PathBuf::from("/tmp/broken.png"));
        assert!(e.to_string().contains("broken.png"));
    }
}
