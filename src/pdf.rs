//! PDF page extraction.
//!
//! Copies an inclusive, 1-based page range from a source document into a new
//! file. The copy is object-level: pages are carried over with their
//! original content streams untouched, so nothing is re-encoded and page
//! order is preserved exactly.
//!
//! Validation happens strictly before any write:
//! * malformed page fields → [`AssetPrepError::InvalidPageNumber`]
//! * well-formed numbers outside `1 ≤ start ≤ end ≤ page count` →
//!   [`AssetPrepError::InvalidRange`]
//!
//! The destination filename's stem is re-normalised and the extension forced
//! to `.pdf`, regardless of what the caller typed. The write itself goes
//! through a temp file in the destination directory plus a rename, so an
//! interrupted extraction never leaves a partial PDF behind.

use crate::error::AssetPrepError;
use crate::fsutil::write_atomic;
use crate::normalize::normalize;
use lopdf::Document;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A validated, inclusive, 1-based page range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    start: u32,
    end: u32,
}

impl PageRange {
    /// Validate `1 ≤ start ≤ end ≤ page_count`.
    pub fn new(start: u32, end: u32, page_count: u32) -> Result<Self, AssetPrepError> {
        if start < 1 || start > end || end > page_count {
            return Err(AssetPrepError::InvalidRange {
                start,
                end,
                total: page_count,
            });
        }
        Ok(PageRange { start, end })
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of pages in the range.
    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    pub fn is_empty(&self) -> bool {
        false // a validated range always contains at least one page
    }

    pub fn contains(&self, page: u32) -> bool {
        page >= self.start && page <= self.end
    }
}

/// Parse a user-typed page field.
///
/// Malformed input (empty, non-numeric, negative) is a distinct error class
/// from an out-of-bounds range, so the caller can report it before a
/// document is even opened.
pub fn parse_page_number(input: &str) -> Result<u32, AssetPrepError> {
    input
        .trim()
        .parse::<u32>()
        .map_err(|_| AssetPrepError::InvalidPageNumber {
            input: input.trim().to_string(),
        })
}

/// Basic facts about a PDF, reported without writing anything.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PdfInfo {
    pub page_count: u32,
    pub version: String,
}

/// Open `path` and report its page count and PDF version.
pub fn inspect(path: &Path) -> Result<PdfInfo, AssetPrepError> {
    let doc = load_document(path)?;
    Ok(PdfInfo {
        page_count: doc.get_pages().len() as u32,
        version: doc.version.clone(),
    })
}

/// Result of a successful extraction.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ExtractReport {
    /// The path actually written (stem normalised, `.pdf` extension).
    pub destination: PathBuf,
    /// Pages copied.
    pub pages_written: u32,
    /// Page count of the source document.
    pub source_pages: u32,
}

/// Extract pages `[start, end]` (inclusive, 1-based) from `source` into a
/// new PDF at `destination`.
///
/// The destination stem is normalised and the extension forced to `.pdf`;
/// the returned report carries the path actually written. On any validation
/// failure no file is created.
pub fn extract_pages(
    source: &Path,
    start: u32,
    end: u32,
    destination: &Path,
) -> Result<ExtractReport, AssetPrepError> {
    let mut doc = load_document(source)?;
    let page_count = doc.get_pages().len() as u32;
    let range = PageRange::new(start, end, page_count)?;
    let dest = normalized_destination(destination);

    debug!(
        source = %source.display(),
        start,
        end,
        page_count,
        "Extracting page range"
    );

    // Whitelist by deletion: drop every page outside the range, walking
    // backwards so page numbers stay valid as the tree shrinks.
    for page in (1..=page_count).rev() {
        if !range.contains(page) {
            doc.delete_pages(&[page]);
        }
    }
    doc.prune_objects();
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| AssetPrepError::OutputWriteFailed {
            path: dest.clone(),
            source: std::io::Error::other(e.to_string()),
        })?;

    write_atomic(&dest, &buffer).map_err(|e| AssetPrepError::OutputWriteFailed {
        path: dest.clone(),
        source: e,
    })?;

    info!(
        "Extracted pages {}–{} of {} to {}",
        start,
        end,
        source.display(),
        dest.display()
    );

    Ok(ExtractReport {
        destination: dest,
        pages_written: range.len(),
        source_pages: page_count,
    })
}

/// Default save-as name for an extraction:
/// `<normalised stem>-pages-<start>-to-<end>.pdf`.
pub fn suggested_filename(source: &Path, start: u32, end: u32) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}-pages-{}-to-{}.pdf", normalize(&stem), start, end)
}

/// Re-normalise the stem of a caller-supplied destination and force the
/// `.pdf` extension.
fn normalized_destination(destination: &Path) -> PathBuf {
    let stem = destination
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!("{}.pdf", normalize(&stem));
    match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(file_name),
        _ => PathBuf::from(file_name),
    }
}

/// Open a PDF with existence, permission, and magic-byte checks so the
/// caller gets a precise error instead of a generic parse failure.
fn load_document(path: &Path) -> Result<Document, AssetPrepError> {
    if !path.exists() {
        return Err(AssetPrepError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    match std::fs::File::open(path) {
        Ok(mut f) => {
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(AssetPrepError::NotAPdf {
                    path: path.to_path_buf(),
                    magic,
                });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(AssetPrepError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(AssetPrepError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    }

    Document::load(path).map_err(|e| AssetPrepError::CorruptPdf {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{content::Content, content::Operation, Dictionary, Object, Stream};

    // Build a minimal N-page PDF in memory.
    fn test_pdf_bytes(num_pages: u32) -> Vec<u8> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let mut page_ids = Vec::new();
        for i in 0..num_pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new(
                        "Td",
                        vec![Object::Integer(100), Object::Integer(700)],
                    ),
                    Operation::new(
                        "Tj",
                        vec![Object::String(
                            format!("Page {}", i + 1).into_bytes(),
                            lopdf::StringFormat::Literal,
                        )],
                    ),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));

            let page = Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Page".to_vec())),
                ("Parent", Object::Reference(pages_id)),
                (
                    "MediaBox",
                    Object::Array(vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(612),
                        Object::Integer(792),
                    ]),
                ),
                ("Contents", Object::Reference(content_id)),
            ]);
            page_ids.push(doc.add_object(page));
        }

        let pages = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", Object::Integer(num_pages as i64)),
            (
                "Kids",
                Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
            ),
        ]);
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]);
        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    fn write_test_pdf(dir: &Path, name: &str, num_pages: u32) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, test_pdf_bytes(num_pages)).unwrap();
        path
    }

    #[test]
    fn range_validation() {
        assert!(PageRange::new(1, 5, 5).is_ok());
        assert!(PageRange::new(2, 2, 5).is_ok());
        assert!(matches!(
            PageRange::new(3, 1, 5),
            Err(AssetPrepError::InvalidRange { start: 3, end: 1, total: 5 })
        ));
        assert!(PageRange::new(0, 2, 5).is_err());
        assert!(PageRange::new(1, 6, 5).is_err());
    }

    #[test]
    fn page_number_parsing() {
        assert_eq!(parse_page_number(" 7 ").unwrap(), 7);
        assert!(matches!(
            parse_page_number("abc"),
            Err(AssetPrepError::InvalidPageNumber { .. })
        ));
        assert!(parse_page_number("").is_err());
        assert!(parse_page_number("-3").is_err());
        assert!(parse_page_number("2.5").is_err());
    }

    #[test]
    fn extracts_middle_range() {
        let dir = tempfile::tempdir().unwrap();
        let src = write_test_pdf(dir.path(), "source.pdf", 5);
        let dest = dir.path().join("out.pdf");

        let report = extract_pages(&src, 2, 4, &dest).unwrap();
        assert_eq!(report.pages_written, 3);
        assert_eq!(report.source_pages, 5);
        assert_eq!(report.destination, dest);

        let out = Document::load(&report.destination).unwrap();
        assert_eq!(out.get_pages().len(), 3);
    }

    #[test]
    fn full_range_preserves_page_count() {
        let dir = tempfile::tempdir().unwrap();
        let src = write_test_pdf(dir.path(), "source.pdf", 4);
        let dest = dir.path().join("copy.pdf");

        let report = extract_pages(&src, 1, 4, &dest).unwrap();
        assert_eq!(report.pages_written, 4);
        let out = Document::load(&report.destination).unwrap();
        assert_eq!(out.get_pages().len(), 4);
    }

    #[test]
    fn invalid_range_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let src = write_test_pdf(dir.path(), "source.pdf", 5);
        let dest = dir.path().join("out.pdf");

        let err = extract_pages(&src, 3, 1, &dest).unwrap_err();
        assert!(matches!(err, AssetPrepError::InvalidRange { .. }));
        assert!(!dest.exists());

        let err = extract_pages(&src, 1, 9, &dest).unwrap_err();
        assert!(matches!(err, AssetPrepError::InvalidRange { .. }));
        assert!(!dest.exists());
    }

    #[test]
    fn destination_stem_is_normalised() {
        let dir = tempfile::tempdir().unwrap();
        let src = write_test_pdf(dir.path(), "source.pdf", 3);
        let typed = dir.path().join("Bericht März FINAL.pdf");

        let report = extract_pages(&src, 1, 2, &typed).unwrap();
        assert_eq!(
            report.destination,
            dir.path().join("bericht-marz-final.pdf")
        );
        assert!(report.destination.exists());
        assert!(!typed.exists());
    }

    #[test]
    fn suggested_name_includes_normalised_stem_and_range() {
        assert_eq!(
            suggested_filename(Path::new("/docs/Bericht März.pdf"), 2, 4),
            "bericht-marz-pages-2-to-4.pdf"
        );
    }

    #[test]
    fn inspect_reports_page_count() {
        let dir = tempfile::tempdir().unwrap();
        let src = write_test_pdf(dir.path(), "source.pdf", 7);
        let info = inspect(&src).unwrap();
        assert_eq!(info.page_count, 7);
        assert_eq!(info.version, "1.7");
    }

    #[test]
    fn non_pdf_input_is_rejected_by_magic_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("fake.pdf");
        std::fs::write(&fake, b"GIF89a not a pdf at all").unwrap();

        let err = inspect(&fake).unwrap_err();
        assert!(matches!(err, AssetPrepError::NotAPdf { .. }));
    }

    #[test]
    fn missing_file_is_reported_as_such() {
        let err = inspect(Path::new("/no/such/file.pdf")).unwrap_err();
        assert!(matches!(err, AssetPrepError::FileNotFound { .. }));
    }
}
