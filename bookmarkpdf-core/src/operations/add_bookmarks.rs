//! Adding bookmarks to a PDF
//!
//! Parses a bookmark list, rebuilds its nesting and attaches the outline to
//! a document. Problems with individual lines or pages are collected in the
//! report; only conditions that stop the whole run are errors.

use crate::error::{BookmarkError, Result};
use crate::parser::{parse_bookmark_file, parse_bookmark_text, MalformedLine, ParsedBookmarks};
use crate::pdf::PdfDocument;
use crate::structure::{
    attach_outline, build_outline_tree, check_page_ranges, OutlineSink, OutlineTree,
    PageRangeWarning,
};
use std::path::{Path, PathBuf};

/// Options for adding bookmarks
#[derive(Debug, Clone, Default)]
pub struct AddBookmarksOptions {
    /// Difference between printed and physical page numbers. A printed
    /// page 1 that is physically the fifth page means an offset of 4.
    pub page_offset: i64,
}

impl AddBookmarksOptions {
    pub fn with_page_offset(page_offset: i64) -> Self {
        Self { page_offset }
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct AddBookmarksReport {
    /// The attached outline, pages unclamped
    pub tree: OutlineTree,
    /// Number of outline entries created
    pub attached: usize,
    /// Pages in the target document
    pub total_pages: usize,
    /// Lines skipped by the parser
    pub malformed: Vec<MalformedLine>,
    /// Bookmarks pointing outside the document
    pub out_of_range: Vec<PageRangeWarning>,
    /// Offset that was applied
    pub page_offset: i64,
    /// Written file, if any
    pub output: Option<PathBuf>,
}

/// Attach the bookmarks described by `text` to `sink`.
///
/// Fails with [`BookmarkError::NoBookmarks`] before touching the sink when
/// the text holds no valid record.
pub fn add_bookmarks<S: OutlineSink>(
    sink: &mut S,
    text: &str,
    options: &AddBookmarksOptions,
) -> Result<AddBookmarksReport> {
    let parsed = parse_bookmark_text(text, options.page_offset);
    attach_parsed(sink, parsed, options)
}

fn attach_parsed<S: OutlineSink>(
    sink: &mut S,
    parsed: ParsedBookmarks,
    options: &AddBookmarksOptions,
) -> Result<AddBookmarksReport> {
    if parsed.is_empty() {
        return Err(BookmarkError::NoBookmarks);
    }

    let tree = build_outline_tree(&parsed.records);

    let total_pages = sink.page_count();
    let out_of_range = check_page_ranges(&parsed.records, total_pages);
    let attached = attach_outline(sink, &tree)?;

    tracing::debug!(attached, total_pages, "attached outline");

    Ok(AddBookmarksReport {
        tree,
        attached,
        total_pages,
        malformed: parsed.malformed,
        out_of_range,
        page_offset: options.page_offset,
        output: None,
    })
}

/// Read `input_pdf`, attach the bookmarks from `bookmark_file` and write
/// the result to `output_pdf`.
///
/// Nothing is written when the bookmark list is empty or any step fails
/// before saving.
pub fn add_bookmarks_to_pdf<P, Q, R>(
    input_pdf: P,
    output_pdf: Q,
    bookmark_file: R,
    options: &AddBookmarksOptions,
) -> Result<AddBookmarksReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    let input_pdf = input_pdf.as_ref();
    let output_pdf = output_pdf.as_ref();
    let bookmark_file = bookmark_file.as_ref();

    if !input_pdf.exists() {
        return Err(BookmarkError::InputNotFound(input_pdf.to_path_buf()));
    }
    if !bookmark_file.exists() {
        return Err(BookmarkError::BookmarkFileNotFound(
            bookmark_file.to_path_buf(),
        ));
    }

    // An empty list is rejected before the PDF is loaded
    let parsed = parse_bookmark_file(bookmark_file, options.page_offset)?;
    if parsed.is_empty() {
        return Err(BookmarkError::NoBookmarks);
    }

    let mut document = PdfDocument::open(input_pdf)?;
    let mut report = attach_parsed(&mut document, parsed, options)?;
    document.save(output_pdf)?;

    tracing::info!(
        output = %output_pdf.display(),
        bookmarks = report.attached,
        "bookmarks added"
    );

    report.output = Some(output_pdf.to_path_buf());
    Ok(report)
}

#[cfg(test)]
#[path = "add_bookmarks_tests.rs"]
mod tests;
