//! # bookmarkpdf
//!
//! Turn a plain-text table of contents into a PDF outline (bookmarks).
//!
//! ## Bookmark list format
//!
//! One entry per line: `<level> <title> <page>`. The title may contain
//! spaces; blank lines and lines starting with `#` are ignored.
//!
//! ```text
//! # level title page
//! 1 Chapter 1 Getting Started 1
//! 2 1.1 Installation 2
//! 2 1.2 First Steps 5
//! 1 Chapter 2 Reference 9
//! ```
//!
//! Nesting comes from consecutive levels: a deeper level nests under the
//! previous entry, a shallower one returns to an outer list.
//!
//! Page numbers are the ones printed in the table of contents. When the
//! printed page 1 is not the first physical page, pass the difference as
//! the page offset: printed page 1 on the fifth physical page is an offset
//! of 4. Pages outside the document are reported and clamped to the first
//! or last page.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bookmarkpdf::{add_bookmarks_to_pdf, AddBookmarksOptions, Result};
//!
//! # fn main() -> Result<()> {
//! let options = AddBookmarksOptions::with_page_offset(4);
//! let report = add_bookmarks_to_pdf("book.pdf", "book-bookmarked.pdf", "toc.txt", &options)?;
//!
//! for warning in &report.out_of_range {
//!     println!("{}", warning);
//! }
//! println!("{} bookmarks added", report.attached);
//! # Ok(())
//! # }
//! ```
//!
//! ## Other document models
//!
//! The outline walk only needs an [`OutlineSink`]. [`add_bookmarks`] runs
//! the parse/build/attach pipeline against any implementation; [`PdfDocument`]
//! is the `lopdf`-backed one.

pub mod error;
pub mod operations;
pub mod parser;
pub mod pdf;
pub mod structure;

pub use error::{BookmarkError, Result};
pub use operations::{add_bookmarks, add_bookmarks_to_pdf, AddBookmarksOptions, AddBookmarksReport};
pub use parser::{parse_bookmark_file, parse_bookmark_text, FlatRecord, MalformedLine, ParsedBookmarks};
pub use pdf::PdfDocument;
pub use structure::{
    attach_outline, build_outline_tree, check_page_ranges, clamp_page, OutlineNode, OutlineSink,
    OutlineTree, OutlineTreeBuilder, PageRangeWarning,
};

/// Current version of bookmarkpdf
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
