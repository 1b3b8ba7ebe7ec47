use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookmarkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Input PDF file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Bookmark file does not exist: {}", .0.display())]
    BookmarkFileNotFound(PathBuf),

    #[error("Bookmark data is empty")]
    NoBookmarks,

    #[error("Document has no pages to attach bookmarks to")]
    EmptyDocument,

    #[error("Page index {0} out of bounds (document has {1} pages)")]
    PageIndexOutOfBounds(usize, usize),

    #[error("Invalid PDF structure: {0}")]
    InvalidStructure(String),
}

pub type Result<T> = std::result::Result<T, BookmarkError>;
