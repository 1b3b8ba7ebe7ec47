//! High-level operations on PDF documents

pub mod add_bookmarks;

pub use add_bookmarks::{
    add_bookmarks, add_bookmarks_to_pdf, AddBookmarksOptions, AddBookmarksReport,
};
