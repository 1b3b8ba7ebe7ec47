//! Bookmark list parser
//!
//! Reads the line-oriented `<level> <title> <page>` format into flat records
//! carrying zero-based page indices.

pub mod bookmark_file;

pub use self::bookmark_file::{
    parse_bookmark_file, parse_bookmark_text, FlatRecord, MalformedLine, ParsedBookmarks,
};
