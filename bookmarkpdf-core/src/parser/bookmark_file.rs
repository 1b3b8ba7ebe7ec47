//! Bookmark file parsing
//!
//! Each significant line has the shape `<level> <title> <page>`, where the
//! title may itself contain whitespace. Blank lines and lines starting with
//! `#` are ignored. Lines that do not fit the grammar are reported and
//! skipped; they never abort parsing.

use crate::error::Result;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::path::Path;

lazy_static! {
    static ref RECORD_LINE: Regex =
        Regex::new(r"^([0-9]+)\s+(.+?)\s+([0-9]+)$").expect("record line pattern is valid");
}

/// A single bookmark entry as read from the source list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FlatRecord {
    /// Declared nesting level
    pub level: u32,
    /// Bookmark title
    pub title: String,
    /// Zero-based page index after applying the offset (not range checked)
    pub page: i64,
    /// 1-based line number in the source text
    pub line_number: usize,
}

impl FlatRecord {
    /// Parse one trimmed line. Returns `None` when the line does not match
    /// the record grammar or its numbers do not fit.
    pub fn parse(line: &str, line_number: usize, page_offset: i64) -> Option<Self> {
        let caps = RECORD_LINE.captures(line)?;

        let level = caps[1].parse::<u32>().ok()?;
        let title = caps[2].trim();
        let printed_page = caps[3].parse::<i64>().ok()?;

        if title.is_empty() {
            return None;
        }

        // printed pages are 1-based
        let page = printed_page.checked_add(page_offset)?.checked_sub(1)?;

        Some(Self {
            level,
            title: title.to_string(),
            page,
            line_number,
        })
    }

    /// The page as a 1-based number, for messages
    pub fn display_page(&self) -> i64 {
        self.page.saturating_add(1)
    }
}

/// A line rejected by the parser
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MalformedLine {
    /// 1-based line number
    pub line_number: usize,
    /// The offending line, trimmed
    pub text: String,
}

impl fmt::Display for MalformedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ignoring malformed line {}: {}",
            self.line_number, self.text
        )
    }
}

/// Result of parsing a bookmark list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedBookmarks {
    /// Valid records in input order
    pub records: Vec<FlatRecord>,
    /// Lines that were skipped because they did not parse
    pub malformed: Vec<MalformedLine>,
}

impl ParsedBookmarks {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Parse bookmark text, applying `page_offset` to every printed page number.
pub fn parse_bookmark_text(text: &str, page_offset: i64) -> ParsedBookmarks {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut parsed = ParsedBookmarks::default();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line_number = idx + 1;
        match FlatRecord::parse(line, line_number, page_offset) {
            Some(record) => parsed.records.push(record),
            None => {
                tracing::debug!(line = line_number, "ignoring malformed bookmark line: {}", line);
                parsed.malformed.push(MalformedLine {
                    line_number,
                    text: line.to_string(),
                });
            }
        }
    }

    tracing::debug!(
        records = parsed.records.len(),
        malformed = parsed.malformed.len(),
        page_offset,
        "parsed bookmark list"
    );

    parsed
}

/// Read and parse a UTF-8 bookmark file
pub fn parse_bookmark_file<P: AsRef<Path>>(path: P, page_offset: i64) -> Result<ParsedBookmarks> {
    let text = std::fs::read_to_string(path.as_ref())?;
    Ok(parse_bookmark_text(&text, page_offset))
}
