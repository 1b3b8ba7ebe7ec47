//! Attaching an outline tree to a document
//!
//! The document side is abstracted by [`OutlineSink`]: anything that knows
//! its page count and can register an outline entry under an optional
//! parent. The walk is pre-order and hands each created entry down as the
//! parent of its children.

use super::outline::{OutlineNode, OutlineTree};
use crate::error::{BookmarkError, Result};
use crate::parser::FlatRecord;
use std::fmt;

/// Document model that can receive outline entries
pub trait OutlineSink {
    /// Handle to an attached entry, used as the parent of nested entries
    type Handle: Copy;

    /// Number of pages in the document
    fn page_count(&self) -> usize;

    /// Attach an entry pointing at the zero-based `page_index`
    fn attach_outline_entry(
        &mut self,
        title: &str,
        page_index: usize,
        parent: Option<Self::Handle>,
    ) -> Result<Self::Handle>;
}

/// Clamp a zero-based page into `[0, total_pages - 1]`.
///
/// `total_pages` must be non-zero.
pub fn clamp_page(page: i64, total_pages: usize) -> usize {
    let last = total_pages.saturating_sub(1);
    if page <= 0 {
        0
    } else {
        usize::try_from(page).map_or(last, |page| page.min(last))
    }
}

/// Advisory notice for a bookmark whose page lies outside the document
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PageRangeWarning {
    /// Bookmark title
    pub title: String,
    /// Offending page, 1-based
    pub page: i64,
    /// Pages in the document
    pub total_pages: usize,
}

impl fmt::Display for PageRangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bookmark '{}' page {} is outside the PDF range (1-{})",
            self.title, self.page, self.total_pages
        )
    }
}

/// Report every record whose unclamped page falls outside the document.
///
/// Purely advisory; attachment clamps regardless.
pub fn check_page_ranges(records: &[FlatRecord], total_pages: usize) -> Vec<PageRangeWarning> {
    let total = i64::try_from(total_pages).unwrap_or(i64::MAX);

    records
        .iter()
        .filter(|record| record.page < 0 || record.page >= total)
        .map(|record| {
            let warning = PageRangeWarning {
                title: record.title.clone(),
                page: record.display_page(),
                total_pages,
            };
            tracing::debug!("{}", warning);
            warning
        })
        .collect()
}

/// Attach the whole tree to `sink`, returning the number of entries created
pub fn attach_outline<S: OutlineSink>(sink: &mut S, tree: &OutlineTree) -> Result<usize> {
    let total_pages = sink.page_count();
    if total_pages == 0 {
        return Err(BookmarkError::EmptyDocument);
    }

    attach_nodes(sink, &tree.items, None, total_pages)
}

fn attach_nodes<S: OutlineSink>(
    sink: &mut S,
    nodes: &[OutlineNode],
    parent: Option<S::Handle>,
    total_pages: usize,
) -> Result<usize> {
    let mut attached = 0;

    for node in nodes {
        let page_index = clamp_page(node.page, total_pages);
        let handle = sink.attach_outline_entry(&node.title, page_index, parent)?;
        attached += 1;

        if !node.is_leaf() {
            attached += attach_nodes(sink, &node.children, Some(handle), total_pages)?;
        }
    }

    Ok(attached)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::outline::build_outline_tree;
    use pretty_assertions::assert_eq;

    /// Sink that records attachments as (title, page, parent index)
    struct RecordingSink {
        pages: usize,
        entries: Vec<(String, usize, Option<usize>)>,
    }

    impl RecordingSink {
        fn new(pages: usize) -> Self {
            Self {
                pages,
                entries: Vec::new(),
            }
        }
    }

    impl OutlineSink for RecordingSink {
        type Handle = usize;

        fn page_count(&self) -> usize {
            self.pages
        }

        fn attach_outline_entry(
            &mut self,
            title: &str,
            page_index: usize,
            parent: Option<usize>,
        ) -> Result<usize> {
            self.entries.push((title.to_string(), page_index, parent));
            Ok(self.entries.len() - 1)
        }
    }

    fn record(level: u32, title: &str, page: i64) -> FlatRecord {
        FlatRecord {
            level,
            title: title.to_string(),
            page,
            line_number: 0,
        }
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(-1, 10), 0);
        assert_eq!(clamp_page(i64::MIN, 10), 0);
        assert_eq!(clamp_page(0, 10), 0);
        assert_eq!(clamp_page(9, 10), 9);
        assert_eq!(clamp_page(10, 10), 9);
        assert_eq!(clamp_page(i64::MAX, 10), 9);
        assert_eq!(clamp_page(3, 1), 0);
    }

    #[test]
    fn test_attach_pre_order_with_parents() {
        let records = vec![
            record(1, "A", 0),
            record(2, "B", 1),
            record(3, "C", 2),
            record(2, "D", 3),
            record(1, "E", 4),
        ];
        let tree = build_outline_tree(&records);
        let mut sink = RecordingSink::new(10);

        let attached = attach_outline(&mut sink, &tree).unwrap();

        assert_eq!(attached, 5);
        assert_eq!(
            sink.entries,
            vec![
                ("A".to_string(), 0, None),
                ("B".to_string(), 1, Some(0)),
                ("C".to_string(), 2, Some(1)),
                ("D".to_string(), 3, Some(0)),
                ("E".to_string(), 4, None),
            ]
        );
    }

    #[test]
    fn test_attach_clamps_out_of_range_pages() {
        let records = vec![record(1, "Before", -1), record(1, "After", 12)];
        let tree = build_outline_tree(&records);
        let mut sink = RecordingSink::new(5);

        attach_outline(&mut sink, &tree).unwrap();

        assert_eq!(
            sink.entries,
            vec![("Before".to_string(), 0, None), ("After".to_string(), 4, None)]
        );
    }

    #[test]
    fn test_attach_to_empty_document_fails() {
        let tree = build_outline_tree(&[record(1, "A", 0)]);
        let mut sink = RecordingSink::new(0);

        let result = attach_outline(&mut sink, &tree);
        assert!(matches!(result, Err(BookmarkError::EmptyDocument)));
        assert!(sink.entries.is_empty());
    }

    #[test]
    fn test_check_page_ranges() {
        let records = vec![
            record(1, "Cover", -1),
            record(1, "Body", 3),
            record(1, "Last", 4),
            record(1, "Beyond", 5),
        ];

        let warnings = check_page_ranges(&records, 5);

        assert_eq!(
            warnings,
            vec![
                PageRangeWarning {
                    title: "Cover".to_string(),
                    page: 0,
                    total_pages: 5,
                },
                PageRangeWarning {
                    title: "Beyond".to_string(),
                    page: 6,
                    total_pages: 5,
                },
            ]
        );
    }

    #[test]
    fn test_page_range_warning_display() {
        let warning = PageRangeWarning {
            title: "Appendix".to_string(),
            page: 42,
            total_pages: 30,
        };
        assert_eq!(
            warning.to_string(),
            "bookmark 'Appendix' page 42 is outside the PDF range (1-30)"
        );
    }
}
