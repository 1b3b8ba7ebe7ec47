//! Document outline structures

pub mod attach;
pub mod outline;

pub use attach::{attach_outline, check_page_ranges, clamp_page, OutlineSink, PageRangeWarning};
pub use outline::{build_outline_tree, OutlineNode, OutlineTree, OutlineTreeBuilder};
