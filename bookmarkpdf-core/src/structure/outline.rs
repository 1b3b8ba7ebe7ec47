//! Outline tree reconstruction
//!
//! Rebuilds bookmark nesting from a flat list of leveled records. Only the
//! difference between consecutive levels matters: a higher level opens the
//! previous entry as a parent, a lower level closes parents, an equal level
//! adds a sibling.

use crate::parser::FlatRecord;

/// Outline item (bookmark)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OutlineNode {
    /// Item title
    pub title: String,
    /// Zero-based target page, not yet clamped to the document
    pub page: i64,
    /// Child items
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Create new leaf item
    pub fn new(title: impl Into<String>, page: i64) -> Self {
        Self {
            title: title.into(),
            page,
            children: Vec::new(),
        }
    }

    /// Add child item
    pub fn add_child(&mut self, child: OutlineNode) {
        self.children.push(child);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Count total items in subtree
    pub fn count_all(&self) -> usize {
        1 + self.children.iter().map(OutlineNode::count_all).sum::<usize>()
    }

    /// Depth of the subtree, a leaf being 1
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(OutlineNode::depth).max().unwrap_or(0)
    }
}

/// Ordered forest of outline items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct OutlineTree {
    /// Root items
    pub items: Vec<OutlineNode>,
}

impl OutlineTree {
    /// Create new outline tree
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get total item count
    pub fn total_count(&self) -> usize {
        self.items.iter().map(OutlineNode::count_all).sum()
    }

    /// Deepest nesting in the forest
    pub fn depth(&self) -> usize {
        self.items.iter().map(OutlineNode::depth).max().unwrap_or(0)
    }

    /// Visit every node in pre-order along with its nesting depth (roots are 0)
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(&OutlineNode, usize),
    {
        fn walk_nodes<F>(nodes: &[OutlineNode], depth: usize, visit: &mut F)
        where
            F: FnMut(&OutlineNode, usize),
        {
            for node in nodes {
                visit(node, depth);
                walk_nodes(&node.children, depth + 1, visit);
            }
        }

        walk_nodes(&self.items, 0, &mut visit);
    }
}

/// Builder that reconstructs nesting from consecutive levels.
///
/// Open parents are held by value on a stack. Entries are appended to the
/// children of the innermost open parent, or to the root list when nothing
/// is open. Closing a parent moves it back to the end of the list it was
/// taken from.
#[derive(Debug, Default)]
pub struct OutlineTreeBuilder {
    /// Current outline tree
    tree: OutlineTree,
    /// Stack of open parents
    stack: Vec<OutlineNode>,
    /// Level of the last pushed entry
    previous_level: u32,
}

impl OutlineTreeBuilder {
    /// Create new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry at `level`, opening or closing parents as needed
    pub fn push(&mut self, level: u32, title: impl Into<String>, page: i64) {
        if level > self.previous_level {
            self.descend();
        } else if level < self.previous_level {
            self.ascend(self.previous_level - level);
        }

        self.current_list().push(OutlineNode::new(title, page));
        self.previous_level = level;
    }

    /// Make the last entry of the current list the new parent. With nothing
    /// to descend into the entry simply lands in the current list.
    fn descend(&mut self) {
        if let Some(parent) = self.current_list().pop() {
            self.stack.push(parent);
        }
    }

    /// Close up to `levels` open parents. The root list is never closed.
    fn ascend(&mut self, levels: u32) {
        let open = self.stack.len();
        let levels = levels as usize;
        if levels > open {
            tracing::debug!(
                requested = levels,
                open,
                "level drop exceeds open parents, continuing at root"
            );
        }

        for _ in 0..levels.min(open) {
            self.close_parent();
        }
    }

    fn close_parent(&mut self) {
        if let Some(item) = self.stack.pop() {
            self.current_list().push(item);
        }
    }

    fn current_list(&mut self) -> &mut Vec<OutlineNode> {
        match self.stack.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.tree.items,
        }
    }

    /// Build the outline tree
    pub fn build(mut self) -> OutlineTree {
        while !self.stack.is_empty() {
            self.close_parent();
        }
        self.tree
    }
}

/// Reconstruct the outline forest from records in document order
pub fn build_outline_tree(records: &[FlatRecord]) -> OutlineTree {
    let mut builder = OutlineTreeBuilder::new();
    for record in records {
        builder.push(record.level, record.title.clone(), record.page);
    }

    let tree = builder.build();
    tracing::debug!(
        roots = tree.items.len(),
        total = tree.total_count(),
        depth = tree.depth(),
        "built outline tree"
    );
    tree
}
