//! Positional node snapshots.

use std::ops::Range;

use serde::Serialize;
use tree_sitter::Node;

/// A located node: kind, byte range and text at the time it was found.
///
/// Identity is positional. Any mutation of the tree may invalidate a
/// `NodeRef`; resolving a stale one yields `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeRef {
    kind: &'static str,
    start: usize,
    end: usize,
    text: String,
}

impl NodeRef {
    pub(crate) fn new(node: Node<'_>, source: &str) -> Self {
        let range = node.byte_range();
        Self {
            kind: node.kind(),
            text: source.get(range.clone()).unwrap_or_default().to_string(),
            start: range.start,
            end: range.end,
        }
    }

    /// Grammar kind, e.g. `variable_declarator`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Byte range in the source.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Start byte.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// End byte (exclusive).
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Source text of the node.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}
