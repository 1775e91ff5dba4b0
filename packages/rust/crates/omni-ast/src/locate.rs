//! Structural locator.
//!
//! `find` returns every named node matching a shape in pre-order document
//! order. No match is an empty result, never an error.

use tree_sitter::Node;

use crate::item::NodeRef;
use crate::shape::Shape;
use crate::tree::{SourceTree, preorder};

/// All nodes in the file matching `shape`, pre-order.
#[must_use]
pub fn find(tree: &SourceTree, shape: &Shape) -> Vec<NodeRef> {
    collect(tree, tree.ts_root(), shape, true)
}

/// Strict descendants of `scope` matching `shape`, pre-order.
///
/// A stale `scope` yields an empty result.
#[must_use]
pub fn find_within(tree: &SourceTree, scope: &NodeRef, shape: &Shape) -> Vec<NodeRef> {
    match tree.resolve(scope) {
        Some(node) => collect(tree, node, shape, false),
        None => {
            tracing::debug!(kind = scope.kind(), start = scope.start(), "stale scope");
            Vec::new()
        }
    }
}

fn collect(tree: &SourceTree, start: Node<'_>, shape: &Shape, include_start: bool) -> Vec<NodeRef> {
    let source = tree.source();
    preorder(start)
        .into_iter()
        .skip(usize::from(!include_start))
        .filter(|node| node.is_named() && shape.matches(*node, source))
        .map(|node| NodeRef::new(node, source))
        .collect()
}

/// A chainable set of located nodes, like a query result.
///
/// `tree.select(a).find(b)` yields the `b` nodes nested inside any `a` node,
/// deduplicated and kept in document order.
#[derive(Debug, Clone)]
pub struct Selection<'t> {
    tree: &'t SourceTree,
    nodes: Vec<NodeRef>,
}

impl<'t> Selection<'t> {
    pub(crate) fn new(tree: &'t SourceTree, nodes: Vec<NodeRef>) -> Self {
        Self { tree, nodes }
    }

    /// Narrow to descendants of the current nodes matching `shape`.
    #[must_use]
    pub fn find(self, shape: &Shape) -> Self {
        let mut nodes: Vec<NodeRef> = Vec::new();
        for scope in &self.nodes {
            for node in find_within(self.tree, scope, shape) {
                if !nodes.contains(&node) {
                    nodes.push(node);
                }
            }
        }
        nodes.sort_by_key(|n| (n.start(), std::cmp::Reverse(n.end())));
        Self {
            tree: self.tree,
            nodes,
        }
    }

    /// First node in document order.
    #[must_use]
    pub fn first(self) -> Option<NodeRef> {
        self.nodes.into_iter().next()
    }

    /// Last node in document order.
    #[must_use]
    pub fn last(self) -> Option<NodeRef> {
        self.nodes.into_iter().next_back()
    }

    /// Located nodes.
    #[must_use]
    pub fn nodes(&self) -> &[NodeRef] {
        &self.nodes
    }

    /// Take the located nodes.
    #[must_use]
    pub fn into_nodes(self) -> Vec<NodeRef> {
        self.nodes
    }

    /// Number of located nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
