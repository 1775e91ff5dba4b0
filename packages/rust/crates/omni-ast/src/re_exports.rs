//! Re-exports from tree-sitter.
//!
//! Mutation code in downstream crates walks resolved nodes directly, so the
//! tree-sitter version is pinned here once for the whole workspace.

pub use tree_sitter::Node as TsNode;
pub use tree_sitter::Point;
