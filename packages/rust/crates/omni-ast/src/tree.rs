//! Source trees: one parsed file, mutated by byte-span splices.
//!
//! Serialization is the current source text, so bytes outside an edited span
//! never change and parse → serialize with no edits is the identity.

use std::fmt;
use std::ops::Range;

use tree_sitter::{InputEdit, Node, Parser, Point, Tree};

use crate::error::AstError;
use crate::item::NodeRef;
use crate::lang::Lang;
use crate::locate::Selection;
use crate::shape::Shape;

/// Parsed representation of one file's source text.
pub struct SourceTree {
    lang: Lang,
    source: String,
    parser: Parser,
    tree: Tree,
}

impl fmt::Debug for SourceTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceTree")
            .field("lang", &self.lang)
            .field("len", &self.source.len())
            .finish_non_exhaustive()
    }
}

impl SourceTree {
    /// Parse source text.
    ///
    /// # Errors
    /// `AstError::Parse` if the text contains any syntax error.
    pub fn parse(source: impl Into<String>, lang: Lang) -> Result<Self, AstError> {
        let source = source.into();
        let mut parser = Parser::new();
        parser
            .set_language(&lang.language())
            .map_err(|e| AstError::Grammar(e.to_string()))?;

        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| AstError::Grammar("parser returned no tree".to_string()))?;

        if let Some(err) = first_syntax_error(tree.root_node()) {
            return Err(parse_error(err, &source));
        }

        Ok(Self {
            lang,
            source,
            parser,
            tree,
        })
    }

    /// Grammar the tree was parsed with.
    #[must_use]
    pub fn lang(&self) -> Lang {
        self.lang
    }

    /// Current source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Serialize the tree back to text.
    #[must_use]
    pub fn into_source(self) -> String {
        self.source
    }

    /// Snapshot of the root node.
    #[must_use]
    pub fn root(&self) -> NodeRef {
        NodeRef::new(self.tree.root_node(), &self.source)
    }

    /// Start a structural query over the whole file.
    #[must_use]
    pub fn select(&self, shape: &Shape) -> Selection<'_> {
        Selection::new(self, crate::locate::find(self, shape))
    }

    /// Resolve a snapshot back to the live tree-sitter node.
    ///
    /// Returns `None` if no node of the same kind spans the same bytes with
    /// the same text, i.e. the snapshot is stale.
    #[must_use]
    pub fn resolve(&self, node: &NodeRef) -> Option<Node<'_>> {
        let range = node.range();
        if self.source.get(range.clone())? != node.text() {
            return None;
        }

        let mut current = self
            .tree
            .root_node()
            .descendant_for_byte_range(range.start, range.end)?;
        loop {
            if current.byte_range() == range && current.kind() == node.kind() {
                return Some(current);
            }
            if current.start_byte() < range.start || current.end_byte() > range.end {
                return None;
            }
            current = current.parent()?;
        }
    }

    /// Replace `range` with `text` and re-parse incrementally.
    ///
    /// # Errors
    /// `AstError::InvalidEdit` if the range is out of bounds, splits a UTF-8
    /// character, or the result has syntax errors. The tree is left untouched.
    pub fn splice(&mut self, range: Range<usize>, text: &str) -> Result<(), AstError> {
        let invalid = |message: &str| AstError::InvalidEdit {
            offset: range.start,
            message: message.to_string(),
        };
        if range.start > range.end || range.end > self.source.len() {
            return Err(invalid("range out of bounds"));
        }
        if !self.source.is_char_boundary(range.start) || !self.source.is_char_boundary(range.end)
        {
            return Err(invalid("range splits a character"));
        }

        let mut source = self.source.clone();
        source.replace_range(range.clone(), text);
        let new_end_byte = range.start + text.len();

        let edit = InputEdit {
            start_byte: range.start,
            old_end_byte: range.end,
            new_end_byte,
            start_position: point_at(&self.source, range.start),
            old_end_position: point_at(&self.source, range.end),
            new_end_position: point_at(&source, new_end_byte),
        };
        let mut old_tree = self.tree.clone();
        old_tree.edit(&edit);

        let tree = self
            .parser
            .parse(&source, Some(&old_tree))
            .ok_or_else(|| invalid("parser returned no tree"))?;
        if let Some(err) = first_syntax_error(tree.root_node()) {
            return Err(invalid(&parse_error(err, &source).to_string()));
        }

        tracing::trace!(
            start = range.start,
            old_end = range.end,
            new_end = new_end_byte,
            "spliced source tree"
        );
        self.source = source;
        self.tree = tree;
        Ok(())
    }

    /// Insert `text` at `offset`.
    ///
    /// # Errors
    /// See [`SourceTree::splice`].
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), AstError> {
        self.splice(offset..offset, text)
    }

    pub(crate) fn ts_root(&self) -> Node<'_> {
        self.tree.root_node()
    }
}

/// All nodes under `start` (inclusive), named and anonymous, in pre-order.
pub(crate) fn preorder(start: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = start.walk();
    let mut nodes = Vec::new();
    loop {
        nodes.push(cursor.node());
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return nodes;
            }
        }
    }
}

fn first_syntax_error(root: Node<'_>) -> Option<Node<'_>> {
    if !root.has_error() {
        return None;
    }
    preorder(root)
        .into_iter()
        .find(|n| n.is_error() || n.is_missing())
        .or(Some(root))
}

fn parse_error(node: Node<'_>, source: &str) -> AstError {
    let position = node.start_position();
    let message = if node.is_missing() {
        format!("missing `{}`", node.kind())
    } else {
        let snippet: String = source
            .get(node.byte_range())
            .unwrap_or_default()
            .chars()
            .take(40)
            .collect();
        format!("unexpected `{snippet}`")
    };
    AstError::Parse {
        line: position.row + 1,
        column: position.column + 1,
        message,
    }
}

fn point_at(source: &str, byte: usize) -> Point {
    let before = &source.as_bytes()[..byte];
    let row = before.iter().filter(|b| **b == b'\n').count();
    let column = before
        .iter()
        .rposition(|b| *b == b'\n')
        .map_or(byte, |nl| byte - nl - 1);
    Point::new(row, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_at() {
        let src = "ab\ncd\n";
        assert_eq!(point_at(src, 0), Point::new(0, 0));
        assert_eq!(point_at(src, 4), Point::new(1, 1));
        assert_eq!(point_at(src, 6), Point::new(2, 0));
    }

    #[test]
    fn test_preorder_visits_parent_before_children() {
        let tree = SourceTree::parse("const a = 1;", Lang::TypeScript).unwrap();
        let kinds: Vec<&str> = preorder(tree.ts_root())
            .into_iter()
            .filter(|n| n.is_named())
            .map(|n| n.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                "program",
                "lexical_declaration",
                "variable_declarator",
                "identifier",
                "number"
            ]
        );
    }

    #[test]
    fn test_failed_splice_leaves_tree_untouched() {
        let mut tree = SourceTree::parse("const a = 1;\n", Lang::TypeScript).unwrap();
        let err = tree.splice(0..5, "cons t").unwrap_err();
        assert!(matches!(err, AstError::InvalidEdit { offset: 0, .. }));
        assert_eq!(tree.source(), "const a = 1;\n");
    }
}
