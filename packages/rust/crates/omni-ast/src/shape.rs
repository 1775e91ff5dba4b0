//! Shape predicates: declarative node matchers.
//!
//! A shape names a node kind plus constraints on the node's fields, text or
//! anonymous tokens. Matching is exact on every part; whitespace and
//! comments between tokens never matter because matching runs on the tree.

use serde::{Deserialize, Serialize};
use tree_sitter::Node;

use crate::kinds;

/// One attribute constraint of a [`Shape`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    /// The child in grammar field `name` exists and matches `shape`.
    Field {
        /// Grammar field name, e.g. `name` or `open_tag`.
        name: String,
        /// Shape the field child must match.
        shape: Box<Shape>,
    },
    /// The node's source text equals this string.
    Text(String),
    /// The node has a direct anonymous child token of this kind.
    Token(String),
}

impl Constraint {
    fn holds(&self, node: Node<'_>, source: &str) -> bool {
        match self {
            Self::Field { name, shape } => node
                .child_by_field_name(name)
                .is_some_and(|child| shape.matches(child, source)),
            Self::Text(text) => source.get(node.byte_range()) == Some(text.as_str()),
            Self::Token(token) => {
                let mut cursor = node.walk();
                node.children(&mut cursor)
                    .any(|child| !child.is_named() && child.kind() == token)
            }
        }
    }
}

/// Declarative node matcher: kind plus attribute constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    constraints: Vec<Constraint>,
}

impl Shape {
    /// Any node of `kind`.
    #[must_use]
    pub fn of(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            constraints: Vec::new(),
        }
    }

    /// Require field `name` to match `shape`.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, shape: Shape) -> Self {
        self.constraints.push(Constraint::Field {
            name: name.into(),
            shape: Box::new(shape),
        });
        self
    }

    /// Require the node text to equal `text`.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.constraints.push(Constraint::Text(text.into()));
        self
    }

    /// Require a direct anonymous token child of kind `token`.
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.constraints.push(Constraint::Token(token.into()));
        self
    }

    /// An identifier spelled `name`.
    #[must_use]
    pub fn identifier(name: &str) -> Self {
        Self::of(kinds::IDENTIFIER).text(name)
    }

    /// A variable declarator whose name is the identifier `name`.
    #[must_use]
    pub fn declarator(name: &str) -> Self {
        Self::of(kinds::VARIABLE_DECLARATOR).field("name", Self::identifier(name))
    }

    /// `<tag ... />`.
    #[must_use]
    pub fn jsx_self_closing(tag: &str) -> Self {
        Self::of(kinds::JSX_SELF_CLOSING_ELEMENT).field("name", Self::identifier(tag))
    }

    /// `<tag ...>...</tag>`.
    #[must_use]
    pub fn jsx_element(tag: &str) -> Self {
        Self::of(kinds::JSX_ELEMENT).field(
            "open_tag",
            Self::of(kinds::JSX_OPENING_ELEMENT).field("name", Self::identifier(tag)),
        )
    }

    /// `export default ...`.
    #[must_use]
    pub fn default_export() -> Self {
        Self::of(kinds::EXPORT_STATEMENT).token("default")
    }

    /// Kind this shape matches.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Constraints in declaration order.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Whether `node` matches this shape.
    #[must_use]
    pub fn matches(&self, node: Node<'_>, source: &str) -> bool {
        node.kind() == self.kind && self.constraints.iter().all(|c| c.holds(node, source))
    }
}
