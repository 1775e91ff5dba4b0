//! Core types for structural editing.
//!
//! Mutations take structured inputs rather than raw text: statements are
//! parsed before they are inserted, properties and wrappers render
//! themselves consistently.

use std::path::{Path, PathBuf};

use omni_ast::{Lang, SourceTree, kinds};
use serde::Serialize;

use crate::diff::generate_unified_diff;
use crate::error::EditError;

/// One top-level statement, validated by parsing.
///
/// Leading comments are allowed and travel with the statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    text: String,
    kind: &'static str,
}

impl Statement {
    /// Parse a snippet holding exactly one statement.
    ///
    /// The snippet is accepted if it parses as TSX or, failing that, as
    /// TypeScript (`<T>value` assertions only exist in the latter). The
    /// target tree still rejects a splice its own grammar cannot parse.
    /// Leading blank lines and trailing whitespace are dropped.
    ///
    /// # Errors
    /// `EditError::InvalidSnippet` if the snippet does not parse or holds
    /// zero or several statements.
    pub fn parse(source: &str) -> Result<Self, EditError> {
        Self::parse_for(source, Lang::Tsx).or_else(|tsx| {
            Self::parse_for(source, Lang::TypeScript).map_err(|_| tsx)
        })
    }

    /// Parse a snippet holding exactly one statement in the `lang` grammar.
    ///
    /// # Errors
    /// `EditError::InvalidSnippet` if the snippet does not parse or holds
    /// zero or several statements.
    pub fn parse_for(source: &str, lang: Lang) -> Result<Self, EditError> {
        let text = source.trim_start_matches(['\n', '\r']).trim_end().to_string();

        let tree = SourceTree::parse(text.as_str(), lang)
            .map_err(|e| invalid_snippet(&text, e.to_string()))?;
        let root = tree
            .resolve(&tree.root())
            .ok_or_else(|| invalid_snippet(&text, "no root node"))?;
        let mut cursor = root.walk();
        let statements: Vec<&'static str> = root
            .named_children(&mut cursor)
            .map(|n| n.kind())
            .filter(|kind| *kind != kinds::COMMENT)
            .collect();

        match statements.as_slice() {
            [kind] => {
                let kind = *kind;
                Ok(Self { text, kind })
            }
            [] => Err(invalid_snippet(&text, "no statement")),
            many => Err(invalid_snippet(&text, format!("{} statements", many.len()))),
        }
    }

    /// Prefix the statement with a `//` line comment.
    #[must_use]
    pub fn with_comment(mut self, comment: &str) -> Self {
        self.text = format!("// {comment}\n{}", self.text);
        self
    }

    /// Statement text, comments included.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Grammar kind of the statement, e.g. `import_statement`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

fn invalid_snippet(text: &str, message: impl ToString) -> EditError {
    EditError::InvalidSnippet {
        snippet: text.to_string(),
        message: message.to_string(),
    }
}

/// An object-literal property: `key: value` or shorthand `key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    key: String,
    value: Option<String>,
}

impl Property {
    /// `key: value`.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// Shorthand `{ key }`.
    #[must_use]
    pub fn shorthand(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    /// Property key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Source form of the property.
    #[must_use]
    pub fn render(&self) -> String {
        match &self.value {
            Some(value) => format!("{}: {value}", self.key),
            None => self.key.clone(),
        }
    }
}

/// A JSX element that wraps another: `<Tag attr={expr}>child</Tag>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrapper {
    tag: String,
    attributes: Vec<(String, String)>,
}

impl Wrapper {
    /// Wrapper element with no attributes.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
        }
    }

    /// Add `name={expression}`.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, expression: impl Into<String>) -> Self {
        self.attributes.push((name.into(), expression.into()));
        self
    }

    /// Tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub(crate) fn opening_tag(&self) -> String {
        let mut tag = format!("<{}", self.tag);
        for (name, expression) in &self.attributes {
            tag.push_str(&format!(" {name}={{{expression}}}"));
        }
        tag.push('>');
        tag
    }

    pub(crate) fn closing_tag(&self) -> String {
        format!("</{}>", self.tag)
    }
}

/// Configuration for the transform pipeline.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Maximum file size in bytes (default 1MB).
    pub max_file_size: u64,
    /// Compute the result without writing the file.
    pub dry_run: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            max_file_size: 1024 * 1024, // 1MB
            dry_run: false,
        }
    }
}

/// Outcome of one `apply_transform` call.
#[derive(Debug, Clone, Serialize)]
pub struct TransformReport {
    /// Transformed file.
    pub path: PathBuf,
    /// Whether the content changed.
    pub changed: bool,
    /// Whether the new content was written.
    pub written: bool,
    /// Content before the transform.
    #[serde(skip)]
    pub original: String,
    /// Content after the transform.
    #[serde(skip)]
    pub modified: String,
    /// Unified diff of the change (empty when unchanged).
    pub diff: String,
}

impl TransformReport {
    pub(crate) fn new(path: &Path, original: String, modified: String) -> Self {
        let diff = generate_unified_diff(&path.display().to_string(), &original, &modified);
        Self {
            path: path.to_path_buf(),
            changed: original != modified,
            written: false,
            original,
            modified,
            diff,
        }
    }
}
