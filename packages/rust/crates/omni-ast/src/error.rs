//! Error types for parsing and tree edits.

use thiserror::Error;

/// Errors raised while parsing or editing a [`crate::SourceTree`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AstError {
    /// The grammar could not be loaded into the parser.
    #[error("Grammar error: {0}")]
    Grammar(String),

    /// Source text is not valid for the selected grammar.
    #[error("Parse error at {line}:{column}: {message}")]
    Parse {
        /// 1-indexed line of the first syntax error.
        line: usize,
        /// 1-indexed byte column of the first syntax error.
        column: usize,
        /// Short description of the offending node.
        message: String,
    },

    /// Language name or extension not supported.
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// A splice was rejected: out of bounds, not on a char boundary, or it
    /// would leave the tree with syntax errors. The tree is unchanged.
    #[error("Invalid edit at byte {offset}: {message}")]
    InvalidEdit {
        /// Byte offset where the edit starts.
        offset: usize,
        /// Why the edit was rejected.
        message: String,
    },
}
