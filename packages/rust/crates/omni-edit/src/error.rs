//! Error types for structural editing operations.
//!
//! Follows ODF-REP: Library crates use `thiserror` for explicit error enums.

use omni_ast::AstError;
use omni_io::IoError;
use thiserror::Error;

/// Error types for edit operations.
#[derive(Error, Debug)]
pub enum EditError {
    /// File I/O error (reading or writing the target file).
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// The target file is not valid source. Nothing was written.
    #[error("Parse error in {path}: {source}")]
    Parse {
        /// File that failed to parse.
        path: String,
        /// Position and description of the first syntax error.
        source: AstError,
    },

    /// Tree-level failure: a splice was rejected or the grammar failed.
    #[error("AST error: {0}")]
    Ast(#[from] AstError),

    /// A snippet handed to a mutation is not a single valid statement.
    #[error("Invalid snippet `{snippet}`: {message}")]
    InvalidSnippet {
        /// The rejected snippet.
        snippet: String,
        /// Why it was rejected.
        message: String,
    },

    /// A mutation primitive received a node of the wrong kind, or a stale
    /// node. This is a bug in the calling transform, not a data condition.
    #[error("{operation}: expected {expected}, found {found}")]
    ShapeContract {
        /// Primitive that rejected the node.
        operation: &'static str,
        /// Accepted node kinds.
        expected: String,
        /// What was passed in.
        found: String,
    },

    /// Two jobs in one batch target the same file.
    #[error("Duplicate transform target: {0}")]
    DuplicateTarget(String),
}
