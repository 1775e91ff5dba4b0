//! Error types for scaffolding runs.
//!
//! Follows ODF-REP: Library crates use `thiserror` for explicit error enums.

use omni_edit::EditError;
use omni_io::IoError;
use thiserror::Error;

/// Error types for a generation run.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// A file transform failed (parse error, shape contract, write).
    #[error(transparent)]
    Edit(#[from] EditError),

    /// Staging or reading template files failed.
    #[error(transparent)]
    Io(#[from] IoError),

    /// The package installer reported a failure.
    #[error("Install failed (`{command}`): {message}")]
    Install {
        /// Command line that was run.
        command: String,
        /// Installer output or spawn error.
        message: String,
    },

    /// The file stager reported a failure.
    #[error("Staging failed: {0}")]
    Stage(String),

    /// A settings file could not be read or parsed.
    #[error("Invalid settings in {path}: {message}")]
    Settings {
        /// Settings file.
        path: String,
        /// Read or YAML error.
        message: String,
    },

    /// The module catalog is inconsistent with its precedence table.
    #[error("Invalid module catalog: {0}")]
    Catalog(String),

    /// A module name that is not in the catalog.
    #[error("Unknown module: {0}")]
    UnknownModule(String),

    /// A background task panicked or was cancelled.
    #[error("Task failed: {0}")]
    Task(String),
}
