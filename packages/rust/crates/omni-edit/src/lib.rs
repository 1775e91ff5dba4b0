#![allow(clippy::doc_markdown)]

//! omni-edit - Structural Source Transformation
//!
//! Composable, additive edits over [`omni_ast::SourceTree`]s and the
//! read → parse → mutate → serialize → write pipeline that applies them.
//!
//! # Features
//!
//! - **Import insertion**: after the last import, or at the top of the file
//! - **Node mutation**: statement insertion, object property append,
//!   element wrapping, default-export wrapping
//! - **Transform pipeline**: one parse and one atomic write per file
//! - **Batch apply**: distinct files transformed in parallel (rayon)
//! - **Diff reports**: unified diffs of every change
//!
//! # Architecture (ODF-REP Compliant)
//!
//! ```text
//! omni-edit/src/
//! ├── lib.rs       # Re-exports (this file)
//! ├── error.rs     # EditError enum (thiserror)
//! ├── types.rs     # Statement, Property, Wrapper, options and reports
//! ├── imports.rs   # Import inserter
//! ├── mutate.rs    # Node mutation primitives
//! ├── pipeline.rs  # apply_transform / update_source
//! ├── diff.rs      # Diff generation utilities
//! └── batch.rs     # Parallel per-file transforms (rayon)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use omni_ast::Shape;
//! use omni_edit::{Property, Statement, append_property, apply_transform, insert_imports};
//!
//! apply_transform("src/server/trpc/router/index.ts", |tree| {
//!     insert_imports(tree, &[Statement::parse(r#"import { authRouter } from "./auth";"#)?])?;
//!     if let Some(object) = tree.select(&Shape::declarator("appRouter")).find(&Shape::of("object")).first() {
//!         append_property(tree, &object, &Property::new("auth", "authRouter"))?;
//!     }
//!     Ok(())
//! })?;
//! ```

// ============================================================================
// Module Declarations (ODF-REP: Atomic Structure)
// ============================================================================

mod batch;
pub mod diff;
mod error;
mod imports;
mod mutate;
mod pipeline;
mod types;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use batch::{BoxedTransform, TransformJob, apply_many};
pub use error::EditError;
pub use imports::insert_imports;
pub use mutate::{Position, append_property, insert_statement, wrap_default_export, wrap_element};
pub use pipeline::{apply_transform, apply_transform_with, format_report, update_source};
pub use types::{Property, Statement, TransformOptions, TransformReport, Wrapper};

// Re-export diff utility for external use
pub use diff::generate_unified_diff;
