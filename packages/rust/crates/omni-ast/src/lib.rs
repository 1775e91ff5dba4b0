//! omni-ast - Source Trees and Structural Lookup
//!
//! Parses TSX / TypeScript files with tree-sitter and locates nodes by
//! *shape* (node kind plus attribute constraints) instead of by text.
//!
//! ## Architecture
//!
//! ```text
//! omni-ast/src/
//! ├── lib.rs           # Re-exports (entry point)
//! ├── re_exports.rs    # tree-sitter re-exports
//! ├── error.rs         # AstError enum
//! ├── lang.rs          # Lang enum and grammar selection
//! ├── kinds.rs         # Node kind names used by shapes
//! ├── item.rs          # NodeRef (positional node snapshot)
//! ├── tree.rs          # SourceTree (parse / splice / serialize)
//! ├── shape.rs         # Shape predicates
//! └── locate.rs        # Structural locator and selections
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use omni_ast::{Lang, Shape, SourceTree};
//!
//! let tree = SourceTree::parse("export const appRouter = t.router({});", Lang::TypeScript).unwrap();
//! let object = tree
//!     .select(&Shape::declarator("appRouter"))
//!     .find(&Shape::of("object"))
//!     .first();
//! assert_eq!(object.map(|n| n.text().to_string()), Some("{}".to_string()));
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod error;
mod item;
pub mod kinds;
mod lang;
mod locate;
mod re_exports;
mod shape;
mod tree;

// ============================================================================
// Re-exports
// ============================================================================

pub use re_exports::*;

pub use error::AstError;
pub use item::NodeRef;
pub use lang::Lang;
pub use locate::{Selection, find, find_within};
pub use shape::{Constraint, Shape};
pub use tree::SourceTree;
