//! Module transform registry: the per-module edits to shared files.
//!
//! Every function here is a `(tree) -> Result` built from the locator, the
//! import inserter and the mutation primitives. A construct that is not found
//! is skipped silently; only a primitive handed the wrong node fails.

pub(crate) mod app;
pub(crate) mod context;
pub(crate) mod next_auth;
pub(crate) mod router;

use omni_ast::{NodeRef, Shape, SourceTree, kinds};
use omni_edit::EditError;

/// Signature shared by every registered transform.
pub type TransformFn = fn(&mut SourceTree) -> Result<(), EditError>;

/// Application entry point.
pub const APP_FILE: &str = "src/pages/_app.tsx";
/// RPC request context.
pub const CONTEXT_FILE: &str = "src/server/trpc/context.ts";
/// Root RPC router.
pub const INDEX_ROUTER_FILE: &str = "src/server/trpc/router/index.ts";
/// Example RPC router.
pub const EXAMPLE_ROUTER_FILE: &str = "src/server/trpc/router/example.ts";
/// Authentication API handler.
pub const NEXT_AUTH_HANDLER_FILE: &str = "src/pages/api/auth/[...nextauth].ts";

/// First object literal under the variable declarator `name`.
fn object_of(tree: &SourceTree, name: &str) -> Option<NodeRef> {
    tree.select(&Shape::declarator(name))
        .find(&Shape::of(kinds::OBJECT))
        .first()
}

/// The object literal returned from the body of `name`.
fn returned_object(tree: &SourceTree, name: &str) -> Option<NodeRef> {
    tree.select(&Shape::declarator(name))
        .find(&Shape::of(kinds::RETURN_STATEMENT))
        .find(&Shape::of(kinds::OBJECT))
        .first()
}

fn skipped(what: &str) {
    tracing::debug!(target = what, "construct not found; skipping");
}
