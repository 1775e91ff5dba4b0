//! `src/pages/_app.tsx` edits.

use omni_ast::{NodeRef, Shape, SourceTree, kinds};
use omni_edit::{EditError, Statement, Wrapper, insert_imports, wrap_default_export, wrap_element};

use super::skipped;

const PAGE_COMPONENT: &str = "Component";

/// Wrap every rendered `<Component>` in a `SessionProvider`.
pub(crate) fn session_provider(tree: &mut SourceTree) -> Result<(), EditError> {
    insert_imports(
        tree,
        &[Statement::parse(
            r#"import { SessionProvider } from "next-auth/react";"#,
        )?],
    )?;

    let wrapper = Wrapper::new("SessionProvider").attribute("session", "pageProps.session");
    let elements = outermost(
        tree.select(&Shape::jsx_self_closing(PAGE_COMPONENT))
            .into_nodes()
            .into_iter()
            .chain(tree.select(&Shape::jsx_element(PAGE_COMPONENT)).into_nodes())
            .collect(),
    );
    if elements.is_empty() {
        skipped("<Component>");
    }
    // Back to front, so earlier snapshots stay valid.
    for element in elements.iter().rev() {
        wrap_element(tree, element, &wrapper)?;
    }
    Ok(())
}

/// Export the app through `trpc.withTRPC`.
pub(crate) fn with_trpc(tree: &mut SourceTree) -> Result<(), EditError> {
    insert_imports(
        tree,
        &[Statement::parse(r#"import { trpc } from "../utils/trpc";"#)?],
    )?;

    let export = tree
        .select(&Shape::default_export())
        .first()
        .filter(|export| exports_named_app(tree, export));
    match export {
        Some(export) => wrap_default_export(tree, &export, "trpc.withTRPC"),
        None => {
            skipped("export default identifier");
            Ok(())
        }
    }
}

/// `export default App` or `export default function App() {}`; anything
/// else (a call, an anonymous function) has no name to wrap.
fn exports_named_app(tree: &SourceTree, export: &NodeRef) -> bool {
    let Some(node) = tree.resolve(export) else {
        return false;
    };
    if let Some(value) = node.child_by_field_name("value") {
        return value.kind() == kinds::IDENTIFIER;
    }
    node.child_by_field_name("declaration")
        .is_some_and(|declaration| declaration.child_by_field_name("name").is_some())
}

/// Drop nodes nested inside another node of the list; sort by position.
fn outermost(mut nodes: Vec<NodeRef>) -> Vec<NodeRef> {
    nodes.sort_by_key(NodeRef::start);
    let mut kept: Vec<NodeRef> = Vec::new();
    for node in nodes {
        if kept.last().is_some_and(|outer| node.end() <= outer.end()) {
            continue;
        }
        kept.push(node);
    }
    kept
}
