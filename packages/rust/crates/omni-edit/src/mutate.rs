//! Node mutation primitives.
//!
//! Each primitive takes a node obtained from the locator and performs one
//! splice. Passing a node of the wrong kind, or one made stale by an earlier
//! mutation, is a contract violation reported as `EditError::ShapeContract`.

use omni_ast::{NodeRef, SourceTree, TsNode, kinds};

use crate::error::EditError;
use crate::types::{Property, Statement, Wrapper};

/// Where a statement goes inside a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Before the first statement.
    Start,
    /// After the last statement.
    End,
}

const INDENT_UNIT: &str = "  ";

/// Insert one statement into a `statement_block`.
///
/// The statement takes the indentation of its neighbour; in an empty block
/// it is indented one level deeper than the block's line.
///
/// # Errors
/// `ShapeContract` if `block` is not a live statement block.
pub fn insert_statement(
    tree: &mut SourceTree,
    block: &NodeRef,
    statement: &Statement,
    position: Position,
) -> Result<(), EditError> {
    let (offset, text) = {
        let node = resolve_kind(tree, block, &[kinds::STATEMENT_BLOCK], "insert_statement")?;
        let source = tree.source();
        let mut cursor = node.walk();
        let members: Vec<TsNode<'_>> = node.named_children(&mut cursor).collect();

        let neighbour = match position {
            Position::Start => members.first(),
            Position::End => members.last(),
        };
        match (neighbour, position) {
            (Some(first), Position::Start) => {
                let indent = line_indent(source, first.start_byte());
                let text = format!("{}\n{indent}", reindent(statement.text(), &indent));
                (first.start_byte(), text)
            }
            (Some(last), Position::End) => {
                let indent = line_indent(source, last.start_byte());
                let text = format!("\n{indent}{}", reindent(statement.text(), &indent));
                (last.end_byte(), text)
            }
            (None, _) => {
                let indent = line_indent(source, node.start_byte());
                let inner = format!("{indent}{INDENT_UNIT}");
                let inline = !block.text().contains('\n');
                let mut text = format!("\n{inner}{}", reindent(statement.text(), &inner));
                if inline {
                    text.push('\n');
                    text.push_str(&indent);
                }
                // Just past the opening brace.
                (node.start_byte() + 1, text)
            }
        }
    };

    tree.insert(offset, &text)?;
    tracing::debug!(kind = statement.kind(), ?position, "inserted statement");
    Ok(())
}

/// Append one property to an object literal.
///
/// Existing keys are not checked: a colliding key yields two properties.
///
/// # Errors
/// `ShapeContract` if `object` is not a live object literal.
pub fn append_property(
    tree: &mut SourceTree,
    object: &NodeRef,
    property: &Property,
) -> Result<(), EditError> {
    let (range, text) = {
        let node = resolve_kind(tree, object, &[kinds::OBJECT], "append_property")?;
        let source = tree.source();
        let multiline = object.text().contains('\n');
        let mut cursor = node.walk();
        let (comments, members): (Vec<TsNode<'_>>, Vec<TsNode<'_>>) = node
            .named_children(&mut cursor)
            .partition(|n| n.kind() == kinds::COMMENT);

        match members.last() {
            Some(last) => {
                let indent = line_indent(source, last.start_byte());
                let rendered = reindent(&property.render(), &indent);
                let (offset, text) = match (multiline, trailing_comma(*last)) {
                    (true, Some(comma_end)) => (comma_end, format!("\n{indent}{rendered},")),
                    (true, None) => (last.end_byte(), format!(",\n{indent}{rendered}")),
                    (false, Some(comma_end)) => (comma_end, format!(" {rendered},")),
                    (false, None) => (last.end_byte(), format!(", {rendered}")),
                };
                (offset..offset, text)
            }
            // Only comments, if anything: insert after the last one.
            None => match (comments.last(), multiline) {
                (Some(comment), true) => {
                    let inner = if comment.start_position().row == node.start_position().row {
                        format!("{}{INDENT_UNIT}", line_indent(source, node.start_byte()))
                    } else {
                        line_indent(source, comment.start_byte())
                    };
                    let rendered = reindent(&property.render(), &inner);
                    let offset = comment.end_byte();
                    (offset..offset, format!("\n{inner}{rendered},"))
                }
                (Some(comment), false) => {
                    let offset = comment.end_byte();
                    (offset..offset, format!(" {}", property.render()))
                }
                (None, true) => {
                    let indent = line_indent(source, node.start_byte());
                    let inner = format!("{indent}{INDENT_UNIT}");
                    let rendered = reindent(&property.render(), &inner);
                    (node.byte_range(), format!("{{\n{inner}{rendered},\n{indent}}}"))
                }
                (None, false) => (node.byte_range(), format!("{{ {} }}", property.render())),
            },
        }
    };

    tree.splice(range, &text)?;
    tracing::debug!(key = property.key(), "appended property");
    Ok(())
}

/// Replace a JSX element with `wrapper` containing the original element.
///
/// # Errors
/// `ShapeContract` if `element` is not a live JSX element.
pub fn wrap_element(
    tree: &mut SourceTree,
    element: &NodeRef,
    wrapper: &Wrapper,
) -> Result<(), EditError> {
    let (range, text) = {
        let node = resolve_kind(
            tree,
            element,
            &[kinds::JSX_ELEMENT, kinds::JSX_SELF_CLOSING_ELEMENT],
            "wrap_element",
        )?;
        let indent = line_indent(tree.source(), node.start_byte());
        let inner = format!("{indent}{INDENT_UNIT}");
        let text = format!(
            "{}\n{inner}{}\n{indent}{}",
            wrapper.opening_tag(),
            reindent(element.text(), INDENT_UNIT),
            wrapper.closing_tag(),
        );
        (node.byte_range(), text)
    };

    tree.splice(range, &text)?;
    tracing::debug!(tag = wrapper.tag(), "wrapped element");
    Ok(())
}

/// Wrap the name exported by `export default` in a call to `callee`.
///
/// `export default App;` becomes `export default callee(App);`. A named
/// default-exported declaration keeps its text verbatim, loses the
/// `export default` prefix, and is followed by `export default callee(App);`.
///
/// # Errors
/// `ShapeContract` if `export` is not a live `export default` statement
/// exporting an identifier or a named function/class.
pub fn wrap_default_export(
    tree: &mut SourceTree,
    export: &NodeRef,
    callee: &str,
) -> Result<(), EditError> {
    const OPERATION: &str = "wrap_default_export";

    let (range, text) = {
        let node = resolve_kind(tree, export, &[kinds::EXPORT_STATEMENT], OPERATION)?;
        let source = tree.source();
        let mut cursor = node.walk();
        let is_default = node
            .children(&mut cursor)
            .any(|c| !c.is_named() && c.kind() == "default");
        if !is_default {
            return Err(contract(OPERATION, "export default", "named export"));
        }

        let exported = node
            .child_by_field_name("value")
            .or_else(|| node.child_by_field_name("declaration"))
            .ok_or_else(|| contract(OPERATION, "exported value", "empty export"))?;

        if exported.kind() == kinds::IDENTIFIER {
            let name = node_text(source, exported);
            (exported.byte_range(), format!("{callee}({name})"))
        } else if let Some(name) = exported.child_by_field_name("name") {
            let declaration = node_text(source, exported);
            let name = node_text(source, name);
            let text = format!("{declaration}\n\nexport default {callee}({name});");
            (node.byte_range(), text)
        } else {
            return Err(contract(
                OPERATION,
                "identifier or named declaration",
                exported.kind(),
            ));
        }
    };

    tree.splice(range, &text)?;
    tracing::debug!(callee, "wrapped default export");
    Ok(())
}

fn resolve_kind<'t>(
    tree: &'t SourceTree,
    node: &NodeRef,
    expected: &[&str],
    operation: &'static str,
) -> Result<TsNode<'t>, EditError> {
    if !expected.contains(&node.kind()) {
        return Err(contract(operation, &expected.join(" | "), node.kind()));
    }
    tree.resolve(node).ok_or_else(|| {
        contract(
            operation,
            &expected.join(" | "),
            &format!("stale {} at byte {}", node.kind(), node.start()),
        )
    })
}

fn contract(operation: &'static str, expected: &str, found: &str) -> EditError {
    EditError::ShapeContract {
        operation,
        expected: expected.to_string(),
        found: found.to_string(),
    }
}

fn node_text<'s>(source: &'s str, node: TsNode<'_>) -> &'s str {
    source.get(node.byte_range()).unwrap_or_default()
}

/// End byte of the `,` following `node`, skipping comments.
fn trailing_comma(node: TsNode<'_>) -> Option<usize> {
    let mut next = node.next_sibling();
    while let Some(sibling) = next {
        match sibling.kind() {
            "," => return Some(sibling.end_byte()),
            kinds::COMMENT => next = sibling.next_sibling(),
            _ => return None,
        }
    }
    None
}

/// Leading whitespace of the line containing `offset`.
fn line_indent(source: &str, offset: usize) -> String {
    let line_start = source[..offset].rfind('\n').map_or(0, |nl| nl + 1);
    source[line_start..]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect()
}

/// Prefix every line after the first with `indent` (blank lines stay blank).
fn reindent(text: &str, indent: &str) -> String {
    let mut lines = text.split('\n');
    let mut out = lines.next().unwrap_or_default().to_string();
    for line in lines {
        out.push('\n');
        if !line.trim().is_empty() {
            out.push_str(indent);
        }
        out.push_str(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_indent() {
        let src = "a\n    b\n\tc";
        assert_eq!(line_indent(src, 0), "");
        assert_eq!(line_indent(src, 6), "    ");
        assert_eq!(line_indent(src, src.len()), "\t");
    }

    #[test]
    fn test_reindent() {
        assert_eq!(reindent("a\nb\n\nc", "  "), "a\n  b\n\n  c");
        assert_eq!(reindent("single", "    "), "single");
    }
}
