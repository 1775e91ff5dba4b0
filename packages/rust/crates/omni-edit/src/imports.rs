//! Import inserter.
//!
//! New imports go right after the last existing import, or at the very top
//! of the file (below a `#!` line) when there is none. Existing imports are never reordered or
//! deduplicated: edits are purely additive.

use omni_ast::{Shape, SourceTree, kinds};

use crate::error::EditError;
use crate::types::Statement;

/// Insert `statements` in order, in one splice.
///
/// # Errors
/// `EditError::Ast` if the resulting source does not parse.
pub fn insert_imports(tree: &mut SourceTree, statements: &[Statement]) -> Result<(), EditError> {
    if statements.is_empty() {
        return Ok(());
    }

    match tree.select(&Shape::of(kinds::IMPORT_STATEMENT)).last() {
        Some(last) => {
            let text: String = statements.iter().map(|s| format!("\n{}", s.text())).collect();
            tree.insert(last.end(), &text)?;
        }
        None => match hash_bang_end(tree) {
            Some(end) => {
                let text: String = statements.iter().map(|s| format!("\n{}", s.text())).collect();
                tree.insert(end, &text)?;
            }
            None => {
                let text: String = statements.iter().map(|s| format!("{}\n", s.text())).collect();
                tree.insert(0, &text)?;
            }
        },
    }

    tracing::debug!(count = statements.len(), "inserted imports");
    Ok(())
}

fn hash_bang_end(tree: &SourceTree) -> Option<usize> {
    let root = tree.resolve(&tree.root())?;
    root.child(0)
        .filter(|first| first.kind() == kinds::HASH_BANG_LINE)
        .map(|first| first.end_byte())
}

#[cfg(test)]
mod tests {
    use super::*;
    use omni_ast::Lang;

    #[test]
    fn test_insert_into_empty_file() {
        let mut tree = SourceTree::parse("", Lang::TypeScript).unwrap();
        let stmt = Statement::parse("import { a } from \"a\";").unwrap();
        insert_imports(&mut tree, &[stmt]).unwrap();
        assert_eq!(tree.source(), "import { a } from \"a\";\n");
    }

    #[test]
    fn test_no_statements_is_noop() {
        let mut tree = SourceTree::parse("const a = 1;\n", Lang::TypeScript).unwrap();
        insert_imports(&mut tree, &[]).unwrap();
        assert_eq!(tree.source(), "const a = 1;\n");
    }
}
