//! Node kind names of the tree-sitter TypeScript/TSX grammars.
//!
//! Shapes refer to kinds by these names.

/// Root node of every file.
pub const PROGRAM: &str = "program";
/// `import ... from "..."`.
pub const IMPORT_STATEMENT: &str = "import_statement";
/// `export ...`, including `export default ...`.
pub const EXPORT_STATEMENT: &str = "export_statement";
/// `name = value` inside a `const`/`let`/`var` declaration.
pub const VARIABLE_DECLARATOR: &str = "variable_declarator";
/// `{ ... }` statement block.
pub const STATEMENT_BLOCK: &str = "statement_block";
/// `return ...;`.
pub const RETURN_STATEMENT: &str = "return_statement";
/// Object literal.
pub const OBJECT: &str = "object";
/// `key: value` object member.
pub const PAIR: &str = "pair";
/// `{ key }` object member.
pub const SHORTHAND_PROPERTY: &str = "shorthand_property_identifier";
/// Identifier.
pub const IDENTIFIER: &str = "identifier";
/// Line or block comment.
pub const COMMENT: &str = "comment";
/// `<Tag ...>...</Tag>`.
pub const JSX_ELEMENT: &str = "jsx_element";
/// `<Tag ... />`.
pub const JSX_SELF_CLOSING_ELEMENT: &str = "jsx_self_closing_element";
/// Opening tag of a [`JSX_ELEMENT`].
pub const JSX_OPENING_ELEMENT: &str = "jsx_opening_element";
/// `function name() {}`.
pub const FUNCTION_DECLARATION: &str = "function_declaration";
/// `class Name {}`.
pub const CLASS_DECLARATION: &str = "class_declaration";
/// `#!/usr/bin/env node` on the first line.
pub const HASH_BANG_LINE: &str = "hash_bang_line";
