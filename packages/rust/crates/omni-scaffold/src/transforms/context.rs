//! `src/server/trpc/context.ts` edits.

use omni_ast::{Shape, SourceTree, kinds};
use omni_edit::{
    EditError, Position, Property, Statement, append_property, insert_imports, insert_statement,
};

use super::{returned_object, skipped};

const CREATE_CONTEXT: &str = "createContext";

/// Resolve the session up front and expose it on the context.
pub(crate) fn session(tree: &mut SourceTree) -> Result<(), EditError> {
    insert_imports(
        tree,
        &[
            Statement::parse(
                r#"import { unstable_getServerSession as getServerSession } from "next-auth";"#,
            )?,
            Statement::parse(
                r#"import { authOptions as nextAuthOptions } from "../../pages/api/auth/[...nextauth]";"#,
            )?,
        ],
    )?;

    let body = tree
        .select(&Shape::declarator(CREATE_CONTEXT))
        .find(&Shape::of(kinds::STATEMENT_BLOCK))
        .first();
    match body {
        Some(block) => {
            let statement = Statement::parse(
                "const session = await getServerSession(opts.req, opts.res, nextAuthOptions);",
            )?;
            insert_statement(tree, &block, &statement, Position::Start)?;
        }
        None => skipped("createContext body"),
    }

    append_to_context(tree, "session")
}

/// Expose the database client on the context.
pub(crate) fn prisma(tree: &mut SourceTree) -> Result<(), EditError> {
    insert_imports(
        tree,
        &[Statement::parse(r#"import { prisma } from "../db/client";"#)?],
    )?;
    append_to_context(tree, "prisma")
}

fn append_to_context(tree: &mut SourceTree, binding: &str) -> Result<(), EditError> {
    match returned_object(tree, CREATE_CONTEXT) {
        Some(object) => append_property(tree, &object, &Property::shorthand(binding)),
        None => {
            skipped("createContext return object");
            Ok(())
        }
    }
}
