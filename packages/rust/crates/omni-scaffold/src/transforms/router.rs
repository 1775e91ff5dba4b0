//! RPC router edits.

use omni_ast::SourceTree;
use omni_edit::{EditError, Property, Statement, append_property, insert_imports};

use super::{object_of, skipped};

/// Mount the auth router on `appRouter`.
pub(crate) fn auth_router(tree: &mut SourceTree) -> Result<(), EditError> {
    insert_imports(
        tree,
        &[Statement::parse(r#"import { authRouter } from "./auth";"#)?],
    )?;
    match object_of(tree, "appRouter") {
        Some(object) => append_property(tree, &object, &Property::new("auth", "authRouter")),
        None => {
            skipped("appRouter");
            Ok(())
        }
    }
}

/// Add a `getAll` procedure reading from the database.
pub(crate) fn example_get_all(tree: &mut SourceTree) -> Result<(), EditError> {
    const GET_ALL: &str = "t.procedure.query(({ ctx }) => {\n  return ctx.prisma.example.findMany();\n})";

    match object_of(tree, "exampleRouter") {
        Some(object) => append_property(tree, &object, &Property::new("getAll", GET_ALL)),
        None => {
            skipped("exampleRouter");
            Ok(())
        }
    }
}
