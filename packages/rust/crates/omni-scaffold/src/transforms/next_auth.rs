//! `src/pages/api/auth/[...nextauth].ts` edits.

use omni_ast::SourceTree;
use omni_edit::{EditError, Property, Statement, append_property, insert_imports};

use super::{object_of, skipped};

/// Persist sessions through the Prisma adapter.
pub(crate) fn prisma_adapter(tree: &mut SourceTree) -> Result<(), EditError> {
    insert_imports(
        tree,
        &[
            Statement::parse(r#"import { PrismaAdapter } from "@next-auth/prisma-adapter";"#)?
                .with_comment("Prisma adapter for NextAuth, optional and can be removed"),
            Statement::parse(r#"import { prisma } from "../../../server/db/client";"#)?,
        ],
    )?;

    match object_of(tree, "authOptions") {
        Some(object) => append_property(
            tree,
            &object,
            &Property::new("adapter", "PrismaAdapter(prisma)"),
        ),
        None => {
            skipped("authOptions");
            Ok(())
        }
    }
}
