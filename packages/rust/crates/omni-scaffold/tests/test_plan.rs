//! Composition plan ordering tests.

use omni_scaffold::{
    APP_FILE, CONTEXT_FILE, Catalog, CompositionPlan, EnabledModules, EXAMPLE_ROUTER_FILE,
    INDEX_ROUTER_FILE, Module, NEXT_AUTH_HANDLER_FILE, PrecedenceEntry, PrecedenceTable,
};

fn enabled(list: &str) -> EnabledModules {
    list.parse().unwrap()
}

#[test]
fn test_context_order_ignores_selection_order() {
    let catalog = Catalog::new();
    let a = CompositionPlan::build(&catalog, &enabled("prisma,next-auth,trpc")).unwrap();
    let b = CompositionPlan::build(&catalog, &enabled("trpc,next-auth,prisma")).unwrap();

    assert_eq!(a.names(CONTEXT_FILE), vec!["context-session", "context-prisma"]);
    assert_eq!(a.names(CONTEXT_FILE), b.names(CONTEXT_FILE));
    assert_eq!(a.files().collect::<Vec<_>>(), b.files().collect::<Vec<_>>());
}

#[test]
fn test_order_comes_from_the_table() {
    let mut entries = PrecedenceTable::default().entries().to_vec();
    for entry in &mut entries {
        entry.order.reverse();
    }
    let catalog = Catalog::new().with_precedence(PrecedenceTable::new(entries));
    let plan = CompositionPlan::build(&catalog, &enabled("next-auth,trpc,prisma")).unwrap();

    assert_eq!(plan.names(CONTEXT_FILE), vec!["context-prisma", "context-session"]);
    assert_eq!(plan.names(APP_FILE), vec!["with-trpc", "session-provider"]);
}

#[test]
fn test_full_selection_targets_every_shared_file() {
    let plan =
        CompositionPlan::build(&Catalog::new(), &enabled("next-auth,trpc,tailwind,prisma"))
            .unwrap();

    assert_eq!(
        plan.files().collect::<Vec<_>>(),
        vec![
            APP_FILE,
            NEXT_AUTH_HANDLER_FILE,
            CONTEXT_FILE,
            EXAMPLE_ROUTER_FILE,
            INDEX_ROUTER_FILE,
        ]
    );
    assert_eq!(plan.names(APP_FILE), vec!["session-provider", "with-trpc"]);
}

#[test]
fn test_requirements_gate_transforms() {
    // Without the RPC layer there is no context file to edit.
    let plan = CompositionPlan::build(&Catalog::new(), &enabled("next-auth,prisma")).unwrap();
    assert!(plan.steps(CONTEXT_FILE).is_empty());
    assert_eq!(plan.names(APP_FILE), vec!["session-provider"]);
    assert_eq!(plan.names(NEXT_AUTH_HANDLER_FILE), vec!["prisma-adapter"]);
}

#[test]
fn test_empty_and_styling_only_plans() {
    let catalog = Catalog::new();
    assert!(CompositionPlan::build(&catalog, &EnabledModules::none()).unwrap().is_empty());
    assert!(CompositionPlan::build(&catalog, &enabled("tailwind")).unwrap().is_empty());
}

#[test]
fn test_invalid_table_fails_the_build() {
    let table = PrecedenceTable::new(vec![PrecedenceEntry {
        file: CONTEXT_FILE.to_string(),
        order: vec![Module::NextAuth, Module::Prisma],
    }]);
    let catalog = Catalog::new().with_precedence(table);
    assert!(CompositionPlan::build(&catalog, &enabled("trpc")).is_err());
}

#[test]
fn test_precedence_table_loads_from_yaml() {
    let yaml = "- file: src/server/trpc/context.ts\n  order: [prisma, next-auth]\n";
    let table: PrecedenceTable = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(
        table.order(CONTEXT_FILE),
        Some(&[Module::Prisma, Module::NextAuth][..])
    );
}
