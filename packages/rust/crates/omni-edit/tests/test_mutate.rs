//! Tests for node mutation primitives.

use omni_ast::{Lang, NodeRef, Shape, SourceTree, kinds};
use omni_edit::{
    EditError, Position, Property, Statement, Wrapper, append_property, insert_statement,
    wrap_default_export, wrap_element,
};

fn first(tree: &SourceTree, shape: &Shape) -> NodeRef {
    tree.select(shape).first().unwrap()
}

fn object_in(tree: &SourceTree, declarator: &str) -> NodeRef {
    tree.select(&Shape::declarator(declarator))
        .find(&Shape::of(kinds::OBJECT))
        .first()
        .unwrap()
}

fn property_keys(tree: &SourceTree, object: &NodeRef) -> Vec<String> {
    let node = tree.resolve(object).unwrap();
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|n| n.kind() != kinds::COMMENT)
        .map(|n| {
            let key = n.child_by_field_name("key").unwrap_or(n);
            tree.source()[key.byte_range()].to_string()
        })
        .collect()
}

#[test]
fn test_append_property_multiline_trailing_comma() {
    let src = "export const appRouter = t.router({\n  example: exampleRouter,\n});\n";
    let mut tree = SourceTree::parse(src, Lang::TypeScript).unwrap();
    let object = object_in(&tree, "appRouter");
    append_property(&mut tree, &object, &Property::new("auth", "authRouter")).unwrap();

    assert_eq!(
        tree.source(),
        "export const appRouter = t.router({\n  example: exampleRouter,\n  auth: authRouter,\n});\n"
    );
}

#[test]
fn test_append_property_keeps_order() {
    let src = "const o = { a: 1, b };\n";
    let mut tree = SourceTree::parse(src, Lang::TypeScript).unwrap();
    let object = object_in(&tree, "o");
    append_property(&mut tree, &object, &Property::shorthand("c")).unwrap();

    assert_eq!(tree.source(), "const o = { a: 1, b, c };\n");
    let object = object_in(&tree, "o");
    assert_eq!(property_keys(&tree, &object), vec!["a", "b", "c"]);
}

#[test]
fn test_append_property_to_empty_object() {
    let src = "const createContext = async () => {\n  return {};\n};\n";
    let mut tree = SourceTree::parse(src, Lang::TypeScript).unwrap();
    let object = object_in(&tree, "createContext");
    append_property(&mut tree, &object, &Property::shorthand("session")).unwrap();

    assert!(tree.source().contains("return { session };"));
    let object = object_in(&tree, "createContext");
    assert_eq!(property_keys(&tree, &object), vec!["session"]);
}

#[test]
fn test_append_property_multiline_without_comma() {
    let src = "const o = {\n    a: 1\n};\n";
    let mut tree = SourceTree::parse(src, Lang::TypeScript).unwrap();
    let object = object_in(&tree, "o");
    append_property(&mut tree, &object, &Property::new("b", "2")).unwrap();

    assert_eq!(tree.source(), "const o = {\n    a: 1,\n    b: 2\n};\n");
}

#[test]
fn test_append_property_collision_keeps_both() {
    let src = "const o = { a: 1 };\n";
    let mut tree = SourceTree::parse(src, Lang::TypeScript).unwrap();
    let object = object_in(&tree, "o");
    append_property(&mut tree, &object, &Property::new("a", "2")).unwrap();

    assert_eq!(tree.source(), "const o = { a: 1, a: 2 };\n");
}

#[test]
fn test_append_property_multiline_value_reindented() {
    let src = "export const exampleRouter = t.router({\n  hello: t.procedure.query(() => \"hi\"),\n});\n";
    let mut tree = SourceTree::parse(src, Lang::TypeScript).unwrap();
    let object = object_in(&tree, "exampleRouter");
    let value = "t.procedure.query(({ ctx }) => {\n  return ctx.prisma.example.findMany();\n})";
    append_property(&mut tree, &object, &Property::new("getAll", value)).unwrap();

    assert!(tree.source().contains(
        "  getAll: t.procedure.query(({ ctx }) => {\n    return ctx.prisma.example.findMany();\n  }),\n});"
    ));
}

#[test]
fn test_append_property_wrong_kind_is_contract_violation() {
    let src = "const o = [1, 2];\n";
    let mut tree = SourceTree::parse(src, Lang::TypeScript).unwrap();
    let array = first(&tree, &Shape::of("array"));
    let err = append_property(&mut tree, &array, &Property::shorthand("x")).unwrap_err();

    assert!(matches!(
        err,
        EditError::ShapeContract {
            operation: "append_property",
            ..
        }
    ));
    assert_eq!(tree.source(), src);
}

#[test]
fn test_stale_node_is_contract_violation() {
    let src = "const o = { a: 1 };\n";
    let mut tree = SourceTree::parse(src, Lang::TypeScript).unwrap();
    let object = object_in(&tree, "o");
    append_property(&mut tree, &object, &Property::shorthand("b")).unwrap();

    let err = append_property(&mut tree, &object, &Property::shorthand("c")).unwrap_err();
    assert!(matches!(err, EditError::ShapeContract { .. }));
}

#[test]
fn test_insert_statement_prepends_with_indentation() {
    let src = "export const createContext = async (opts: Options) => {\n  return {};\n};\n";
    let mut tree = SourceTree::parse(src, Lang::TypeScript).unwrap();
    let block = tree
        .select(&Shape::declarator("createContext"))
        .find(&Shape::of(kinds::STATEMENT_BLOCK))
        .first()
        .unwrap();
    let stmt = Statement::parse(
        "const session = await getServerSession(opts.req, opts.res, nextAuthOptions);",
    )
    .unwrap();
    insert_statement(&mut tree, &block, &stmt, Position::Start).unwrap();

    assert_eq!(
        tree.source(),
        "export const createContext = async (opts: Options) => {\n  const session = await getServerSession(opts.req, opts.res, nextAuthOptions);\n  return {};\n};\n"
    );
}

#[test]
fn test_insert_statement_appends() {
    let src = "function f() {\n    a();\n}\n";
    let mut tree = SourceTree::parse(src, Lang::TypeScript).unwrap();
    let block = first(&tree, &Shape::of(kinds::STATEMENT_BLOCK));
    insert_statement(&mut tree, &block, &Statement::parse("b();").unwrap(), Position::End).unwrap();

    assert_eq!(tree.source(), "function f() {\n    a();\n    b();\n}\n");
}

#[test]
fn test_insert_statement_into_empty_block() {
    let src = "function f() {}\n";
    let mut tree = SourceTree::parse(src, Lang::TypeScript).unwrap();
    let block = first(&tree, &Shape::of(kinds::STATEMENT_BLOCK));
    insert_statement(&mut tree, &block, &Statement::parse("a();").unwrap(), Position::Start)
        .unwrap();

    assert_eq!(tree.source(), "function f() {\n  a();\n}\n");
}

#[test]
fn test_wrap_self_closing_element() {
    let src = "const MyApp: AppType = ({ Component, pageProps }) => {\n  return <Component {...pageProps} />;\n};\n";
    let mut tree = SourceTree::parse(src, Lang::Tsx).unwrap();
    let element = first(&tree, &Shape::jsx_self_closing("Component"));
    let wrapper = Wrapper::new("SessionProvider").attribute("session", "pageProps.session");
    wrap_element(&mut tree, &element, &wrapper).unwrap();

    assert_eq!(
        tree.source(),
        "const MyApp: AppType = ({ Component, pageProps }) => {\n  return <SessionProvider session={pageProps.session}>\n    <Component {...pageProps} />\n  </SessionProvider>;\n};\n"
    );
    // The original element is now a child of the wrapper.
    let wrapped = tree
        .select(&Shape::jsx_element("SessionProvider"))
        .find(&Shape::jsx_self_closing("Component"));
    assert_eq!(wrapped.len(), 1);
}

#[test]
fn test_wrap_default_export_identifier() {
    let src = "const MyApp = () => null;\n\nexport default MyApp;\n";
    let mut tree = SourceTree::parse(src, Lang::Tsx).unwrap();
    let export = first(&tree, &Shape::default_export());
    wrap_default_export(&mut tree, &export, "trpc.withTRPC").unwrap();

    assert_eq!(
        tree.source(),
        "const MyApp = () => null;\n\nexport default trpc.withTRPC(MyApp);\n"
    );
}

#[test]
fn test_wrap_default_export_function_declaration() {
    let body = "{\n  return <main>hello</main>;\n}";
    let src = format!("export default function App() {body}\n");
    let mut tree = SourceTree::parse(src.as_str(), Lang::Tsx).unwrap();
    let export = first(&tree, &Shape::default_export());
    wrap_default_export(&mut tree, &export, "trpc.withTRPC").unwrap();

    assert_eq!(
        tree.source(),
        format!("function App() {body}\n\nexport default trpc.withTRPC(App);\n")
    );
    let export = first(&tree, &Shape::default_export());
    assert_eq!(export.text(), "export default trpc.withTRPC(App);");
}

#[test]
fn test_wrap_default_export_rejects_named_export() {
    let src = "export const a = 1;\n";
    let mut tree = SourceTree::parse(src, Lang::TypeScript).unwrap();
    let export = first(&tree, &Shape::of(kinds::EXPORT_STATEMENT));
    let err = wrap_default_export(&mut tree, &export, "wrap").unwrap_err();
    assert!(matches!(err, EditError::ShapeContract { .. }));
}

#[test]
fn test_append_property_keeps_comment_only_object_comments() {
    let src = "const o = {\n  // keep me\n};\n";
    let mut tree = SourceTree::parse(src, Lang::TypeScript).unwrap();
    let object = object_in(&tree, "o");
    append_property(&mut tree, &object, &Property::shorthand("b")).unwrap();

    assert_eq!(tree.source(), "const o = {\n  // keep me\n  b,\n};\n");
    let object = object_in(&tree, "o");
    assert_eq!(property_keys(&tree, &object), vec!["b"]);
}

#[test]
fn test_append_property_after_block_comment_inline() {
    let src = "const o = { /* none yet */ };\n";
    let mut tree = SourceTree::parse(src, Lang::TypeScript).unwrap();
    let object = object_in(&tree, "o");
    append_property(&mut tree, &object, &Property::shorthand("b")).unwrap();

    assert_eq!(tree.source(), "const o = { /* none yet */ b };\n");
}
