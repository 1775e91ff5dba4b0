//! Tests for lang module - grammar selection.

use std::path::Path;

use omni_ast::Lang;

#[test]
fn test_from_extension() {
    assert_eq!(Lang::from_extension("ts"), Some(Lang::TypeScript));
    assert_eq!(Lang::from_extension("tsx"), Some(Lang::Tsx));
    assert_eq!(Lang::from_extension("js"), Some(Lang::Tsx));
    assert_eq!(Lang::from_extension("py"), None);
}

#[test]
fn test_for_path_defaults_to_tsx() {
    assert_eq!(Lang::for_path(Path::new("src/pages/_app.tsx")), Lang::Tsx);
    assert_eq!(
        Lang::for_path(Path::new("src/server/trpc/context.ts")),
        Lang::TypeScript
    );
    assert_eq!(Lang::for_path(Path::new("next.config")), Lang::Tsx);
}

#[test]
fn test_try_from() {
    let lang: Lang = "typescript".try_into().unwrap();
    assert_eq!(lang, Lang::TypeScript);
    assert_eq!(lang.as_str(), "typescript");
    assert!(Lang::try_from("python").is_err());
}

#[test]
fn test_extensions() {
    assert!(Lang::Tsx.extensions().contains(&"tsx"));
    assert_eq!(Lang::TypeScript.extensions(), vec!["ts", "mts", "cts"]);
}
