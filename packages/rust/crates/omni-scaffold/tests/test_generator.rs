//! End-to-end generation runs against the bundled template.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use omni_edit::EditError;
use omni_scaffold::{
    APP_FILE, CONTEXT_FILE, EnabledModules, Generator, INDEX_ROUTER_FILE, InstallCall, Module,
    NEXT_AUTH_HANDLER_FILE, PrecedenceEntry, PrecedenceTable, RecordingInstaller, ScaffoldError,
    ScaffoldSettings, tree_pairs,
};
use tempfile::TempDir;
use walkdir::WalkDir;

fn template_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("template")
}

fn enabled(list: &str) -> EnabledModules {
    list.parse().unwrap()
}

fn generator(root: &Path, settings: ScaffoldSettings) -> (Generator, Arc<RecordingInstaller>) {
    let recorder = Arc::new(RecordingInstaller::new());
    let generator = Generator::new(root, settings).with_installer(recorder.clone());
    (generator, recorder)
}

fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(dir)
        .into_iter()
        .map(Result::unwrap)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let relative = e.path().strip_prefix(dir).unwrap().to_path_buf();
            (relative, fs::read(e.path()).unwrap())
        })
        .collect()
}

fn read(dir: &Path, file: &str) -> String {
    fs::read_to_string(dir.join(file)).unwrap()
}

#[tokio::test]
async fn test_full_stack_wiring() {
    let project = TempDir::new().unwrap();
    let (generator, _) = generator(&template_root(), ScaffoldSettings::default());

    let report = generator
        .generate(project.path(), &enabled("next-auth,trpc,tailwind,prisma"))
        .await
        .unwrap();

    assert_eq!(
        read(project.path(), APP_FILE),
        r#"// src/pages/_app.tsx
import type { AppType } from "next/dist/shared/lib/utils";
import { SessionProvider } from "next-auth/react";
import { trpc } from "../utils/trpc";

const MyApp: AppType = ({ Component, pageProps }) => {
  return <SessionProvider session={pageProps.session}>
    <Component {...pageProps} />
  </SessionProvider>;
};

export default trpc.withTRPC(MyApp);
"#
    );

    assert_eq!(
        read(project.path(), CONTEXT_FILE),
        r#"// src/server/trpc/context.ts
import * as trpc from "@trpc/server";
import * as trpcNext from "@trpc/server/adapters/next";
import { unstable_getServerSession as getServerSession } from "next-auth";
import { authOptions as nextAuthOptions } from "../../pages/api/auth/[...nextauth]";
import { prisma } from "../db/client";

export const createContext = async (opts: trpcNext.CreateNextContextOptions) => {
  const session = await getServerSession(opts.req, opts.res, nextAuthOptions);
  return {
    req: opts.req,
    res: opts.res,
    session,
    prisma,
  };
};

export type Context = trpc.inferAsyncReturnType<typeof createContext>;
"#
    );

    let index = read(project.path(), INDEX_ROUTER_FILE);
    assert!(index.contains("import { authRouter } from \"./auth\";\n\nexport const appRouter"));
    assert!(index.contains("  example: exampleRouter,\n  auth: authRouter,\n});"));

    let handler = read(project.path(), NEXT_AUTH_HANDLER_FILE);
    assert!(handler.contains(
        "// Prisma adapter for NextAuth, optional and can be removed\nimport { PrismaAdapter } from \"@next-auth/prisma-adapter\";\nimport { prisma } from \"../../../server/db/client\";\n"
    ));
    assert!(handler.contains("  ],\n  adapter: PrismaAdapter(prisma),\n};"));

    let example = read(project.path(), "src/server/trpc/router/example.ts");
    assert!(example.contains(
        "  getAll: t.procedure.query(({ ctx }) => {\n    return ctx.prisma.example.findMany();\n  }),\n});"
    ));

    // Prisma with auth: the auth showcase is not used.
    assert_eq!(
        read(project.path(), "src/pages/index.tsx"),
        read(&template_root(), "page-studs/index/with-trpc-tw.tsx")
    );
    assert_eq!(
        read(project.path(), "prisma/schema.prisma"),
        read(&template_root(), "addons/prisma/auth-schema.prisma")
    );
    assert_eq!(
        read(project.path(), "src/server/trpc/utils.ts"),
        read(&template_root(), "addons/trpc/auth-server-utils.ts")
    );

    assert_eq!(report.transforms.len(), 5);
    assert!(report.transforms.iter().all(|r| r.changed && r.written));
    assert!(report.staged.contains(&PathBuf::from("src/server/trpc/router/auth.ts")));
    assert!(report.staged.contains(&PathBuf::from("package.json")));
}

#[tokio::test]
async fn test_prisma_binding_follows_session_binding() {
    for selection in ["prisma,trpc,next-auth", "next-auth,trpc,prisma"] {
        let project = TempDir::new().unwrap();
        let (generator, _) = generator(&template_root(), ScaffoldSettings::default());
        generator
            .generate(project.path(), &enabled(selection))
            .await
            .unwrap();

        let context = read(project.path(), CONTEXT_FILE);
        let session = context.find("    session,").unwrap();
        let prisma = context.find("    prisma,").unwrap();
        assert!(session < prisma, "{selection}");
    }
}

#[tokio::test]
async fn test_configured_precedence_reorders_context() {
    let project = TempDir::new().unwrap();
    let settings = ScaffoldSettings {
        precedence: Some(PrecedenceTable::new(vec![PrecedenceEntry {
            file: CONTEXT_FILE.to_string(),
            order: vec![Module::Prisma, Module::NextAuth],
        }])),
        ..Default::default()
    };
    let (generator, _) = generator(&template_root(), settings);
    generator
        .generate(project.path(), &enabled("next-auth,trpc,prisma"))
        .await
        .unwrap();

    let context = read(project.path(), CONTEXT_FILE);
    let session = context.find("    session,").unwrap();
    let prisma = context.find("    prisma,").unwrap();
    assert!(prisma < session);
}

#[tokio::test]
async fn test_repeated_runs_are_byte_identical() {
    let selections = ["", "tailwind", "trpc,next-auth", "next-auth,trpc,tailwind,prisma"];
    for selection in selections {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let (generator, _) = generator(&template_root(), ScaffoldSettings::default());

        generator.generate(first.path(), &enabled(selection)).await.unwrap();
        generator.generate(second.path(), &enabled(selection)).await.unwrap();

        assert_eq!(snapshot(first.path()), snapshot(second.path()), "{selection}");
    }
}

#[tokio::test]
async fn test_base_only_run() {
    let project = TempDir::new().unwrap();
    let (generator, recorder) = generator(&template_root(), ScaffoldSettings::default());

    let report = generator
        .generate(project.path(), &EnabledModules::none())
        .await
        .unwrap();

    assert!(report.transforms.is_empty());
    assert!(report.variant.is_none());
    assert!(recorder.calls().await.is_empty());
    assert_eq!(
        snapshot(project.path()),
        snapshot(&template_root().join("base"))
    );
}

#[tokio::test]
async fn test_installs_follow_module_order() {
    let project = TempDir::new().unwrap();
    let (generator, recorder) = generator(&template_root(), ScaffoldSettings::default());

    let report = generator
        .generate(project.path(), &enabled("tailwind,prisma,next-auth"))
        .await
        .unwrap();

    let call = |packages: &[&str], dev: bool| InstallCall {
        packages: packages.iter().map(ToString::to_string).collect(),
        dev,
    };
    assert_eq!(
        recorder.calls().await,
        vec![
            call(&["next-auth", "@next-auth/prisma-adapter"], false),
            call(&["tailwindcss", "postcss", "autoprefixer"], true),
            call(&["prisma"], true),
            call(&["@prisma/client"], false),
        ]
    );
    assert!(report.installs.iter().all(|i| i.installed));
}

#[tokio::test]
async fn test_skip_install_records_without_installing() {
    let project = TempDir::new().unwrap();
    let settings = ScaffoldSettings {
        skip_install: Some(true),
        ..Default::default()
    };
    let (generator, recorder) = generator(&template_root(), settings);

    let report = generator
        .generate(project.path(), &enabled("trpc"))
        .await
        .unwrap();

    assert!(recorder.calls().await.is_empty());
    assert_eq!(report.installs.len(), 1);
    assert!(!report.installs[0].installed);
}

#[tokio::test]
async fn test_dry_run_leaves_project_untouched() {
    let project = TempDir::new().unwrap();
    let settings = ScaffoldSettings {
        dry_run: Some(true),
        ..Default::default()
    };
    let (generator, recorder) = generator(&template_root(), settings);

    let report = generator
        .generate(project.path(), &enabled("trpc,next-auth"))
        .await
        .unwrap();

    assert!(report.dry_run);
    assert!(fs::read_dir(project.path()).unwrap().next().is_none());
    assert!(recorder.calls().await.is_empty());

    let context = report
        .transforms
        .iter()
        .find(|r| r.path == Path::new(CONTEXT_FILE))
        .unwrap();
    assert!(context.diff.contains(&format!("+++ b/{CONTEXT_FILE}")));
    assert!(context.diff.contains("+    session,"));
    assert!(context.changed);
    assert!(report.transforms.iter().all(|r| !r.written));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["transforms"][0]["written"], false);
    assert_eq!(
        json["variant"]["source"],
        "page-studs/index/with-auth-trpc.tsx"
    );
}

#[tokio::test]
async fn test_parse_error_aborts_without_rollback() {
    let root = TempDir::new().unwrap();
    for (src, dest) in tree_pairs(&template_root(), root.path()).unwrap() {
        fs::create_dir_all(dest.parent().unwrap()).unwrap();
        fs::copy(src, dest).unwrap();
    }
    let broken = "export const appRouter = t.router({\n  example: ,\n";
    fs::write(root.path().join("addons/trpc/index-router.ts"), broken).unwrap();

    let project = TempDir::new().unwrap();
    let (generator, _) = generator(root.path(), ScaffoldSettings::default());
    let err = generator
        .generate(project.path(), &enabled("trpc,next-auth"))
        .await
        .unwrap_err();

    match err {
        ScaffoldError::Edit(EditError::Parse { path, .. }) => {
            assert!(path.ends_with("router/index.ts"), "{path}");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
    // The broken file is untouched; other files were still transformed.
    assert_eq!(read(project.path(), INDEX_ROUTER_FILE), broken);
    assert!(read(project.path(), CONTEXT_FILE).contains("session,"));
    // The run stopped before the variant step.
    assert_eq!(
        read(project.path(), "src/pages/index.tsx"),
        read(&template_root(), "base/src/pages/index.tsx")
    );
}
