//! Module catalog: dependencies, staged assets and transform registrations.
//!
//! The catalog is immutable configuration. It is built once per run and
//! passed explicitly to whatever needs it.
//!
//! Transform order is never taken from the registration list. It comes only
//! from the precedence table, which maps each shared file to the order its
//! modules run in.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ScaffoldError;
use crate::module::{EnabledModules, Module};
use crate::transforms::{
    self, APP_FILE, CONTEXT_FILE, EXAMPLE_ROUTER_FILE, INDEX_ROUTER_FILE, NEXT_AUTH_HANDLER_FILE,
    TransformFn,
};

/// Packages one module asks the installer for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageGroup {
    /// Requesting module.
    pub module: Module,
    /// Package specs, e.g. `react-query@3.39.2`.
    pub packages: Vec<String>,
    /// Development dependency.
    pub dev: bool,
}

/// A pre-authored file copied into the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    /// Path relative to the template root.
    pub source: PathBuf,
    /// Path relative to the project directory.
    pub destination: PathBuf,
}

impl Asset {
    fn addon(module: Module, file: &str, destination: &str) -> Self {
        Self {
            source: PathBuf::from("addons").join(module.as_str()).join(file),
            destination: PathBuf::from(destination),
        }
    }
}

/// One module's edit to one shared file.
#[derive(Clone, Copy)]
pub struct Registration {
    /// Target file, relative to the project directory.
    pub file: &'static str,
    /// Owning module.
    pub module: Module,
    /// Other modules that must be enabled for the edit to apply.
    pub requires: &'static [Module],
    /// Short name for logs and plans.
    pub name: &'static str,
    /// The edit.
    pub apply: TransformFn,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("file", &self.file)
            .field("module", &self.module)
            .field("requires", &self.requires)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

const REGISTRATIONS: &[Registration] = &[
    Registration {
        file: APP_FILE,
        module: Module::NextAuth,
        requires: &[],
        name: "session-provider",
        apply: transforms::app::session_provider,
    },
    Registration {
        file: APP_FILE,
        module: Module::Trpc,
        requires: &[],
        name: "with-trpc",
        apply: transforms::app::with_trpc,
    },
    Registration {
        file: CONTEXT_FILE,
        module: Module::NextAuth,
        requires: &[Module::Trpc],
        name: "context-session",
        apply: transforms::context::session,
    },
    Registration {
        file: CONTEXT_FILE,
        module: Module::Prisma,
        requires: &[Module::Trpc],
        name: "context-prisma",
        apply: transforms::context::prisma,
    },
    Registration {
        file: INDEX_ROUTER_FILE,
        module: Module::NextAuth,
        requires: &[Module::Trpc],
        name: "auth-router",
        apply: transforms::router::auth_router,
    },
    Registration {
        file: EXAMPLE_ROUTER_FILE,
        module: Module::Prisma,
        requires: &[Module::Trpc],
        name: "example-get-all",
        apply: transforms::router::example_get_all,
    },
    Registration {
        file: NEXT_AUTH_HANDLER_FILE,
        module: Module::Prisma,
        requires: &[Module::NextAuth],
        name: "prisma-adapter",
        apply: transforms::next_auth::prisma_adapter,
    },
];

/// Run order of the modules editing one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecedenceEntry {
    /// Target file, relative to the project directory.
    pub file: String,
    /// Modules in the order their edits run.
    pub order: Vec<Module>,
}

/// Fixed inter-module precedence, per file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrecedenceTable(Vec<PrecedenceEntry>);

impl PrecedenceTable {
    /// Build a table from `(file, order)` pairs.
    #[must_use]
    pub fn new(entries: Vec<PrecedenceEntry>) -> Self {
        Self(entries)
    }

    /// Entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[PrecedenceEntry] {
        &self.0
    }

    /// Replace the order of every file `overrides` names; keep the rest.
    #[must_use]
    pub fn overlay(mut self, overrides: PrecedenceTable) -> Self {
        for entry in overrides.0 {
            match self.0.iter_mut().find(|e| e.file == entry.file) {
                Some(existing) => existing.order = entry.order,
                None => self.0.push(entry),
            }
        }
        self
    }

    /// Module order for `file`, if the table has it.
    #[must_use]
    pub fn order(&self, file: &str) -> Option<&[Module]> {
        self.0
            .iter()
            .find(|entry| entry.file == file)
            .map(|entry| entry.order.as_slice())
    }
}

impl Default for PrecedenceTable {
    /// Authentication edits run first so later edits can rely on `session`.
    fn default() -> Self {
        let entry = |file: &str, order: &[Module]| PrecedenceEntry {
            file: file.to_string(),
            order: order.to_vec(),
        };
        Self(vec![
            entry(APP_FILE, &[Module::NextAuth, Module::Trpc]),
            entry(CONTEXT_FILE, &[Module::NextAuth, Module::Prisma]),
            entry(INDEX_ROUTER_FILE, &[Module::NextAuth]),
            entry(EXAMPLE_ROUTER_FILE, &[Module::Prisma]),
            entry(NEXT_AUTH_HANDLER_FILE, &[Module::Prisma]),
        ])
    }
}

/// One module as seen by a run: enabled or not, with everything it brings.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleDescriptor {
    /// The module.
    pub module: Module,
    /// Whether the run enables it.
    pub enabled: bool,
    /// Packages to install.
    pub packages: Vec<PackageGroup>,
    /// Files to stage before any transform runs.
    pub assets: Vec<Asset>,
    /// Shared files its transforms edit under this selection.
    pub targets: Vec<&'static str>,
}

/// The module catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    registrations: Vec<Registration>,
    precedence: PrecedenceTable,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            registrations: REGISTRATIONS.to_vec(),
            precedence: PrecedenceTable::default(),
        }
    }
}

impl Catalog {
    /// The built-in catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the precedence table.
    #[must_use]
    pub fn with_precedence(mut self, precedence: PrecedenceTable) -> Self {
        self.precedence = precedence;
        self
    }

    /// Transform registrations, in no meaningful order.
    #[must_use]
    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    /// The precedence table.
    #[must_use]
    pub fn precedence(&self) -> &PrecedenceTable {
        &self.precedence
    }

    /// Check that every registration has exactly one slot in the table.
    ///
    /// # Errors
    /// `ScaffoldError::Catalog` describing the first inconsistency.
    pub fn validate(&self) -> Result<(), ScaffoldError> {
        let mut seen = HashSet::new();
        for registration in &self.registrations {
            if !seen.insert((registration.file, registration.module)) {
                return Err(ScaffoldError::Catalog(format!(
                    "{} registers two transforms for {}",
                    registration.module, registration.file
                )));
            }
            let ordered = self
                .precedence
                .order(registration.file)
                .is_some_and(|order| order.contains(&registration.module));
            if !ordered {
                return Err(ScaffoldError::Catalog(format!(
                    "no precedence for {} on {}",
                    registration.module, registration.file
                )));
            }
        }

        let mut files = HashSet::new();
        for entry in self.precedence.entries() {
            if !files.insert(entry.file.as_str()) {
                return Err(ScaffoldError::Catalog(format!(
                    "{} listed twice in the precedence table",
                    entry.file
                )));
            }
            let unique: HashSet<Module> = entry.order.iter().copied().collect();
            if unique.len() != entry.order.len() {
                return Err(ScaffoldError::Catalog(format!(
                    "repeated module in the precedence of {}",
                    entry.file
                )));
            }
        }
        Ok(())
    }

    /// The registration of `module` on `file`, if it applies under `enabled`.
    #[must_use]
    pub fn registration(
        &self,
        file: &str,
        module: Module,
        enabled: &EnabledModules,
    ) -> Option<&Registration> {
        self.registrations.iter().find(|r| {
            r.file == file
                && r.module == module
                && enabled.contains(module)
                && enabled.contains_all(r.requires)
        })
    }

    /// Descriptors for every module, in fixed module order.
    #[must_use]
    pub fn descriptors(&self, enabled: &EnabledModules) -> Vec<ModuleDescriptor> {
        Module::ALL
            .into_iter()
            .map(|module| {
                let on = enabled.contains(module);
                let mut targets: Vec<&'static str> = self
                    .registrations
                    .iter()
                    .filter(|r| r.module == module && on && enabled.contains_all(r.requires))
                    .map(|r| r.file)
                    .collect();
                targets.sort_unstable();
                targets.dedup();
                ModuleDescriptor {
                    module,
                    enabled: on,
                    packages: packages(module, enabled),
                    assets: assets(module, enabled),
                    targets,
                }
            })
            .collect()
    }
}

/// Packages a module installs under the given selection.
#[must_use]
pub fn packages(module: Module, enabled: &EnabledModules) -> Vec<PackageGroup> {
    let group = |packages: &[&str], dev: bool| PackageGroup {
        module,
        packages: packages.iter().map(ToString::to_string).collect(),
        dev,
    };
    match module {
        Module::NextAuth if enabled.contains(Module::Prisma) => {
            vec![group(&["next-auth", "@next-auth/prisma-adapter"], false)]
        }
        Module::NextAuth => vec![group(&["next-auth"], false)],
        Module::Trpc => vec![group(
            &[
                "react-query@3.39.2",
                "superjson",
                "@trpc/server@experimental",
                "@trpc/client@experimental",
                "@trpc/next@experimental",
                "@trpc/react@experimental",
            ],
            false,
        )],
        Module::Tailwind => vec![group(&["tailwindcss", "postcss", "autoprefixer"], true)],
        Module::Prisma => vec![group(&["prisma"], true), group(&["@prisma/client"], false)],
    }
}

/// Assets a module stages under the given selection.
#[must_use]
pub fn assets(module: Module, enabled: &EnabledModules) -> Vec<Asset> {
    let with_auth = enabled.contains(Module::NextAuth);
    let asset = |file: &str, destination: &str| Asset::addon(module, file, destination);
    match module {
        Module::NextAuth => vec![
            asset("api-handler.ts", NEXT_AUTH_HANDLER_FILE),
            asset("restricted.ts", "src/pages/api/restricted.ts"),
            asset("next-auth.d.ts", "next-auth.d.ts"),
        ],
        Module::Trpc => {
            let server_utils = if with_auth {
                "auth-server-utils.ts"
            } else {
                "server-utils.ts"
            };
            let mut assets = vec![
                asset("api-handler.ts", "src/pages/api/trpc/[trpc].ts"),
                asset("utils.ts", "src/utils/trpc.ts"),
                asset(server_utils, "src/server/trpc/utils.ts"),
                asset("base-context.ts", CONTEXT_FILE),
                asset("index-router.ts", INDEX_ROUTER_FILE),
                asset("example-router.ts", EXAMPLE_ROUTER_FILE),
            ];
            if with_auth {
                assets.push(asset("auth-router.ts", "src/server/trpc/router/auth.ts"));
            }
            assets
        }
        Module::Tailwind => vec![
            asset("tailwind.config.js", "tailwind.config.js"),
            asset("postcss.config.js", "postcss.config.js"),
            asset("globals.css", "src/styles/globals.css"),
        ],
        Module::Prisma => {
            let schema = if with_auth {
                "auth-schema.prisma"
            } else {
                "schema.prisma"
            };
            vec![
                asset(schema, "prisma/schema.prisma"),
                asset("client.ts", "src/server/db/client.ts"),
            ]
        }
    }
}
