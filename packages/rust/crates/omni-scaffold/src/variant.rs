//! Variant selector: pick a pre-authored file by enabled-module combination.
//!
//! A pure lookup. Rules are tried top to bottom and the first match wins;
//! a module a rule does not mention may be on or off.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::module::{EnabledModules, Module};

/// One row of a variant table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantRule {
    /// Required on/off state per mentioned module.
    pub when: &'static [(Module, bool)],
    /// File under the table's source directory.
    pub file: &'static str,
}

impl VariantRule {
    fn matches(&self, enabled: &EnabledModules) -> bool {
        self.when
            .iter()
            .all(|(module, on)| enabled.contains(*module) == *on)
    }
}

/// A selected variant, ready to be staged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variant {
    /// Path relative to the template root.
    pub source: PathBuf,
    /// Path relative to the project directory.
    pub destination: PathBuf,
}

/// Decision table for one variant-specific file.
#[derive(Debug, Clone)]
pub struct VariantTable {
    source_dir: &'static str,
    destination: &'static str,
    rules: &'static [VariantRule],
}

// Auth showcases need a session without a database adapter, hence `!prisma`.
const LANDING_PAGE_RULES: &[VariantRule] = &[
    VariantRule {
        when: &[
            (Module::Trpc, true),
            (Module::Tailwind, true),
            (Module::NextAuth, true),
            (Module::Prisma, false),
        ],
        file: "with-auth-trpc-tw.tsx",
    },
    VariantRule {
        when: &[
            (Module::Trpc, true),
            (Module::Tailwind, false),
            (Module::NextAuth, true),
            (Module::Prisma, false),
        ],
        file: "with-auth-trpc.tsx",
    },
    VariantRule {
        when: &[(Module::Trpc, true), (Module::Tailwind, true)],
        file: "with-trpc-tw.tsx",
    },
    VariantRule {
        when: &[(Module::Trpc, true), (Module::Tailwind, false)],
        file: "with-trpc.tsx",
    },
    VariantRule {
        when: &[(Module::Trpc, false), (Module::Tailwind, true)],
        file: "with-tw.tsx",
    },
];

impl VariantTable {
    /// The landing page (`src/pages/index.tsx`) table.
    #[must_use]
    pub fn landing_page() -> Self {
        Self {
            source_dir: "page-studs/index",
            destination: "src/pages/index.tsx",
            rules: LANDING_PAGE_RULES,
        }
    }

    /// File name of the matching variant, or `None` to keep the base file.
    #[must_use]
    pub fn select(&self, enabled: &EnabledModules) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(enabled))
            .map(|rule| rule.file)
    }

    /// The matching variant as a staging pair.
    #[must_use]
    pub fn resolve(&self, enabled: &EnabledModules) -> Option<Variant> {
        self.select(enabled).map(|file| Variant {
            source: Path::new(self.source_dir).join(file),
            destination: PathBuf::from(self.destination),
        })
    }

    /// Rows in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[VariantRule] {
        self.rules
    }
}
