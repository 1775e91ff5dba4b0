//! Optional feature modules and the frozen set enabled for one run.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScaffoldError;

/// An optional feature module.
///
/// Variant order is the fixed module order: installs and descriptors follow
/// it regardless of how the caller listed the modules.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Module {
    /// Authentication (`next-auth`).
    NextAuth,
    /// RPC layer (`trpc`).
    Trpc,
    /// Styling (`tailwind`).
    Tailwind,
    /// ORM (`prisma`).
    Prisma,
}

impl Module {
    /// Every module, in fixed order.
    pub const ALL: [Module; 4] = [Module::NextAuth, Module::Trpc, Module::Tailwind, Module::Prisma];

    /// Name used on the command line and in settings.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NextAuth => "next-auth",
            Self::Trpc => "trpc",
            Self::Tailwind => "tailwind",
            Self::Prisma => "prisma",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "next-auth" | "nextauth" => Ok(Self::NextAuth),
            "trpc" => Ok(Self::Trpc),
            "tailwind" => Ok(Self::Tailwind),
            "prisma" => Ok(Self::Prisma),
            other => Err(ScaffoldError::UnknownModule(other.to_string())),
        }
    }
}

/// The set of modules enabled for one run.
///
/// Built once before any transform runs and never changed afterwards.
/// Iteration is always in fixed module order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnabledModules(BTreeSet<Module>);

impl EnabledModules {
    /// No optional modules.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether `module` is enabled.
    #[must_use]
    pub fn contains(&self, module: Module) -> bool {
        self.0.contains(&module)
    }

    /// Whether every module in `modules` is enabled.
    #[must_use]
    pub fn contains_all(&self, modules: &[Module]) -> bool {
        modules.iter().all(|m| self.contains(*m))
    }

    /// Enabled modules in fixed order.
    pub fn iter(&self) -> impl Iterator<Item = Module> + '_ {
        self.0.iter().copied()
    }

    /// Number of enabled modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no module is enabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Module> for EnabledModules {
    fn from_iter<T: IntoIterator<Item = Module>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromStr for EnabledModules {
    type Err = ScaffoldError;

    /// Parse a comma-separated list such as `trpc,next-auth`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect()
    }
}
