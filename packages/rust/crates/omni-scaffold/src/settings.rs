//! Scaffolder settings.
//!
//! Loads and merges:
//! - System defaults: `<template_root>/scaffold.yaml`
//! - User overrides:  the file passed with `--config`
//!
//! Merge precedence is user over system. A missing file means defaults.
//! A `precedence:` list reorders module edits per file; files it does not
//! name keep the built-in order.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::catalog::PrecedenceTable;
use crate::error::ScaffoldError;

/// Settings file looked up in the template root.
pub const SYSTEM_SETTINGS_FILE: &str = "scaffold.yaml";

const DEFAULT_PACKAGE_MANAGER: &str = "npm";
const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Merged scaffolder settings. Unset fields fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaffoldSettings {
    /// `npm`, `pnpm` or `yarn`.
    pub package_manager: Option<String>,
    /// Largest source file a transform will read, in bytes.
    pub max_file_size: Option<u64>,
    /// Generate into a scratch directory and report without touching the project.
    pub dry_run: Option<bool>,
    /// Do not run the package installer.
    pub skip_install: Option<bool>,
    /// Per-file module order, overlaid on the built-in table.
    pub precedence: Option<PrecedenceTable>,
}

impl ScaffoldSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            package_manager: overlay.package_manager.or(self.package_manager),
            max_file_size: overlay.max_file_size.or(self.max_file_size),
            dry_run: overlay.dry_run.or(self.dry_run),
            skip_install: overlay.skip_install.or(self.skip_install),
            precedence: match (self.precedence, overlay.precedence) {
                (Some(base), Some(top)) => Some(base.overlay(top)),
                (base, top) => top.or(base),
            },
        }
    }

    /// Apply command-line overrides on top.
    #[must_use]
    pub fn with_overrides(self, overrides: Self) -> Self {
        self.merge(overrides)
    }

    /// Package manager to install with.
    #[must_use]
    pub fn package_manager(&self) -> &str {
        self.package_manager
            .as_deref()
            .unwrap_or(DEFAULT_PACKAGE_MANAGER)
    }

    /// Size limit for transformed files.
    #[must_use]
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE)
    }

    /// Whether this is a dry run.
    #[must_use]
    pub fn dry_run(&self) -> bool {
        self.dry_run.unwrap_or(false)
    }

    /// Whether installs are skipped.
    #[must_use]
    pub fn skip_install(&self) -> bool {
        self.skip_install.unwrap_or(false)
    }

    /// The built-in precedence table with configured overrides applied.
    #[must_use]
    pub fn precedence(&self) -> PrecedenceTable {
        let table = PrecedenceTable::default();
        match &self.precedence {
            Some(overrides) => table.overlay(overrides.clone()),
            None => table,
        }
    }
}

/// Path of the system settings file for `template_root`.
#[must_use]
pub fn system_settings_path(template_root: &Path) -> PathBuf {
    template_root.join(SYSTEM_SETTINGS_FILE)
}

/// Load merged settings (user overrides system).
///
/// # Errors
/// `ScaffoldError::Settings` if an existing file cannot be read or parsed.
pub fn load_settings(
    template_root: &Path,
    user: Option<&Path>,
) -> Result<ScaffoldSettings, ScaffoldError> {
    let system = load_one(&system_settings_path(template_root))?;
    let user = match user {
        Some(path) => load_one(path)?,
        None => ScaffoldSettings::default(),
    };
    Ok(system.merge(user))
}

fn load_one(path: &Path) -> Result<ScaffoldSettings, ScaffoldError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "settings file absent; using defaults");
        return Ok(ScaffoldSettings::default());
    }
    let invalid = |message: String| ScaffoldError::Settings {
        path: path.display().to_string(),
        message,
    };
    let raw = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    if raw.trim().is_empty() {
        return Ok(ScaffoldSettings::default());
    }
    serde_yaml::from_str(&raw).map_err(|e| invalid(e.to_string()))
}
