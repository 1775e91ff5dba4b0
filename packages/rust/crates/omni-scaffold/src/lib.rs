#![allow(clippy::doc_markdown)]

//! omni-scaffold - Module Composition for App Scaffolding
//!
//! Combines a base template with optional feature modules. Each module
//! installs packages, stages pre-authored assets and edits shared files
//! through the structural transforms of [`omni_edit`].
//!
//! # Features
//!
//! - **Module catalog**: dependencies, assets and per-file transform registrations
//! - **Composition plan**: per-file transform order from a fixed precedence table
//! - **Orchestrator**: one parse and one write per file, files in parallel
//! - **Variant selector**: pre-authored landing pages by module combination
//! - **Collaborators**: package installer and file stager behind traits
//!
//! # Architecture (ODF-REP Compliant)
//!
//! ```text
//! omni-scaffold/src/
//! ├── lib.rs           # Re-exports (this file)
//! ├── main.rs          # `omni-scaffold` binary
//! ├── cli.rs           # Command-line arguments (clap)
//! ├── error.rs         # ScaffoldError enum
//! ├── module.rs        # Module, EnabledModules
//! ├── catalog.rs       # Module catalog and precedence table
//! ├── transforms/      # Module transform registry
//! ├── plan.rs          # Composition plan
//! ├── orchestrator.rs  # Plan execution
//! ├── variant.rs       # Variant selector
//! ├── installer.rs     # PackageInstaller collaborator
//! ├── stager.rs        # FileStager collaborator
//! ├── settings.rs      # YAML settings
//! └── generator.rs     # Generation run
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use omni_scaffold::{EnabledModules, Generator, load_settings};
//!
//! let settings = load_settings(template_root, None)?;
//! let enabled: EnabledModules = "next-auth,trpc,prisma".parse()?;
//! let report = Generator::new(template_root, settings)
//!     .generate(project_dir, &enabled)
//!     .await?;
//! ```

// ============================================================================
// Module Declarations (ODF-REP: Atomic Structure)
// ============================================================================

mod catalog;
mod error;
mod generator;
mod installer;
mod module;
pub mod orchestrator;
mod plan;
mod settings;
mod stager;
mod transforms;
mod variant;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use catalog::{
    Asset, Catalog, ModuleDescriptor, PackageGroup, PrecedenceEntry, PrecedenceTable,
    Registration, assets, packages,
};
pub use error::ScaffoldError;
pub use generator::{BASE_TEMPLATE_DIR, GenerationReport, Generator, InstallRecord};
pub use installer::{CommandInstaller, InstallCall, PackageInstaller, RecordingInstaller};
pub use module::{EnabledModules, Module};
pub use plan::{CompositionPlan, PlannedTransform};
pub use settings::{SYSTEM_SETTINGS_FILE, ScaffoldSettings, load_settings, system_settings_path};
pub use stager::{FileStager, FsStager, tree_pairs};
pub use transforms::{
    APP_FILE, CONTEXT_FILE, EXAMPLE_ROUTER_FILE, INDEX_ROUTER_FILE, NEXT_AUTH_HANDLER_FILE,
    TransformFn,
};
pub use variant::{Variant, VariantRule, VariantTable};
