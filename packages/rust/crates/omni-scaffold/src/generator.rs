//! Generation run: install, stage, transform, select variants.
//!
//! The sequence is fixed. The base template is copied, enabled modules
//! install their packages in module order, every module asset is staged
//! concurrently, the composition plan runs one transform per file, and the
//! landing page variant is copied last. A failure aborts the run and leaves
//! whatever was already written in place.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use omni_edit::{TransformOptions, TransformReport, generate_unified_diff};
use omni_io::IoError;
use serde::Serialize;

use crate::catalog::{Catalog, PackageGroup};
use crate::error::ScaffoldError;
use crate::installer::{CommandInstaller, PackageInstaller};
use crate::module::{EnabledModules, Module};
use crate::orchestrator;
use crate::plan::CompositionPlan;
use crate::settings::ScaffoldSettings;
use crate::stager::{FileStager, FsStager, tree_pairs};
use crate::variant::{Variant, VariantTable};

/// Directory under the template root copied verbatim into every project.
pub const BASE_TEMPLATE_DIR: &str = "base";

/// One package group and whether it was actually installed.
#[derive(Debug, Clone, Serialize)]
pub struct InstallRecord {
    /// The requested group.
    #[serde(flatten)]
    pub group: PackageGroup,
    /// False for dry runs and `skip_install`.
    pub installed: bool,
}

/// Everything a run did, with paths relative to the project directory.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    /// Target project.
    pub project_dir: PathBuf,
    /// Enabled modules, fixed order.
    pub modules: Vec<Module>,
    /// Nothing in `project_dir` was touched.
    pub dry_run: bool,
    /// Package groups, in install order.
    pub installs: Vec<InstallRecord>,
    /// Staged files: base template, then module assets.
    pub staged: Vec<PathBuf>,
    /// Transforms per file, in run order.
    pub plan: CompositionPlan,
    /// Per-file transform results.
    pub transforms: Vec<TransformReport>,
    /// Landing page variant, if one matched.
    pub variant: Option<Variant>,
}

/// Drives generation runs against one template root.
pub struct Generator {
    template_root: PathBuf,
    catalog: Catalog,
    landing_page: VariantTable,
    settings: ScaffoldSettings,
    installer: Arc<dyn PackageInstaller>,
    stager: Arc<dyn FileStager>,
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("template_root", &self.template_root)
            .field("settings", &self.settings)
            .field("installer", &self.installer.name())
            .finish_non_exhaustive()
    }
}

impl Generator {
    /// Generator with the built-in catalog, the configured package manager
    /// and filesystem staging.
    #[must_use]
    pub fn new(template_root: impl Into<PathBuf>, settings: ScaffoldSettings) -> Self {
        let installer = Arc::new(CommandInstaller::new(settings.package_manager()));
        Self {
            template_root: template_root.into(),
            catalog: Catalog::new().with_precedence(settings.precedence()),
            landing_page: VariantTable::landing_page(),
            settings,
            installer,
            stager: Arc::new(FsStager),
        }
    }

    /// Replace the package installer.
    #[must_use]
    pub fn with_installer(mut self, installer: Arc<dyn PackageInstaller>) -> Self {
        self.installer = installer;
        self
    }

    /// Replace the file stager.
    #[must_use]
    pub fn with_stager(mut self, stager: Arc<dyn FileStager>) -> Self {
        self.stager = stager;
        self
    }

    /// Replace the module catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Settings in effect.
    #[must_use]
    pub fn settings(&self) -> &ScaffoldSettings {
        &self.settings
    }

    /// The composition plan `enabled` would run.
    ///
    /// # Errors
    /// `ScaffoldError::Catalog` if the catalog is inconsistent.
    pub fn plan(&self, enabled: &EnabledModules) -> Result<CompositionPlan, ScaffoldError> {
        CompositionPlan::build(&self.catalog, enabled)
    }

    /// Generate a project in `project_dir`.
    ///
    /// On a dry run everything happens in a scratch directory that is
    /// discarded afterwards; the report still shows every change.
    ///
    /// # Errors
    /// The first failure of any phase. Nothing is rolled back.
    pub async fn generate(
        &self,
        project_dir: &Path,
        enabled: &EnabledModules,
    ) -> Result<GenerationReport, ScaffoldError> {
        let dry_run = self.settings.dry_run();
        let scratch = if dry_run {
            Some(tempfile::tempdir().map_err(|e| ScaffoldError::Io(IoError::System(e)))?)
        } else {
            None
        };
        let work_dir = scratch.as_ref().map_or(project_dir, tempfile::TempDir::path);

        let plan = self.plan(enabled)?;
        let descriptors: Vec<_> = self
            .catalog
            .descriptors(enabled)
            .into_iter()
            .filter(|d| d.enabled)
            .collect();
        tracing::info!(
            project = %project_dir.display(),
            modules = ?enabled.iter().collect::<Vec<_>>(),
            dry_run,
            "starting generation"
        );

        let mut staged = self.stage_base(work_dir).await?;

        let mut installs = Vec::new();
        let install = !dry_run && !self.settings.skip_install();
        for group in descriptors.iter().flat_map(|d| d.packages.iter().cloned()) {
            if install {
                self.installer
                    .install(work_dir, &group.packages, group.dev)
                    .await?;
            }
            installs.push(InstallRecord {
                group,
                installed: install,
            });
        }

        let pairs: Vec<(PathBuf, PathBuf)> = descriptors
            .iter()
            .flat_map(|d| d.assets.iter())
            .map(|asset| {
                (
                    self.template_root.join(&asset.source),
                    work_dir.join(&asset.destination),
                )
            })
            .collect();
        let copied = self.stager.stage(pairs).await?;
        tracing::info!(files = copied.len(), "staged module assets");
        staged.extend(copied.iter().map(|path| relative(work_dir, path)));

        let transforms = self.run_plan(&plan, work_dir).await?;

        let variant = self.landing_page.resolve(enabled);
        match &variant {
            Some(variant) => {
                self.stager
                    .stage(vec![(
                        self.template_root.join(&variant.source),
                        work_dir.join(&variant.destination),
                    )])
                    .await?;
                tracing::info!(source = %variant.source.display(), "copied landing page variant");
            }
            None => tracing::debug!("no landing page variant; keeping base file"),
        }

        Ok(GenerationReport {
            project_dir: project_dir.to_path_buf(),
            modules: enabled.iter().collect(),
            dry_run,
            installs,
            staged,
            plan,
            transforms,
            variant,
        })
    }

    async fn stage_base(&self, work_dir: &Path) -> Result<Vec<PathBuf>, ScaffoldError> {
        let base = self.template_root.join(BASE_TEMPLATE_DIR);
        if !base.is_dir() {
            tracing::warn!(path = %base.display(), "no base template; skipping");
            return Ok(Vec::new());
        }
        let copied = self.stager.stage(tree_pairs(&base, work_dir)?).await?;
        tracing::info!(files = copied.len(), "staged base template");
        Ok(copied.iter().map(|path| relative(work_dir, path)).collect())
    }

    async fn run_plan(
        &self,
        plan: &CompositionPlan,
        work_dir: &Path,
    ) -> Result<Vec<TransformReport>, ScaffoldError> {
        let options = TransformOptions {
            max_file_size: self.settings.max_file_size(),
            dry_run: false,
        };
        let (task_plan, task_dir) = (plan.clone(), work_dir.to_path_buf());
        let reports = tokio::task::spawn_blocking(move || {
            orchestrator::execute(&task_plan, &task_dir, &options)
        })
        .await
        .map_err(|e| ScaffoldError::Task(e.to_string()))??;

        // A dry run writes into the scratch directory only.
        let dry_run = self.settings.dry_run();
        Ok(reports
            .into_iter()
            .map(|mut report| {
                report.written &= !dry_run;
                relative_report(work_dir, report)
            })
            .collect())
    }
}

fn relative(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

/// Re-root a report at the project directory so dry runs and real runs
/// report identically.
fn relative_report(root: &Path, mut report: TransformReport) -> TransformReport {
    report.path = relative(root, &report.path);
    report.diff = generate_unified_diff(
        &report.path.display().to_string(),
        &report.original,
        &report.modified,
    );
    report
}
