//! Package installer collaborator.

use std::path::Path;

use async_trait::async_trait;
use serde::Serialize;
use tokio::process::Command;
use tokio::sync::Mutex;

use crate::error::ScaffoldError;

/// Installs packages into a project.
#[async_trait]
pub trait PackageInstaller: Send + Sync {
    /// Install `packages` into `project_dir`, as dev dependencies if `dev`.
    async fn install(
        &self,
        project_dir: &Path,
        packages: &[String],
        dev: bool,
    ) -> Result<(), ScaffoldError>;

    /// Installer name (e.g. "npm", "recording").
    fn name(&self) -> &str;
}

/// Runs the package manager as a child process.
#[derive(Debug, Clone)]
pub struct CommandInstaller {
    package_manager: String,
}

impl CommandInstaller {
    /// Installer driving `package_manager` (`npm`, `pnpm`, `yarn`).
    #[must_use]
    pub fn new(package_manager: impl Into<String>) -> Self {
        Self {
            package_manager: package_manager.into(),
        }
    }

    fn args(&self, packages: &[String], dev: bool) -> Vec<String> {
        let verb = match self.package_manager.as_str() {
            "npm" => "install",
            _ => "add",
        };
        let mut args = vec![verb.to_string()];
        if dev {
            args.push("-D".to_string());
        }
        args.extend(packages.iter().cloned());
        args
    }
}

#[async_trait]
impl PackageInstaller for CommandInstaller {
    async fn install(
        &self,
        project_dir: &Path,
        packages: &[String],
        dev: bool,
    ) -> Result<(), ScaffoldError> {
        let packages: Vec<String> = packages.iter().filter(|p| !p.is_empty()).cloned().collect();
        if packages.is_empty() {
            return Ok(());
        }

        let args = self.args(&packages, dev);
        let command = format!("{} {}", self.package_manager, args.join(" "));
        tracing::info!(%command, dir = %project_dir.display(), "installing packages");

        let output = Command::new(&self.package_manager)
            .args(&args)
            .current_dir(project_dir)
            .output()
            .await
            .map_err(|e| ScaffoldError::Install {
                command: command.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ScaffoldError::Install {
                command,
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.package_manager
    }
}

/// One recorded install request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallCall {
    /// Requested packages.
    pub packages: Vec<String>,
    /// Development dependency.
    pub dev: bool,
}

/// Records install requests without running anything.
#[derive(Debug, Default)]
pub struct RecordingInstaller {
    calls: Mutex<Vec<InstallCall>>,
}

impl RecordingInstaller {
    /// Empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests received so far, in call order.
    pub async fn calls(&self) -> Vec<InstallCall> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl PackageInstaller for RecordingInstaller {
    async fn install(
        &self,
        _project_dir: &Path,
        packages: &[String],
        dev: bool,
    ) -> Result<(), ScaffoldError> {
        self.calls.lock().await.push(InstallCall {
            packages: packages.to_vec(),
            dev,
        });
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}
