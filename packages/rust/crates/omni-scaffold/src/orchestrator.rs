//! Composition orchestrator.
//!
//! Every targeted file gets exactly one `apply_transform` whose transform
//! runs that file's planned steps in order. One parse and one write per
//! file, and no two jobs ever touch the same file.

use std::path::Path;

use omni_ast::SourceTree;
use omni_edit::{EditError, TransformJob, TransformOptions, TransformReport, apply_many};

use crate::error::ScaffoldError;
use crate::plan::{CompositionPlan, PlannedTransform};

/// Fold ordered steps into one transform.
pub fn compose(
    steps: Vec<PlannedTransform>,
) -> impl FnOnce(&mut SourceTree) -> Result<(), EditError> + Send + 'static {
    move |tree: &mut SourceTree| {
        for step in steps {
            tracing::debug!(module = %step.module, transform = step.name, "running transform");
            (step.apply)(tree)?;
        }
        Ok(())
    }
}

/// One job per planned file, rooted at `project_dir`.
#[must_use]
pub fn jobs(plan: &CompositionPlan, project_dir: &Path) -> Vec<TransformJob> {
    plan.iter()
        .map(|(file, steps)| TransformJob::new(project_dir.join(file), compose(steps.to_vec())))
        .collect()
}

/// Execute the plan. Files run in parallel; reports come back in file order.
///
/// # Errors
/// The first failing file's error. Other files still run to completion and
/// nothing is rolled back.
pub fn execute(
    plan: &CompositionPlan,
    project_dir: &Path,
    options: &TransformOptions,
) -> Result<Vec<TransformReport>, ScaffoldError> {
    if plan.is_empty() {
        tracing::debug!("nothing to transform");
        return Ok(Vec::new());
    }
    let reports = apply_many(jobs(plan, project_dir), options)?;
    tracing::info!(
        files = reports.len(),
        changed = reports.iter().filter(|r| r.changed).count(),
        "applied composition plan"
    );
    Ok(reports)
}
