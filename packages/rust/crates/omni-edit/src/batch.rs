//! Batch transforms - one job per file, files in parallel.
//!
//! Jobs in one batch must target distinct files: each job is a non-atomic
//! read-modify-write, so two jobs on one file could clobber each other.
//! Duplicates are rejected before any job runs.

use std::collections::HashSet;
use std::path::PathBuf;

use omni_ast::SourceTree;
use rayon::prelude::*;

use crate::error::EditError;
use crate::pipeline::apply_transform_with;
use crate::types::{TransformOptions, TransformReport};

/// A boxed transform that can run on a worker thread.
pub type BoxedTransform = Box<dyn FnOnce(&mut SourceTree) -> Result<(), EditError> + Send>;

/// One file and the transform to apply to it.
pub struct TransformJob {
    path: PathBuf,
    transform: BoxedTransform,
}

impl TransformJob {
    /// Create a job.
    pub fn new<F>(path: impl Into<PathBuf>, transform: F) -> Self
    where
        F: FnOnce(&mut SourceTree) -> Result<(), EditError> + Send + 'static,
    {
        Self {
            path: path.into(),
            transform: Box::new(transform),
        }
    }

    /// Target file.
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl std::fmt::Debug for TransformJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformJob")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Run every job, files in parallel. Reports come back in job order.
///
/// All jobs run to completion; the first failure in job order is returned.
///
/// # Errors
/// `EditError::DuplicateTarget` before anything runs, otherwise the first
/// job failure.
pub fn apply_many(
    jobs: Vec<TransformJob>,
    options: &TransformOptions,
) -> Result<Vec<TransformReport>, EditError> {
    let mut seen = HashSet::new();
    for job in &jobs {
        if !seen.insert(job.path.clone()) {
            return Err(EditError::DuplicateTarget(job.path.display().to_string()));
        }
    }

    tracing::debug!(files = jobs.len(), "applying transforms");
    let results: Vec<Result<TransformReport, EditError>> = jobs
        .into_par_iter()
        .map(|job| apply_transform_with(&job.path, options, job.transform))
        .collect();

    results.into_iter().collect()
}
