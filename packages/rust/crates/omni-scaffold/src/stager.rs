//! File stager collaborator.
//!
//! Staging copies pre-authored files into the project before any transform
//! runs. Copies in one batch run concurrently and are all awaited.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use walkdir::WalkDir;

use crate::error::ScaffoldError;

/// Copies `(source, destination)` pairs.
#[async_trait]
pub trait FileStager: Send + Sync {
    /// Copy every pair; returns the destinations in input order.
    async fn stage(&self, pairs: Vec<(PathBuf, PathBuf)>) -> Result<Vec<PathBuf>, ScaffoldError>;
}

/// Stages through the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStager;

#[async_trait]
impl FileStager for FsStager {
    async fn stage(&self, pairs: Vec<(PathBuf, PathBuf)>) -> Result<Vec<PathBuf>, ScaffoldError> {
        let count = pairs.len();
        let copied = omni_io::copy_all_async(pairs).await?;
        tracing::debug!(count, "staged files");
        Ok(copied)
    }
}

/// Pairs copying every file under `source_root` to the same relative path
/// under `destination_root`, sorted by path.
///
/// # Errors
/// `ScaffoldError::Stage` if the tree cannot be walked.
pub fn tree_pairs(
    source_root: &Path,
    destination_root: &Path,
) -> Result<Vec<(PathBuf, PathBuf)>, ScaffoldError> {
    let mut pairs = Vec::new();
    for entry in WalkDir::new(source_root).sort_by_file_name() {
        let entry = entry.map_err(|e| ScaffoldError::Stage(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(source_root)
            .map_err(|e| ScaffoldError::Stage(e.to_string()))?;
        pairs.push((entry.path().to_path_buf(), destination_root.join(relative)));
    }
    Ok(pairs)
}
