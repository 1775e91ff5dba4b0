//! Asynchronous file I/O operations.
//!
//! Powered by Tokio. Copies in one batch run concurrently and the batch waits
//! for all of them before reporting.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tokio::fs as tokio_fs;
use tokio::io::AsyncReadExt;
use tokio::task::JoinSet;

use crate::detect::decode_buffer;
use crate::error::IoError;

/// Read text from a file with size and binary checks (asynchronous).
///
/// # Errors
/// Same failure modes as [`crate::read_text_safe`].
pub async fn read_text_safe_async<P: AsRef<Path>>(
    path: P,
    max_bytes: u64,
) -> Result<String, IoError> {
    let path = path.as_ref();

    let metadata = tokio_fs::metadata(path)
        .await
        .map_err(|_| IoError::NotFound(path.to_string_lossy().to_string()))?;

    if metadata.len() > max_bytes {
        return Err(IoError::TooLarge(metadata.len(), max_bytes));
    }

    let mut file = tokio_fs::File::open(path).await?;
    let mut buffer = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or_default());
    file.read_to_end(&mut buffer).await?;

    decode_buffer(buffer)
}

/// Copy one file, creating the destination's parent directories.
///
/// # Errors
/// `IoError::NotFound` if the source is missing, otherwise a system error.
pub async fn copy_file_async<S, D>(src: S, dest: D) -> Result<(), IoError>
where
    S: AsRef<Path>,
    D: AsRef<Path>,
{
    let (src, dest) = (src.as_ref(), dest.as_ref());

    if tokio_fs::metadata(src).await.is_err() {
        return Err(IoError::NotFound(src.to_string_lossy().to_string()));
    }
    if let Some(parent) = dest.parent() {
        tokio_fs::create_dir_all(parent).await?;
    }
    tokio_fs::copy(src, dest).await?;

    tracing::debug!(src = %src.display(), dest = %dest.display(), "copied");
    Ok(())
}

/// Copy many `(source, destination)` pairs concurrently.
///
/// Destinations must be pairwise distinct. Every copy is awaited even when
/// one fails; the first failure in input order is returned. On success the
/// destinations come back in input order.
///
/// # Errors
/// `IoError::DuplicateDestination` before anything is copied, otherwise the
/// first copy failure.
pub async fn copy_all_async(pairs: Vec<(PathBuf, PathBuf)>) -> Result<Vec<PathBuf>, IoError> {
    let mut seen = HashSet::new();
    for (_, dest) in &pairs {
        if !seen.insert(dest.clone()) {
            return Err(IoError::DuplicateDestination(dest.display().to_string()));
        }
    }

    let mut tasks = JoinSet::new();
    for (index, (src, dest)) in pairs.into_iter().enumerate() {
        tasks.spawn(async move {
            let result = copy_file_async(&src, &dest).await;
            (index, dest, result)
        });
    }

    let mut outcomes = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        outcomes.push(joined.map_err(|e| IoError::Task(e.to_string()))?);
    }
    outcomes.sort_by_key(|(index, _, _)| *index);

    let mut copied = Vec::with_capacity(outcomes.len());
    for (_, dest, result) in outcomes {
        result?;
        copied.push(dest);
    }
    Ok(copied)
}
