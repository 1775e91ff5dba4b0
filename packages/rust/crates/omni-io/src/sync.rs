//! Synchronous file I/O operations.
//!
//! Used by the transform pipeline, which runs on rayon worker threads.

use std::fs as std_fs;
use std::io::{Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::detect::decode_buffer;
use crate::error::IoError;

/// Read text from a file with size and binary checks (synchronous).
///
/// # Errors
/// `NotFound`, `TooLarge`, `BinaryFile`, `Encoding` or a system error.
pub fn read_text_safe<P: AsRef<Path>>(path: P, max_bytes: u64) -> Result<String, IoError> {
    let path = path.as_ref();

    let metadata = std_fs::metadata(path)
        .map_err(|_| IoError::NotFound(path.to_string_lossy().to_string()))?;

    if metadata.len() > max_bytes {
        return Err(IoError::TooLarge(metadata.len(), max_bytes));
    }

    let mut file = std_fs::File::open(path)?;
    let mut buffer = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or_default());
    file.read_to_end(&mut buffer)?;

    decode_buffer(buffer)
}

/// Replace a file's content atomically.
///
/// The content goes to a temporary file in the destination's directory, is
/// synced, then renamed over the destination. Readers never observe a
/// half-written file. An existing file keeps its permissions.
///
/// # Errors
/// A system error while writing, or `IoError::Persist` if the rename fails.
pub fn write_text_atomic<P: AsRef<Path>>(path: P, content: &str) -> Result<(), IoError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let permissions = std_fs::metadata(path).ok().map(|m| m.permissions());

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    if let Some(permissions) = permissions {
        tmp.as_file().set_permissions(permissions)?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| IoError::Persist {
        path: path.display().to_string(),
        source: e.error,
    })?;

    tracing::trace!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}
