//! Transform pipeline: read → parse → transform → serialize → write.
//!
//! One call is one atomic read-modify-write of one file. Nothing is written
//! unless parsing and the whole transform succeed.

use std::path::Path;

use omni_ast::{Lang, SourceTree};

use crate::error::EditError;
use crate::types::{TransformOptions, TransformReport};

/// Transform source text in memory.
///
/// # Errors
/// `EditError::Ast` if `source` does not parse, or whatever `transform` returns.
pub fn update_source<F>(source: &str, lang: Lang, transform: F) -> Result<String, EditError>
where
    F: FnOnce(&mut SourceTree) -> Result<(), EditError>,
{
    let mut tree = SourceTree::parse(source, lang)?;
    transform(&mut tree)?;
    Ok(tree.into_source())
}

/// Apply `transform` to the file at `path` with default options.
///
/// # Errors
/// See [`apply_transform_with`].
pub fn apply_transform<P, F>(path: P, transform: F) -> Result<TransformReport, EditError>
where
    P: AsRef<Path>,
    F: FnOnce(&mut SourceTree) -> Result<(), EditError>,
{
    apply_transform_with(path, &TransformOptions::default(), transform)
}

/// Apply `transform` to the file at `path`.
///
/// The grammar is picked from the file extension. The file is rewritten
/// atomically, and only when the content changed and `dry_run` is off.
///
/// # Errors
/// `EditError::Io` if reading or writing fails, `EditError::Parse` if the
/// file is not valid source, or the transform's own error.
pub fn apply_transform_with<P, F>(
    path: P,
    options: &TransformOptions,
    transform: F,
) -> Result<TransformReport, EditError>
where
    P: AsRef<Path>,
    F: FnOnce(&mut SourceTree) -> Result<(), EditError>,
{
    let path = path.as_ref();
    let original = omni_io::read_text_safe(path, options.max_file_size)?;

    let mut tree =
        SourceTree::parse(original.as_str(), Lang::for_path(path)).map_err(|source| {
            EditError::Parse {
                path: path.display().to_string(),
                source,
            }
        })?;
    transform(&mut tree)?;

    let mut report = TransformReport::new(path, original, tree.into_source());
    if report.changed && !options.dry_run {
        omni_io::write_text_atomic(path, &report.modified)?;
        report.written = true;
        tracing::info!(path = %path.display(), "transformed");
    } else {
        tracing::debug!(path = %path.display(), changed = report.changed, "not written");
    }
    Ok(report)
}

/// Format a transform report for display.
#[must_use]
pub fn format_report(report: &TransformReport) -> String {
    let mut output = format!("// TRANSFORM: {}\n", report.path.display());

    if !report.changed {
        output.push_str("[No changes]\n");
        return output;
    }
    if !report.written {
        output.push_str("[Dry run - not written]\n");
    }
    output.push_str("\n// Diff:\n");
    output.push_str(&report.diff);
    output
}
