//! Diff generation utilities.
//!
//! Provides unified diff output for transform reports using the `similar` crate.

use similar::TextDiff;

/// Generate a unified diff between two versions of `path`.
///
/// Returns an empty string when the contents are identical.
#[must_use]
pub fn generate_unified_diff(path: &str, original: &str, modified: &str) -> String {
    if original == modified {
        return String::new();
    }

    let old_header = format!("a/{path}");
    let new_header = format!("b/{path}");
    TextDiff::from_lines(original, modified)
        .unified_diff()
        .context_radius(3)
        .header(&old_header, &new_header)
        .to_string()
}
