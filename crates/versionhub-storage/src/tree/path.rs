//! Normalisation of user-supplied paths inside a file tree.

use versionhub_core::error::TreeError;

/// Normalise a path relative to a user's files root.
///
/// Leading slashes, empty segments, and `.` segments are dropped. Any `..`
/// segment is refused, so the result can never escape the root.
pub fn normalize(path: &str) -> Result<String, TreeError> {
    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                return Err(TreeError::Forbidden(format!(
                    "path escapes the user folder: {path}"
                )));
            }
            s if s.contains('\0') || s.contains('\\') => {
                return Err(TreeError::Forbidden(format!("invalid path: {path}")));
            }
            s => segments.push(s),
        }
    }
    Ok(segments.join("/"))
}
