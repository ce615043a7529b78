//! Stored artifacts and their canonical filenames.

use std::path::PathBuf;

use serde::Serialize;

/// File extension of every stored artifact.
pub const ARTIFACT_EXTENSION: &str = "apk";

/// Derive the stored filename for a package version.
///
/// Format: `<package>_<version_string>(<version_code>).apk`. Stable for equal
/// inputs so that re-downloading the same version overwrites the file.
pub fn artifact_filename(package_id: &str, version_string: &str, version_code: i64) -> String {
    format!("{package_id}_{version_string}({version_code}).{ARTIFACT_EXTENSION}")
}

/// Whether `name` is usable as a plain file name inside the downloads directory.
///
/// Rejects empty names, path separators, control characters, `.`/`..` and
/// hidden names (temporary files use a leading dot). Accepted names are
/// always representable in a `Content-Disposition` header.
pub fn is_valid_artifact_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\'])
        && !name.chars().any(char::is_control)
}

/// A downloaded package persisted in the downloads directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredArtifact {
    /// Name within the downloads directory.
    pub filename: String,
    /// Absolute location on disk.
    #[serde(skip)]
    pub path: PathBuf,
    /// Size in bytes.
    pub size_bytes: u64,
}
