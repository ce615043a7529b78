//! Download result types.

use serde::Serialize;

use crate::domain::PackageId;

/// Metadata of a completed download.
///
/// Serialized in the shape HTTP callers receive:
/// `{package, filename, version, version_code}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadResult {
    #[serde(rename = "package")]
    pub package_id: PackageId,
    #[serde(rename = "filename")]
    pub stored_filename: String,
    #[serde(rename = "version")]
    pub version_string: String,
    pub version_code: i64,
    /// Bytes written to storage.
    #[serde(skip)]
    pub size_bytes: u64,
}
