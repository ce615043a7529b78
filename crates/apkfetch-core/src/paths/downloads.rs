//! Downloads directory resolution.
//!
//! Resolution order:
//! 1. Explicit path provided by caller (highest priority)
//! 2. `APKFETCH_DOWNLOADS_DIR` environment variable
//! 3. `./Downloads` relative to the working directory

use std::env;
use std::path::{Path, PathBuf};

use super::error::PathError;

/// Environment variable overriding the downloads directory.
pub const DOWNLOADS_DIR_ENV: &str = "APKFETCH_DOWNLOADS_DIR";

/// Default downloads directory, relative to the working directory.
pub const DEFAULT_DOWNLOADS_DIR: &str = "Downloads";

/// How the downloads directory was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadsDirSource {
    /// Passed explicitly (CLI flag).
    Explicit,
    /// Taken from `APKFETCH_DOWNLOADS_DIR`.
    EnvVar,
    /// Fallback default.
    Default,
}

/// Resolution result for the downloads directory.
#[derive(Debug, Clone)]
pub struct DownloadsDirResolution {
    /// Absolute path to the downloads directory.
    pub path: PathBuf,
    /// How the path was determined.
    pub source: DownloadsDirSource,
}

/// Resolve the downloads directory from an explicit override, env var, or default.
pub fn resolve_downloads_dir(explicit: Option<&str>) -> Result<DownloadsDirResolution, PathError> {
    let cwd = env::current_dir().map_err(|e| PathError::CurrentDirError(e.to_string()))?;
    resolve_downloads_dir_from(explicit, env::var(DOWNLOADS_DIR_ENV).ok().as_deref(), &cwd)
}

/// Pure resolver: same rules as [`resolve_downloads_dir`] with injected inputs.
pub fn resolve_downloads_dir_from(
    explicit: Option<&str>,
    env_value: Option<&str>,
    cwd: &Path,
) -> Result<DownloadsDirResolution, PathError> {
    if let Some(path) = explicit {
        return Ok(DownloadsDirResolution {
            path: absolutize(path, cwd)?,
            source: DownloadsDirSource::Explicit,
        });
    }

    if let Some(path) = env_value.filter(|v| !v.trim().is_empty()) {
        return Ok(DownloadsDirResolution {
            path: absolutize(path, cwd)?,
            source: DownloadsDirSource::EnvVar,
        });
    }

    Ok(DownloadsDirResolution {
        path: cwd.join(DEFAULT_DOWNLOADS_DIR),
        source: DownloadsDirSource::Default,
    })
}

fn absolutize(raw: &str, cwd: &Path) -> Result<PathBuf, PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::EmptyPath);
    }
    let path = PathBuf::from(trimmed);
    Ok(if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    })
}
