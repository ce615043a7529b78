//! Directory creation and verification utilities.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use super::error::PathError;

/// Ensure the provided directory exists and is writable, creating it and
/// any missing parents.
///
/// Idempotent: an existing, writable directory is left as is.
pub fn ensure_directory(path: &Path) -> Result<(), PathError> {
    if path.exists() {
        if !path.is_dir() {
            return Err(PathError::NotADirectory(path.to_path_buf()));
        }
    } else {
        fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    }

    verify_writable(path)
}

/// Verify a directory is writable by attempting to create a test file.
fn verify_writable(path: &Path) -> Result<(), PathError> {
    let test_file = path.join(".apkfetch_write_test");
    let not_writable = |reason: String| PathError::NotWritable {
        path: path.to_path_buf(),
        reason,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&test_file)
        .map_err(|e| not_writable(e.to_string()))?;
    file.write_all(b"test")
        .map_err(|e| not_writable(e.to_string()))?;
    drop(file);
    let _ = fs::remove_file(&test_file);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_missing_directory() {
        let temp = tempdir().unwrap();
        let target = temp.path().join("a").join("Downloads");

        ensure_directory(&target).unwrap();
        assert!(target.is_dir());

        // Second call is a no-op.
        ensure_directory(&target).unwrap();
        assert!(!target.join(".apkfetch_write_test").exists());
    }

    #[test]
    fn file_in_place_of_directory_is_rejected() {
        let temp = tempdir().unwrap();
        let target = temp.path().join("Downloads");
        fs::write(&target, b"not a dir").unwrap();

        let err = ensure_directory(&target).unwrap_err();
        assert!(matches!(err, PathError::NotADirectory(_)));
    }
}
