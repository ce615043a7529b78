//! Path utilities for the downloads directory.
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O

mod downloads;
mod ensure;
mod error;

pub use downloads::{
    DEFAULT_DOWNLOADS_DIR, DOWNLOADS_DIR_ENV, DownloadsDirResolution, DownloadsDirSource,
    resolve_downloads_dir, resolve_downloads_dir_from,
};
pub use ensure::ensure_directory;
pub use error::PathError;
