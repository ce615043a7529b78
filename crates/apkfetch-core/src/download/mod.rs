//! Download domain: result types and the failure taxonomy.

mod errors;
mod types;

pub use errors::{DownloadError, DownloadFailure, DownloadFailureKind};
pub use types::DownloadResult;
