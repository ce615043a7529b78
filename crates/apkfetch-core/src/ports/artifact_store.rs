//! Artifact storage port.

use async_trait::async_trait;
use thiserror::Error;

use super::store_client::{PackageStream, StoreClientError};
use crate::domain::StoredArtifact;

/// Errors from artifact storage operations.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// No artifact is stored under this name.
    #[error("Artifact not found: {filename}")]
    NotFound { filename: String },

    /// Local file operation failed.
    #[error("I/O error ({kind}): {message}")]
    Io { kind: String, message: String },

    /// The incoming byte stream failed while it was being written.
    #[error("Source stream failed: {0}")]
    Source(#[from] StoreClientError),
}

impl ArtifactError {
    pub fn not_found(filename: impl Into<String>) -> Self {
        Self::NotFound {
            filename: filename.into(),
        }
    }

    /// Capture a `std::io::Error` as kind and message.
    #[must_use]
    pub fn from_io_error(err: &std::io::Error) -> Self {
        Self::Io {
            kind: format!("{:?}", err.kind()),
            message: err.to_string(),
        }
    }
}

/// Port for persisting and retrieving downloaded packages.
#[async_trait]
pub trait ArtifactStorePort: Send + Sync {
    /// Stream `data` into storage under `filename`.
    ///
    /// The artifact becomes visible under `filename` only once the stream
    /// has been fully written; on failure nothing is left behind.
    async fn write(
        &self,
        filename: &str,
        data: PackageStream,
    ) -> Result<StoredArtifact, ArtifactError>;

    /// Look up a stored artifact by name.
    async fn open(&self, filename: &str) -> Result<StoredArtifact, ArtifactError>;

    /// All stored artifacts, sorted by name.
    async fn list(&self) -> Result<Vec<StoredArtifact>, ArtifactError>;
}
