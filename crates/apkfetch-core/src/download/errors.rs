//! Download failure taxonomy.
//!
//! Expected failure shapes of a remote download are classified into a small
//! set of kinds that the boundary layer inspects explicitly. Everything that
//! does not fit is an internal fault.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::ports::ArtifactError;

/// Classified outcome of a failed download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadFailureKind {
    /// The remote body broke off mid-transfer. The caller may retry.
    TransferInterrupted,
    /// The package is missing, inaccessible, or came back without usable
    /// metadata or body.
    MetadataUnavailable,
    /// Session setup or transport failed in an unexpected way.
    AuthenticationOrTransport,
}

impl DownloadFailureKind {
    /// Short status string reported to HTTP callers, or `None` when the
    /// failure is ours and must surface as an internal error.
    #[must_use]
    pub const fn user_status(self) -> Option<&'static str> {
        match self {
            Self::TransferInterrupted => Some("download error"),
            Self::MetadataUnavailable => Some("not valid"),
            Self::AuthenticationOrTransport => None,
        }
    }
}

/// A classified download failure for one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadFailure {
    pub kind: DownloadFailureKind,
    pub package_id: String,
    pub message: Option<String>,
}

impl fmt::Display for DownloadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            DownloadFailureKind::TransferInterrupted => "Transfer interrupted",
            DownloadFailureKind::MetadataUnavailable => "Metadata unavailable",
            DownloadFailureKind::AuthenticationOrTransport => "Authentication or transport error",
        };
        write!(f, "{label} for package '{}'", self.package_id)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for DownloadFailure {}

impl DownloadFailure {
    pub fn new(
        kind: DownloadFailureKind,
        package_id: impl Into<String>,
        message: Option<String>,
    ) -> Self {
        Self {
            kind,
            package_id: package_id.into(),
            message,
        }
    }

    pub fn transfer_interrupted(package_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            DownloadFailureKind::TransferInterrupted,
            package_id,
            Some(message.into()),
        )
    }

    pub fn metadata_unavailable(package_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            DownloadFailureKind::MetadataUnavailable,
            package_id,
            Some(message.into()),
        )
    }

    pub fn authentication_or_transport(
        package_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(
            DownloadFailureKind::AuthenticationOrTransport,
            package_id,
            Some(message.into()),
        )
    }
}

/// Error type for the download orchestrator.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// A remote-side failure, classified.
    #[error(transparent)]
    Failed(#[from] DownloadFailure),

    /// Writing to local storage failed (disk full, permissions).
    #[error("Storage failure: {0}")]
    Storage(ArtifactError),
}

impl DownloadError {
    /// The classified kind, if this is a remote-side failure.
    #[must_use]
    pub const fn failure_kind(&self) -> Option<DownloadFailureKind> {
        match self {
            Self::Failed(failure) => Some(failure.kind),
            Self::Storage(_) => None,
        }
    }

    /// Status reported to HTTP callers; `None` for internal faults.
    #[must_use]
    pub const fn user_status(&self) -> Option<&'static str> {
        match self.failure_kind() {
            Some(kind) => kind.user_status(),
            None => None,
        }
    }
}
