//! Axum-specific error types and mappings.
//!
//! This is the one place where core errors become HTTP statuses and bodies.
//! Every failure is logged at error level here; internal details never
//! reach the response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use apkfetch_core::{ArtifactError, DownloadError, ProcessError};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Package identifier failed syntax validation.
    #[error("Not valid package: {0}")]
    InvalidPackage(String),

    /// Download failed in a way the caller is told about.
    #[error("Download of {package} rejected: {status}")]
    DownloadRejected {
        package: String,
        status: &'static str,
    },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

/// Body of a rejected download: `{package, status}`.
#[derive(Serialize)]
struct RejectedBody<'a> {
    package: &'a str,
    status: &'a str,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::DownloadRejected { package, status } => {
                let body = RejectedBody { package, status };
                return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
            }
            Self::InvalidPackage(_) => (StatusCode::BAD_REQUEST, "Not valid package".to_string()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<ProcessError> for HttpError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::InvalidPackage(invalid) => {
                error!(target: "apkfetch.process", input = %invalid.input, "Not valid package");
                Self::InvalidPackage(invalid.input)
            }
            ProcessError::Download(err) => match (err.user_status(), err) {
                (Some(status), DownloadError::Failed(failure)) => {
                    error!(
                        target: "apkfetch.process",
                        package = %failure.package_id,
                        kind = ?failure.kind,
                        error = %failure,
                        "Download failed",
                    );
                    Self::DownloadRejected {
                        status,
                        package: failure.package_id,
                    }
                }
                (_, err) => {
                    error!(target: "apkfetch.process", error = %err, "Download failed with internal error");
                    Self::Internal(err.to_string())
                }
            },
        }
    }
}

impl From<ArtifactError> for HttpError {
    fn from(err: ArtifactError) -> Self {
        match err {
            ArtifactError::NotFound { filename } => {
                Self::NotFound(format!("Artifact not found: {filename}"))
            }
            other => {
                error!(target: "apkfetch.download", error = %other, "Artifact storage failed");
                Self::Internal(other.to_string())
            }
        }
    }
}
