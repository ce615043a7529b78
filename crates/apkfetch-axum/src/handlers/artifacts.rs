//! Stored artifact handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, header};
use axum::response::Response;
use apkfetch_core::StoredArtifact;
use tokio_util::io::ReaderStream;

use crate::error::HttpError;
use crate::state::AppState;

/// MIME type of Android packages.
pub const APK_CONTENT_TYPE: &str = "application/vnd.android.package-archive";

/// Stream a stored artifact as an attachment.
pub async fn download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, HttpError> {
    let artifact = state.core.artifact(&filename).await?;

    let file = match tokio::fs::File::open(&artifact.path).await {
        Ok(file) => file,
        // Deleted between lookup and open.
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(HttpError::NotFound(format!(
                "Artifact not found: {}",
                artifact.filename
            )));
        }
        Err(e) => return Err(HttpError::Internal(format!("open {filename}: {e}"))),
    };
    // Length of the file actually opened; a concurrent download may have
    // replaced the name since the lookup.
    let len = file
        .metadata()
        .await
        .map_err(|e| HttpError::Internal(format!("stat {filename}: {e}")))?
        .len();

    let disposition = HeaderValue::from_bytes(
        format!(
            "attachment; filename=\"{}\"",
            artifact.filename.replace('"', "\\\"")
        )
        .as_bytes(),
    )
    .map_err(|e| HttpError::Internal(format!("content-disposition for {filename}: {e}")))?;

    tracing::debug!(
        target: "apkfetch.download",
        filename = %artifact.filename,
        bytes = len,
        "Serving artifact",
    );

    Response::builder()
        .header(header::CONTENT_TYPE, APK_CONTENT_TYPE)
        .header(header::CONTENT_LENGTH, len)
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|e| HttpError::Internal(e.to_string()))
}

/// List stored artifacts as `[{filename, size_bytes}]`.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<StoredArtifact>>, HttpError> {
    Ok(Json(state.core.artifacts().await?))
}
