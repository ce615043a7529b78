//! Package download handler.

use axum::Json;
use axum::extract::{Path, State};
use apkfetch_core::DownloadResult;

use crate::error::HttpError;
use crate::state::AppState;

/// Download a package with the next account in rotation and store it.
pub async fn process(
    State(state): State<AppState>,
    Path(package_id): Path<String>,
) -> Result<Json<DownloadResult>, HttpError> {
    let result = state.core.process(&package_id).await?;
    Ok(Json(result))
}
