//! Gateway wire types.

use serde::{Deserialize, Serialize};

/// Body of `POST /auth`.
#[derive(Debug, Serialize)]
pub struct AuthRequest<'a> {
    pub gsf_id: u64,
    pub token: &'a str,
    pub lang: &'a str,
    pub timezone: &'a str,
    pub device: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub session: String,
}

/// Body of `GET /packages/{id}`. Any field may be missing.
#[derive(Debug, Default, Deserialize)]
pub struct PackageDetails {
    #[serde(default)]
    pub version_string: Option<String>,
    #[serde(default)]
    pub version_code: Option<i64>,
    #[serde(default)]
    pub download_url: Option<String>,
}
