//! Gateway HTTP client.

use std::time::Duration;

use apkfetch_core::ports::{PackageDelivery, StoreSession};
use apkfetch_core::{LocaleProfile, StoreClientError};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::body::package_stream;
use crate::config::GatewayClientConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::models::{AuthRequest, AuthResponse, PackageDetails};
use crate::url::{build_auth_url, build_package_url, resolve_download_url, same_origin};

/// Client for the store gateway.
///
/// Interact with it through the `StoreClientPort` trait.
#[derive(Debug, Clone)]
pub struct GatewayStoreClient {
    http: reqwest::Client,
    base_url: Url,
    request_timeout: Duration,
    read_timeout: Duration,
}

impl GatewayStoreClient {
    /// Create a client. Fails on an unparsable base URL or if the HTTP
    /// client cannot be built.
    pub fn new(config: &GatewayClientConfig) -> Result<Self, StoreClientError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| StoreClientError::Configuration {
            message: format!("invalid gateway URL '{}': {e}", config.base_url),
        })?;

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| StoreClientError::Configuration {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url,
            request_timeout: config.request_timeout,
            read_timeout: config.read_timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) async fn open_session(
        &self,
        numeric_id: u64,
        auth_token: &str,
        profile: &LocaleProfile,
    ) -> GatewayResult<StoreSession> {
        let url = build_auth_url(&self.base_url);
        let body = AuthRequest {
            gsf_id: numeric_id,
            token: auth_token,
            lang: &profile.language,
            timezone: &profile.timezone,
            device: &profile.device_profile,
        };

        let response = self
            .http
            .post(url.as_str())
            .timeout(self.request_timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(GatewayError::Unauthorized {
                status: status.as_u16(),
            });
        }
        let auth: AuthResponse = read_json(ensure_success(response, &url)?).await?;
        if auth.session.is_empty() {
            return Err(GatewayError::InvalidResponse {
                message: "gateway issued an empty session token".to_string(),
            });
        }

        debug!(
            target: "apkfetch.gateway",
            numeric_id,
            device = %profile.device_profile,
            "Session opened",
        );

        Ok(StoreSession {
            token: auth.session,
            profile: profile.clone(),
        })
    }

    pub(crate) async fn request_package(
        &self,
        session: &StoreSession,
        package_id: &str,
    ) -> GatewayResult<PackageDelivery> {
        let url = build_package_url(&self.base_url, package_id);
        let response = self
            .http
            .get(url.as_str())
            .timeout(self.request_timeout)
            .bearer_auth(&session.token)
            .header(reqwest::header::ACCEPT_LANGUAGE, &session.profile.language)
            .header("X-Timezone", &session.profile.timezone)
            .header("X-Device", &session.profile.device_profile)
            .send()
            .await?;

        let response = check_package_status(response, package_id, &url)?;
        let details: PackageDetails = read_json(response).await?;

        debug!(
            target: "apkfetch.gateway",
            package = package_id,
            version = ?details.version_string,
            version_code = ?details.version_code,
            has_download = details.download_url.is_some(),
            "Package details received",
        );

        let data = match details.download_url.as_deref() {
            Some(download_url) => {
                let download_url = resolve_download_url(&self.base_url, download_url)?;
                Some(self.open_body(session, package_id, &download_url).await?)
            }
            None => None,
        };

        Ok(PackageDelivery {
            version_string: details.version_string,
            version_code: details.version_code,
            data,
        })
    }

    async fn open_body(
        &self,
        session: &StoreSession,
        package_id: &str,
        url: &Url,
    ) -> GatewayResult<apkfetch_core::PackageStream> {
        let mut request = self.http.get(url.as_str());
        // The session only goes back to the gateway, never to a third-party host.
        if same_origin(&self.base_url, url) {
            request = request.bearer_auth(&session.token);
        }
        let response = tokio::time::timeout(self.read_timeout, request.send())
            .await
            .map_err(|_| GatewayError::Stalled {
                seconds: self.read_timeout.as_secs(),
                url: url.to_string(),
            })??;
        let response = check_package_status(response, package_id, url)?;
        let expected_len = response.content_length();

        debug!(
            target: "apkfetch.gateway",
            package = package_id,
            content_length = ?expected_len,
            "Package body opened",
        );

        Ok(package_stream(
            response.bytes_stream(),
            expected_len,
            self.read_timeout,
        ))
    }
}

fn check_package_status(response: Response, package_id: &str, url: &Url) -> GatewayResult<Response> {
    match response.status() {
        StatusCode::NOT_FOUND | StatusCode::GONE => Err(GatewayError::PackageNotFound {
            package: package_id.to_string(),
        }),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GatewayError::Unauthorized {
            status: response.status().as_u16(),
        }),
        _ => ensure_success(response, url),
    }
}

fn ensure_success(response: Response, url: &Url) -> GatewayResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(GatewayError::ApiRequestFailed {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

/// Read the whole body and decode it as JSON.
async fn read_json<T: DeserializeOwned>(response: Response) -> GatewayResult<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
