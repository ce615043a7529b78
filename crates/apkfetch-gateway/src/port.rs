//! `StoreClientPort` implementation for `GatewayStoreClient`.

use apkfetch_core::ports::{
    PackageDelivery, StoreClientError, StoreClientPort, StoreClientResult, StoreSession,
};
use apkfetch_core::{LocaleProfile, PackageId};
use async_trait::async_trait;

use crate::client::GatewayStoreClient;
use crate::error::GatewayError;

/// Convert internal `GatewayError` to core `StoreClientError`.
fn map_error(err: GatewayError) -> StoreClientError {
    match err {
        GatewayError::Unauthorized { status } => {
            StoreClientError::authentication(format!("gateway answered {status}"))
        }
        GatewayError::PackageNotFound { package } => StoreClientError::package_not_found(package),
        GatewayError::ApiRequestFailed { status, url } => StoreClientError::network_with_status(
            format!("request to {url} failed with status {status}"),
            status,
        ),
        GatewayError::InvalidResponse { message } => StoreClientError::invalid_response(message),
        err @ GatewayError::Stalled { .. } => StoreClientError::transfer_interrupted(err.to_string()),
        GatewayError::Network(e) => match e.status() {
            Some(status) => StoreClientError::network_with_status(e.to_string(), status.as_u16()),
            None => StoreClientError::network(e.to_string()),
        },
        GatewayError::InvalidUrl(e) => StoreClientError::invalid_response(format!(
            "unusable download URL: {e}"
        )),
        GatewayError::JsonParse(e) => StoreClientError::invalid_response(e.to_string()),
    }
}

#[async_trait]
impl StoreClientPort for GatewayStoreClient {
    async fn authenticate(
        &self,
        numeric_id: u64,
        auth_token: &str,
        profile: &LocaleProfile,
    ) -> StoreClientResult<StoreSession> {
        self.open_session(numeric_id, auth_token, profile)
            .await
            .map_err(map_error)
    }

    async fn fetch(
        &self,
        session: &StoreSession,
        package_id: &PackageId,
    ) -> StoreClientResult<PackageDelivery> {
        self.request_package(session, package_id.as_str())
            .await
            .map_err(map_error)
    }
}
