//! Internal error types for gateway operations.
//!
//! These errors are internal to `apkfetch-gateway` and are mapped to
//! `StoreClientError` at the port boundary.

use thiserror::Error;

/// Result type alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The gateway refused the account or the session.
    #[error("Gateway rejected credentials with status {status}")]
    Unauthorized { status: u16 },

    /// The package does not exist or is not available to this account.
    #[error("Package '{package}' not found on the store")]
    PackageNotFound { package: String },

    /// Request failed with an unexpected HTTP status.
    #[error("Gateway request failed with status {status}: {url}")]
    ApiRequestFailed { status: u16, url: String },

    /// The gateway answered with a body that does not match the protocol.
    #[error("Invalid response from gateway: {message}")]
    InvalidResponse { message: String },

    /// No data arrived from the gateway within the read timeout.
    #[error("Gateway sent no data for {seconds}s: {url}")]
    Stalled { seconds: u64, url: String },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
