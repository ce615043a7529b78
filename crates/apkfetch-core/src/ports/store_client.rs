//! Remote store client port.
//!
//! The wire protocol, authentication handshake and transfer mechanics of the
//! remote store are owned by an adapter (see `apkfetch-gateway`). The core
//! only sees this trait and the DTOs below.

use std::fmt;
use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures_core::Stream;
use thiserror::Error;

use crate::domain::{LocaleProfile, PackageId};

/// Errors signalled by a store client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreClientError {
    /// Session setup was refused (bad or expired token, unknown device).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The package does not exist or is not accessible with this account.
    #[error("Package not found: {package}")]
    PackageNotFound { package: String },

    /// The store answered with something that cannot be interpreted.
    #[error("Invalid store response: {message}")]
    InvalidResponse { message: String },

    /// The package body broke off before it was complete.
    #[error("Transfer interrupted: {message}")]
    TransferInterrupted { message: String },

    /// Connectivity or unexpected HTTP failure.
    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
    },

    /// The client itself is misconfigured.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl StoreClientError {
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn package_not_found(package: impl Into<String>) -> Self {
        Self::PackageNotFound {
            package: package.into(),
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    pub fn transfer_interrupted(message: impl Into<String>) -> Self {
        Self::TransferInterrupted {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            status_code: None,
        }
    }

    pub fn network_with_status(message: impl Into<String>, status_code: u16) -> Self {
        Self::Network {
            message: message.into(),
            status_code: Some(status_code),
        }
    }
}

/// Result type alias for store client operations.
pub type StoreClientResult<T> = Result<T, StoreClientError>;

/// Lazy, finite, non-restartable sequence of package body chunks.
pub type PackageStream = Pin<Box<dyn Stream<Item = StoreClientResult<Bytes>> + Send>>;

/// An authenticated session with the remote store.
#[derive(Clone)]
pub struct StoreSession {
    /// Opaque session token issued by the store.
    pub token: String,
    /// Locale/device shape the session was opened with.
    pub profile: LocaleProfile,
}

impl fmt::Debug for StoreSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreSession")
            .field("token", &"<redacted>")
            .field("profile", &self.profile)
            .finish()
    }
}

/// What the store returned for a package request.
///
/// Every field is optional: a store may answer without version details or
/// without a body, and deciding what that means is the orchestrator's job.
pub struct PackageDelivery {
    pub version_string: Option<String>,
    pub version_code: Option<i64>,
    pub data: Option<PackageStream>,
}

impl fmt::Debug for PackageDelivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackageDelivery")
            .field("version_string", &self.version_string)
            .field("version_code", &self.version_code)
            .field("data", &self.data.as_ref().map(|_| "<stream>"))
            .finish()
    }
}

/// Port trait for the remote app store.
///
/// Implementations must not retry on their own; the single-attempt policy
/// belongs to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreClientPort: Send + Sync {
    /// Open a session for one account.
    async fn authenticate(
        &self,
        numeric_id: u64,
        auth_token: &str,
        profile: &LocaleProfile,
    ) -> StoreClientResult<StoreSession>;

    /// Request a package: version metadata plus a body stream.
    async fn fetch(
        &self,
        session: &StoreSession,
        package_id: &PackageId,
    ) -> StoreClientResult<PackageDelivery>;
}
