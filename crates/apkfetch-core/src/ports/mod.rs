//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.

pub mod artifact_store;
pub mod store_client;

use thiserror::Error;

pub use artifact_store::{ArtifactError, ArtifactStorePort};
pub use store_client::{
    PackageDelivery, PackageStream, StoreClientError, StoreClientPort, StoreClientResult,
    StoreSession,
};

#[cfg(test)]
pub use store_client::MockStoreClientPort;

/// Core errors that are not tied to a single request.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Startup configuration is unusable.
    #[error("Configuration error: {0}")]
    Configuration(String),
}
