//! `AppCore`: the request pipeline facade used by every adapter.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use super::credential_pool::CredentialPool;
use super::orchestrator::DownloadOrchestrator;
use crate::domain::{InvalidPackageId, PackageId, StoredArtifact};
use crate::download::{DownloadError, DownloadResult};
use crate::ports::{ArtifactError, ArtifactStorePort, StoreClientPort};

/// Error from the `/process` pipeline.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The package identifier failed syntax validation.
    #[error(transparent)]
    InvalidPackage(#[from] InvalidPackageId),

    /// The download itself failed.
    #[error(transparent)]
    Download(#[from] DownloadError),
}

/// Validate → rotate credential → download.
pub struct AppCore {
    pool: Arc<CredentialPool>,
    orchestrator: DownloadOrchestrator,
    artifacts: Arc<dyn ArtifactStorePort>,
}

impl AppCore {
    pub fn new(
        pool: Arc<CredentialPool>,
        client: Arc<dyn StoreClientPort>,
        artifacts: Arc<dyn ArtifactStorePort>,
    ) -> Self {
        Self {
            pool,
            orchestrator: DownloadOrchestrator::new(client, Arc::clone(&artifacts)),
            artifacts,
        }
    }

    /// Download a package by its raw identifier.
    ///
    /// An invalid identifier is rejected before a credential is taken from
    /// the pool, so rejected requests leave the rotation untouched.
    pub async fn process(&self, raw_package: &str) -> Result<DownloadResult, ProcessError> {
        let package_id = PackageId::parse(raw_package)?;
        let (index, credential) = self.pool.next_indexed();

        debug!(
            target: "apkfetch.process",
            package = %package_id,
            credential_index = index,
            pool_size = self.pool.len(),
            "Selected credential",
        );

        Ok(self.orchestrator.download(&package_id, &credential).await?)
    }

    /// Look up a stored artifact.
    pub async fn artifact(&self, filename: &str) -> Result<StoredArtifact, ArtifactError> {
        self.artifacts.open(filename).await
    }

    /// List stored artifacts.
    pub async fn artifacts(&self) -> Result<Vec<StoredArtifact>, ArtifactError> {
        self.artifacts.list().await
    }

    pub fn credential_pool(&self) -> &CredentialPool {
        &self.pool
    }
}
