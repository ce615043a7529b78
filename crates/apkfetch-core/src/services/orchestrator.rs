//! Download orchestration: authenticate, fetch, stream to storage.
//!
//! One attempt per request. Known failure shapes of the remote are
//! classified into [`DownloadFailureKind`]s; local storage failures stay
//! internal faults.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{Credential, PackageId, artifact_filename, is_valid_artifact_name};
use crate::download::{DownloadError, DownloadFailure, DownloadFailureKind, DownloadResult};
use crate::ports::{
    ArtifactError, ArtifactStorePort, PackageDelivery, StoreClientError, StoreClientPort,
};

/// Drives a single authenticated package download.
pub struct DownloadOrchestrator {
    client: Arc<dyn StoreClientPort>,
    artifacts: Arc<dyn ArtifactStorePort>,
}

impl DownloadOrchestrator {
    pub fn new(client: Arc<dyn StoreClientPort>, artifacts: Arc<dyn ArtifactStorePort>) -> Self {
        Self { client, artifacts }
    }

    /// Download `package_id` using `credential` and persist it.
    pub async fn download(
        &self,
        package_id: &PackageId,
        credential: &Credential,
    ) -> Result<DownloadResult, DownloadError> {
        let package = package_id.as_str();

        debug!(
            target: "apkfetch.download",
            package,
            numeric_id = credential.numeric_id,
            device = %credential.device_profile,
            "Authenticating store session",
        );
        let session = self
            .client
            .authenticate(
                credential.numeric_id,
                &credential.auth_token,
                &credential.locale_profile(),
            )
            .await
            .map_err(|e| DownloadFailure::authentication_or_transport(package, e.to_string()))?;

        let delivery = self
            .client
            .fetch(&session, package_id)
            .await
            .map_err(|e| classify(package, e))?;

        let (version_string, version_code, data) = match delivery {
            PackageDelivery {
                version_string: Some(version_string),
                version_code: Some(version_code),
                data: Some(data),
            } => (version_string, version_code, data),
            incomplete => {
                return Err(DownloadFailure::metadata_unavailable(
                    package,
                    describe_missing(&incomplete),
                )
                .into());
            }
        };

        let filename = artifact_filename(package, &version_string, version_code);
        if !is_valid_artifact_name(&filename) {
            return Err(DownloadFailure::metadata_unavailable(
                package,
                format!("unusable version string '{version_string}'"),
            )
            .into());
        }

        debug!(
            target: "apkfetch.download",
            package,
            filename = %filename,
            "Streaming package to storage",
        );
        let stored = self
            .artifacts
            .write(&filename, data)
            .await
            .map_err(|e| match e {
                ArtifactError::Source(source) => DownloadError::Failed(classify(package, source)),
                other => DownloadError::Storage(other),
            })?;

        info!(
            target: "apkfetch.download",
            package,
            filename = %stored.filename,
            version = %version_string,
            version_code,
            bytes = stored.size_bytes,
            "Package downloaded",
        );

        Ok(DownloadResult {
            package_id: package_id.clone(),
            stored_filename: stored.filename,
            version_string,
            version_code,
            size_bytes: stored.size_bytes,
        })
    }
}

/// Map a store client signal onto the download failure taxonomy.
fn classify(package: &str, err: StoreClientError) -> DownloadFailure {
    let kind = match err {
        StoreClientError::TransferInterrupted { .. } => DownloadFailureKind::TransferInterrupted,
        StoreClientError::PackageNotFound { .. } | StoreClientError::InvalidResponse { .. } => {
            DownloadFailureKind::MetadataUnavailable
        }
        StoreClientError::Authentication { .. }
        | StoreClientError::Network { .. }
        | StoreClientError::Configuration { .. } => DownloadFailureKind::AuthenticationOrTransport,
    };
    DownloadFailure::new(kind, package, Some(err.to_string()))
}

fn describe_missing(delivery: &PackageDelivery) -> String {
    let missing: Vec<&str> = [
        ("version string", delivery.version_string.is_none()),
        ("version code", delivery.version_code.is_none()),
        ("data stream", delivery.data.is_none()),
    ]
    .into_iter()
    .filter_map(|(name, absent)| absent.then_some(name))
    .collect();
    format!("store response is missing {}", missing.join(", "))
}
