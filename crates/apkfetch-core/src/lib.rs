//! Core domain, ports and services for apkfetch.
//!
//! - `domain` - package identifiers, credentials, artifact naming
//! - `download` - download results and the failure taxonomy
//! - `ports` - traits for the remote store client and artifact storage
//! - `services` - credential rotation, download orchestration, `AppCore`
//! - `paths` - downloads directory resolution
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod download;
pub mod paths;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    ARTIFACT_EXTENSION, AccountsConfig, Credential, InvalidPackageId, LocaleProfile, PackageId,
    StoredArtifact, artifact_filename, is_valid_artifact_name, validate,
};
pub use download::{DownloadError, DownloadFailure, DownloadFailureKind, DownloadResult};
pub use ports::{
    ArtifactError, ArtifactStorePort, CoreError, PackageDelivery, PackageStream,
    StoreClientError, StoreClientPort, StoreClientResult, StoreSession,
};
pub use services::{AppCore, CredentialPool, DownloadOrchestrator, ProcessError};

pub use paths::{
    DownloadsDirResolution, DownloadsDirSource, PathError, ensure_directory,
    resolve_downloads_dir,
};
