//! Domain types for apkfetch.
//!
//! Plain data and pure functions: no I/O, no adapters.

mod artifact;
mod credential;
mod package;

pub use artifact::{
    ARTIFACT_EXTENSION, StoredArtifact, artifact_filename, is_valid_artifact_name,
};
pub use credential::{AccountsConfig, Credential, LocaleProfile};
pub use package::{InvalidPackageId, PackageId, validate};
