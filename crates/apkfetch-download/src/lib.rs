//! Filesystem artifact storage for apkfetch.
//!
//! Downloads are streamed into a hidden temporary file inside the downloads
//! directory and renamed onto their final name only once complete. The
//! directory listing is the only index of what has been downloaded.
#![deny(unused_crate_dependencies)]

// Re-export core types for convenience
pub use apkfetch_core::ports::{ArtifactError, ArtifactStorePort};
pub use apkfetch_core::StoredArtifact;

mod fs_store;

pub use fs_store::FsArtifactStore;
