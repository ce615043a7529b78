//! `ArtifactStorePort` backed by a flat directory.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use apkfetch_core::domain::{StoredArtifact, is_valid_artifact_name};
use apkfetch_core::paths::{PathError, ensure_directory};
use apkfetch_core::ports::{ArtifactError, ArtifactStorePort, PackageStream};

/// Prefix of in-flight download files. Names starting with `.` are never
/// served or listed.
const STAGING_PREFIX: &str = ".apkfetch-";
const STAGING_SUFFIX: &str = ".part";

/// Flat directory of downloaded packages.
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    /// Open the store rooted at `root`, creating the directory if missing
    /// and checking that it accepts writes.
    ///
    /// Called once at startup; requests never create directories.
    pub fn open_root(root: impl Into<PathBuf>) -> Result<Self, PathError> {
        let root = root.into();
        ensure_directory(&root)?;
        Ok(Self { root })
    }

    /// The downloads directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn artifact_path(&self, filename: &str) -> Option<PathBuf> {
        is_valid_artifact_name(filename).then(|| self.root.join(filename))
    }
}

fn io_error(err: &io::Error) -> ArtifactError {
    ArtifactError::from_io_error(err)
}

#[async_trait]
impl ArtifactStorePort for FsArtifactStore {
    async fn write(
        &self,
        filename: &str,
        mut data: PackageStream,
    ) -> Result<StoredArtifact, ArtifactError> {
        let final_path = self.artifact_path(filename).ok_or_else(|| ArtifactError::Io {
            kind: format!("{:?}", io::ErrorKind::InvalidInput),
            message: format!("refusing to write artifact named '{filename}'"),
        })?;

        // Each writer stages into its own file; the rename below is the
        // only step that touches `final_path`. Dropping `staged` (error or
        // cancelled future) deletes the staging file.
        let staged = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .suffix(STAGING_SUFFIX)
            .tempfile_in(&self.root)
            .map_err(|e| io_error(&e))?;
        let (std_file, staged_path) = staged.into_parts();
        let mut file = tokio::fs::File::from_std(std_file);

        let mut written: u64 = 0;
        while let Some(chunk) = data.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await.map_err(|e| io_error(&e))?;
            written += chunk.len() as u64;
        }

        file.flush().await.map_err(|e| io_error(&e))?;
        file.sync_all().await.map_err(|e| io_error(&e))?;
        drop(file);

        staged_path
            .persist(&final_path)
            .map_err(|e| io_error(&e.error))?;

        debug!(
            target: "apkfetch.download",
            path = %final_path.display(),
            bytes = written,
            "Artifact stored",
        );

        Ok(StoredArtifact {
            filename: filename.to_string(),
            path: final_path,
            size_bytes: written,
        })
    }

    async fn open(&self, filename: &str) -> Result<StoredArtifact, ArtifactError> {
        let path = self
            .artifact_path(filename)
            .ok_or_else(|| ArtifactError::not_found(filename))?;

        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(StoredArtifact {
                filename: filename.to_string(),
                path,
                size_bytes: meta.len(),
            }),
            Ok(_) => Err(ArtifactError::not_found(filename)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ArtifactError::not_found(filename)),
            Err(e) => Err(io_error(&e)),
        }
    }

    async fn list(&self) -> Result<Vec<StoredArtifact>, ArtifactError> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| io_error(&e))?;

        let mut artifacts = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| io_error(&e))? {
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                warn!(
                    target: "apkfetch.download",
                    path = %entry.path().display(),
                    "Skipping non UTF-8 file name",
                );
                continue;
            };
            if !is_valid_artifact_name(&name) {
                continue;
            }
            let meta = match entry.metadata().await {
                Ok(meta) if meta.is_file() => meta,
                Ok(_) => continue,
                // Removed between read_dir and metadata.
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(io_error(&e)),
            };
            artifacts.push(StoredArtifact {
                filename: name,
                path: entry.path(),
                size_bytes: meta.len(),
            });
        }

        artifacts.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apkfetch_core::ports::StoreClientError;
    use bytes::Bytes;
    use futures_util::stream;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::tempdir;

    fn chunks(parts: &[&'static [u8]]) -> PackageStream {
        let items: Vec<_> = parts
            .iter()
            .map(|p| Ok::<_, StoreClientError>(Bytes::from_static(p)))
            .collect();
        Box::pin(stream::iter(items))
    }

    fn dir_entries(path: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(path)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn open_root_creates_directory() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("Downloads");

        let store = FsArtifactStore::open_root(&root).unwrap();

        assert!(root.is_dir());
        assert_eq!(store.root(), root.as_path());
        assert!(dir_entries(&root).is_empty());
    }

    #[tokio::test]
    async fn write_streams_all_chunks_to_final_name() {
        let temp = tempdir().unwrap();
        let store = FsArtifactStore::open_root(temp.path()).unwrap();

        let stored = store
            .write("com.app_1.0(1).apk", chunks(&[b"PK", b"\x03\x04", b"payload"]))
            .await
            .unwrap();

        assert_eq!(stored.filename, "com.app_1.0(1).apk");
        assert_eq!(stored.size_bytes, 11);
        assert_eq!(
            std::fs::read(temp.path().join("com.app_1.0(1).apk")).unwrap(),
            b"PK\x03\x04payload"
        );
        assert_eq!(dir_entries(temp.path()), vec!["com.app_1.0(1).apk"]);
    }

    #[tokio::test]
    async fn interrupted_stream_leaves_nothing_behind() {
        let temp = tempdir().unwrap();
        let store = FsArtifactStore::open_root(temp.path()).unwrap();

        let broken: PackageStream = Box::pin(stream::iter(vec![
            Ok(Bytes::from_static(b"partial")),
            Err(StoreClientError::transfer_interrupted("connection reset")),
        ]));
        let err = store.write("com.app_1.0(1).apk", broken).await.unwrap_err();

        assert!(matches!(
            err,
            ArtifactError::Source(StoreClientError::TransferInterrupted { .. })
        ));
        assert!(dir_entries(temp.path()).is_empty());
    }

    #[tokio::test]
    async fn cancelled_write_removes_staging_file() {
        let temp = tempdir().unwrap();
        let store = FsArtifactStore::open_root(temp.path()).unwrap();

        let stalled: PackageStream = Box::pin(
            stream::iter(vec![Ok(Bytes::from_static(b"first"))]).chain(stream::pending()),
        );
        let outcome = tokio::time::timeout(
            Duration::from_millis(50),
            store.write("com.app_1.0(1).apk", stalled),
        )
        .await;

        assert!(outcome.is_err(), "write should still be pending");
        assert!(dir_entries(temp.path()).is_empty());
    }

    #[tokio::test]
    async fn rewrite_overwrites_previous_artifact() {
        let temp = tempdir().unwrap();
        let store = FsArtifactStore::open_root(temp.path()).unwrap();

        store.write("a.b_1(1).apk", chunks(&[b"old"])).await.unwrap();
        let stored = store
            .write("a.b_1(1).apk", chunks(&[b"newer"]))
            .await
            .unwrap();

        assert_eq!(stored.size_bytes, 5);
        assert_eq!(std::fs::read(&stored.path).unwrap(), b"newer");
        assert_eq!(dir_entries(temp.path()), vec!["a.b_1(1).apk"]);
    }

    #[tokio::test]
    async fn concurrent_writers_never_mix_content() {
        let temp = tempdir().unwrap();
        let store = Arc::new(FsArtifactStore::open_root(temp.path()).unwrap());

        let a: Vec<&'static [u8]> = vec![b"aaaa"; 64];
        let b: Vec<&'static [u8]> = vec![b"bbbb"; 64];

        let (ra, rb) = tokio::join!(
            store.write("same.name_1(1).apk", chunks(&a)),
            store.write("same.name_1(1).apk", chunks(&b)),
        );
        ra.unwrap();
        rb.unwrap();

        let content = std::fs::read(temp.path().join("same.name_1(1).apk")).unwrap();
        assert_eq!(content.len(), 256);
        assert!(content.iter().all(|&c| c == b'a') || content.iter().all(|&c| c == b'b'));
        assert_eq!(dir_entries(temp.path()), vec!["same.name_1(1).apk"]);
    }

    #[tokio::test]
    async fn write_rejects_path_like_names() {
        let temp = tempdir().unwrap();
        let store = FsArtifactStore::open_root(temp.path().join("Downloads")).unwrap();

        let err = store
            .write("../escape.apk", chunks(&[b"x"]))
            .await
            .unwrap_err();

        assert!(matches!(err, ArtifactError::Io { .. }));
        assert!(!temp.path().join("escape.apk").exists());
    }

    #[tokio::test]
    async fn open_finds_stored_artifact() {
        let temp = tempdir().unwrap();
        let store = FsArtifactStore::open_root(temp.path()).unwrap();
        store.write("a.b_2(2).apk", chunks(&[b"12345"])).await.unwrap();

        let found = store.open("a.b_2(2).apk").await.unwrap();
        assert_eq!(found.size_bytes, 5);
        assert_eq!(found.path, temp.path().join("a.b_2(2).apk"));
    }

    #[tokio::test]
    async fn open_unknown_name_is_not_found() {
        let temp = tempdir().unwrap();
        let store = FsArtifactStore::open_root(temp.path()).unwrap();

        let err = store.open("never.written_1(1).apk").await.unwrap_err();
        assert!(matches!(err, ArtifactError::NotFound { .. }));
    }

    #[tokio::test]
    async fn open_rejects_traversal_and_hidden_names() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("Downloads");
        let store = FsArtifactStore::open_root(&root).unwrap();
        std::fs::write(temp.path().join("secret.txt"), b"secret").unwrap();
        std::fs::write(root.join(".apkfetch-staging.part"), b"partial").unwrap();

        for name in ["../secret.txt", "..", ".apkfetch-staging.part", "a/b"] {
            let err = store.open(name).await.unwrap_err();
            assert!(
                matches!(err, ArtifactError::NotFound { .. }),
                "{name} should be not found"
            );
        }
    }

    #[tokio::test]
    async fn open_directory_is_not_found() {
        let temp = tempdir().unwrap();
        let store = FsArtifactStore::open_root(temp.path()).unwrap();
        std::fs::create_dir(temp.path().join("nested.dir")).unwrap();

        let err = store.open("nested.dir").await.unwrap_err();
        assert!(matches!(err, ArtifactError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_is_sorted_and_skips_staging_files() {
        let temp = tempdir().unwrap();
        let store = FsArtifactStore::open_root(temp.path()).unwrap();
        store.write("org.b_1(1).apk", chunks(&[b"bb"])).await.unwrap();
        store.write("com.a_1(1).apk", chunks(&[b"a"])).await.unwrap();
        std::fs::write(temp.path().join(".apkfetch-inflight.part"), b"x").unwrap();

        let listed = store.list().await.unwrap();
        let names: Vec<&str> = listed.iter().map(|a| a.filename.as_str()).collect();

        assert_eq!(names, vec!["com.a_1(1).apk", "org.b_1(1).apk"]);
        assert_eq!(listed[0].size_bytes, 1);
        assert_eq!(listed[1].size_bytes, 2);
    }
}
