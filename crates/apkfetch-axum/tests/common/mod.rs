//! Shared fixtures for apkfetch-axum integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use apkfetch_axum::{AxumContext, CorsConfig, create_router};
use apkfetch_core::ports::{
    PackageDelivery, StoreClientError, StoreClientPort, StoreClientResult, StoreSession,
};
use apkfetch_core::{Credential, CredentialPool, LocaleProfile, PackageId};
use apkfetch_download::FsArtifactStore;
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use bytes::Bytes;
use futures_util::stream;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

/// How the fake store answers for one package.
#[derive(Clone)]
pub enum FakePackage {
    Available {
        version: &'static str,
        code: i64,
        body: &'static [u8],
    },
    /// Body breaks off after `partial`.
    Interrupted {
        version: &'static str,
        code: i64,
        partial: &'static [u8],
    },
    /// Store answers without a version code.
    MissingVersion,
}

/// In-memory store client. Unknown packages are not found.
#[derive(Default)]
pub struct FakeStore {
    packages: HashMap<String, FakePackage>,
    rejected_accounts: Vec<u64>,
    authenticated: Mutex<Vec<u64>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, id: &str, package: FakePackage) -> Self {
        self.packages.insert(id.to_string(), package);
        self
    }

    pub fn rejecting_account(mut self, numeric_id: u64) -> Self {
        self.rejected_accounts.push(numeric_id);
        self
    }

    /// Numeric ids of every authenticate call, in order.
    pub fn authenticated(&self) -> Vec<u64> {
        self.authenticated.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoreClientPort for FakeStore {
    async fn authenticate(
        &self,
        numeric_id: u64,
        _auth_token: &str,
        profile: &LocaleProfile,
    ) -> StoreClientResult<StoreSession> {
        self.authenticated.lock().unwrap().push(numeric_id);
        if self.rejected_accounts.contains(&numeric_id) {
            return Err(StoreClientError::authentication("token expired"));
        }
        Ok(StoreSession {
            token: format!("session-{numeric_id}"),
            profile: profile.clone(),
        })
    }

    async fn fetch(
        &self,
        _session: &StoreSession,
        package_id: &PackageId,
    ) -> StoreClientResult<PackageDelivery> {
        match self.packages.get(package_id.as_str()) {
            Some(FakePackage::Available {
                version,
                code,
                body,
            }) => Ok(PackageDelivery {
                version_string: Some((*version).to_string()),
                version_code: Some(*code),
                data: Some(Box::pin(stream::iter(
                    body.chunks(3)
                        .map(|c| Ok::<_, StoreClientError>(Bytes::copy_from_slice(c)))
                        .collect::<Vec<_>>(),
                ))),
            }),
            Some(FakePackage::Interrupted {
                version,
                code,
                partial,
            }) => Ok(PackageDelivery {
                version_string: Some((*version).to_string()),
                version_code: Some(*code),
                data: Some(Box::pin(stream::iter(vec![
                    Ok(Bytes::from_static(partial)),
                    Err(StoreClientError::transfer_interrupted("connection reset")),
                ]))),
            }),
            Some(FakePackage::MissingVersion) => Ok(PackageDelivery {
                version_string: Some("1.0".to_string()),
                version_code: None,
                data: Some(Box::pin(stream::empty::<StoreClientResult<Bytes>>())),
            }),
            None => Err(StoreClientError::package_not_found(package_id.as_str())),
        }
    }
}

/// A router over `store`, with `accounts` numeric ids and a temp downloads dir.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<FakeStore>,
    pub downloads: TempDir,
}

impl TestApp {
    pub fn new(store: FakeStore, accounts: &[u64]) -> Self {
        Self::with_cors(store, accounts, &CorsConfig::AllowAll)
    }

    pub fn with_cors(store: FakeStore, accounts: &[u64], cors: &CorsConfig) -> Self {
        let downloads = tempfile::tempdir().unwrap();
        let store = Arc::new(store);
        let artifacts = Arc::new(FsArtifactStore::open_root(downloads.path()).unwrap());
        let pool = CredentialPool::new(
            accounts
                .iter()
                .map(|&id| Credential::new("en_US", "UTC", "bacon", id, format!("token-{id}")))
                .collect(),
        )
        .unwrap();

        let ctx = AxumContext::new(pool, store.clone(), artifacts);
        Self {
            router: create_router(ctx, cors),
            store,
            downloads,
        }
    }

    pub async fn request(&self, method: &str, uri: &str) -> Response<Body> {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.request("GET", uri).await
    }

    pub async fn get_from_origin(&self, uri: &str, origin: &str) -> Response<Body> {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header("Origin", origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Files currently in the downloads directory, sorted.
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.downloads.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

pub async fn body_bytes(response: Response<Body>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
