//! Axum server bootstrap - the composition root.
//!
//! This module is the only place where infrastructure is wired together:
//! accounts, downloads directory, gateway client and artifact store.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use apkfetch_core::paths::resolve_downloads_dir;
use apkfetch_core::ports::{ArtifactStorePort, StoreClientPort};
use apkfetch_core::{AccountsConfig, AppCore, CredentialPool};
use apkfetch_download::FsArtifactStore;
use apkfetch_gateway::{GatewayClientConfig, GatewayStoreClient};
use tokio::net::TcpListener;
use tracing::info;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins.
    #[default]
    AllowAll,
    /// Allow specific origins.
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port for the HTTP server.
    pub port: u16,
    /// Explicit downloads directory; env var and default apply otherwise.
    pub downloads_dir: Option<PathBuf>,
    /// Accounts JSON document, `{"accounts": [...]}`.
    pub accounts_json: String,
    /// Store gateway base URL.
    pub gateway_url: String,
    /// CORS configuration.
    pub cors: CorsConfig,
}

// Accounts carry auth tokens.
impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("downloads_dir", &self.downloads_dir)
            .field("accounts_json", &"<redacted>")
            .field("gateway_url", &self.gateway_url)
            .field("cors", &self.cors)
            .finish()
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// The core application facade.
    pub core: Arc<AppCore>,
}

impl AxumContext {
    /// Assemble a context from already-built parts.
    pub fn new(
        pool: CredentialPool,
        client: Arc<dyn StoreClientPort>,
        artifacts: Arc<dyn ArtifactStorePort>,
    ) -> Self {
        Self {
            core: Arc::new(AppCore::new(Arc::new(pool), client, artifacts)),
        }
    }
}

/// Build all services from configuration.
///
/// Fails, aborting startup, when the accounts document is missing, invalid
/// or empty, or when the downloads directory cannot be prepared.
pub fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    let accounts = AccountsConfig::from_json(&config.accounts_json)
        .context("ACCOUNTS is not a valid accounts document")?;
    let pool = CredentialPool::new(accounts.accounts)?;

    let explicit = config
        .downloads_dir
        .as_ref()
        .map(|p| p.to_string_lossy().into_owned());
    let downloads = resolve_downloads_dir(explicit.as_deref())?;

    info!(
        target: "apkfetch.paths",
        downloads_dir = %downloads.path.display(),
        downloads_source = ?downloads.source,
        "Resolved downloads directory"
    );

    let artifacts: Arc<dyn ArtifactStorePort> = Arc::new(
        FsArtifactStore::open_root(&downloads.path).with_context(|| {
            format!(
                "cannot prepare downloads directory {}",
                downloads.path.display()
            )
        })?,
    );

    let gateway_config = GatewayClientConfig::new().with_base_url(config.gateway_url.clone());
    let client: Arc<dyn StoreClientPort> = Arc::new(GatewayStoreClient::new(&gateway_config)?);

    info!(
        target: "apkfetch.process",
        accounts = pool.len(),
        gateway = %gateway_config.base_url(),
        "Services ready"
    );

    Ok(AxumContext::new(pool, client, artifacts))
}

/// Bootstrap services and serve until Ctrl-C.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let ctx = bootstrap(&config)?;
    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("cannot bind {addr}"))?;

    info!("apkfetch listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
