//! `apkfetch` server binary - parses configuration and starts the server.

use std::path::PathBuf;

use apkfetch_axum::{CorsConfig, ServerConfig, start_server};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Download Android packages from the store with a rotating pool of accounts.
#[derive(Debug, Parser)]
#[command(name = "apkfetch", version, about)]
struct Cli {
    /// Interface to bind.
    #[arg(long, env = "APKFETCH_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on.
    #[arg(long, env = "APKFETCH_PORT", default_value_t = 8085)]
    port: u16,

    /// Where downloaded packages are stored
    /// [default: $APKFETCH_DOWNLOADS_DIR, then ./Downloads].
    #[arg(long)]
    downloads_dir: Option<PathBuf>,

    /// Accounts JSON document: {"accounts": [{"lang", "timezone", "device", "gsf_id", "token"}]}.
    #[arg(long, env = "ACCOUNTS", hide_env_values = true)]
    accounts: String,

    /// Base URL of the store gateway.
    #[arg(long, env = "APKFETCH_GATEWAY_URL", default_value = "http://127.0.0.1:8090")]
    gateway_url: String,

    /// Comma-separated browser origins allowed by CORS [default: any origin].
    #[arg(long, env = "APKFETCH_CORS_ORIGINS", value_delimiter = ',')]
    cors_origins: Vec<String>,
}

impl Cli {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            host: self.host,
            port: self.port,
            downloads_dir: self.downloads_dir,
            accounts_json: self.accounts,
            gateway_url: self.gateway_url,
            cors: cors_config(self.cors_origins),
        }
    }
}

fn cors_config(origins: Vec<String>) -> CorsConfig {
    let origins: Vec<String> = origins
        .into_iter()
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();
    if origins.is_empty() {
        CorsConfig::AllowAll
    } else {
        CorsConfig::AllowOrigins(origins)
    }
}

/// Translate a `LOG_LEVEL` value into a filter directive.
///
/// Accepts tracing level names and the usual aliases (`WARNING`,
/// `CRITICAL`, `FATAL`) in any case.
fn log_level_directive(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" | "warning" => Some("warn"),
        "error" | "critical" | "fatal" => Some("error"),
        "off" => Some("off"),
        _ => None,
    }
}

/// Log filter: `RUST_LOG`, then `LOG_LEVEL`, then `info`.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = std::env::var("LOG_LEVEL")
            .ok()
            .as_deref()
            .and_then(log_level_directive)
            .unwrap_or("info");
        EnvFilter::new(level)
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before clap reads env-backed flags
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    start_server(cli.into_config()).await
}
