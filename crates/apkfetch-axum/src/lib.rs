//! Axum web server adapter for apkfetch.
//!
//! Routes:
//!
//! - `GET /process/{package_id}` downloads a package with the next account
//! - `GET|POST /download/{filename}` serves a stored package
//! - `GET /downloads` lists stored packages
//! - `GET /health`
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings (used by tests/)
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use bytes as _;
#[cfg(test)]
use futures_util as _;
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tower as _;

// Used by main.rs binary
use clap as _;
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export primary types
pub use bootstrap::{AxumContext, CorsConfig, ServerConfig, bootstrap, start_server};
pub use error::HttpError;
pub use routes::create_router;
pub use state::AppState;
