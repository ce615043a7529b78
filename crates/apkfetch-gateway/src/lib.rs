//! Store gateway client for apkfetch.
//!
//! Implements the core-owned `StoreClientPort` over the gateway's JSON/HTTP
//! protocol:
//!
//! - `POST {base}/auth` opens a session for one account
//! - `GET {base}/packages/{id}` returns version details and a download URL
//! - the download URL is streamed as the package body
//!
//! Requests are attempted once; failures are mapped to `StoreClientError`
//! at the port boundary.
#![deny(unused_crate_dependencies)]

mod body;
mod client;
mod config;
mod error;
mod models;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

pub use client::GatewayStoreClient;
pub use config::GatewayClientConfig;

// Silence unused dev-dependency warnings
#[cfg(test)]
use httpmock as _;
