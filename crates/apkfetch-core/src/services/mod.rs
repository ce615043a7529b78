//! Core services built on top of the ports.

mod app_core;
mod credential_pool;
mod orchestrator;

pub use app_core::{AppCore, ProcessError};
pub use credential_pool::CredentialPool;
pub use orchestrator::DownloadOrchestrator;
