//! HTTP request handlers.
//!
//! Handlers are thin wrappers that delegate to `AppCore`.

pub mod artifacts;
pub mod process;
