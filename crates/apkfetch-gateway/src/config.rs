//! Public configuration for the gateway client.

use std::time::Duration;

/// Configuration for [`GatewayStoreClient`](crate::GatewayStoreClient).
///
/// # Example
///
/// ```
/// use apkfetch_gateway::GatewayClientConfig;
/// use std::time::Duration;
///
/// let config = GatewayClientConfig::new()
///     .with_base_url("http://gateway.internal:8090")
///     .with_request_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct GatewayClientConfig {
    /// Base URL of the store gateway
    pub(crate) base_url: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// TCP/TLS connect timeout, applies to every request
    pub(crate) connect_timeout: Duration,
    /// Whole-request timeout for the auth and metadata calls.
    /// Package bodies are not bounded by it.
    pub(crate) request_timeout: Duration,
    /// Longest wait for the package body's headers or its next chunk
    pub(crate) read_timeout: Duration,
}

impl Default for GatewayClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8090".to_string(),
            user_agent: concat!("apkfetch-gateway/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(60),
        }
    }
}

impl GatewayClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gateway base URL.
    ///
    /// Defaults to `http://127.0.0.1:8090`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Defaults to 10 seconds.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the timeout for auth and metadata requests.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set how long a package download may go without receiving data.
    ///
    /// Defaults to 60 seconds. Large packages are never cut off while bytes
    /// keep arriving.
    #[must_use]
    pub const fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
