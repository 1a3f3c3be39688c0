// Transport configuration for building the shared reqwest::Client.
//
// Timeouts live here and nowhere else: slices never race their own timers
// against the request channel.

use std::time::Duration;

use crate::error::Error;

const USER_AGENT: &str = concat!("storefront/", env!("CARGO_PKG_VERSION"));

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    /// Accept self-signed certificates (local development backends).
    pub accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }
}

impl TransportConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()
            .map_err(|e| Error::Client(format!("failed to build HTTP client: {e}")))
    }
}
