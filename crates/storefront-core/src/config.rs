// ── Runtime connection configuration ──
//
// Describes *where* the backend lives and how patient to be with it. Core
// never reads config files; the binary builds a `StoreConfig` and hands it in.

use std::time::Duration;

use url::Url;

/// Configuration for one storefront backend.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// API root, e.g. `https://shop.example.com/api`.
    pub api_url: Url,
    /// Request timeout, enforced by the request channel.
    pub timeout: Duration,
    /// Accept self-signed certificates.
    pub accept_invalid_certs: bool,
}

impl StoreConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }
}
