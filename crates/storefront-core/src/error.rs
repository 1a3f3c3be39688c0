// ── Core error types ──
//
// User-facing errors from storefront-core. The `From<storefront_api::Error>`
// impl collapses transport details into the normalized messages that slices
// record in their `error` field.

use storefront_api::CredentialError;
use thiserror::Error;

/// Unified error type for the core crate.
///
/// `Display` is the exact text a slice stores in its `error` field.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session ──────────────────────────────────────────────────────
    /// The server rejected the credential; the session has been cleared.
    #[error("{message}")]
    Unauthorized { message: String },

    #[error("Failed to persist credential: {0}")]
    Credential(#[from] CredentialError),

    // ── Remote ───────────────────────────────────────────────────────
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// No response from the server (connect failure, DNS).
    #[error("{message}")]
    Network { message: String },

    /// No response within the configured timeout.
    #[error("{message}")]
    Timeout { message: String, timeout_secs: u64 },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<storefront_api::Error> for CoreError {
    fn from(err: storefront_api::Error) -> Self {
        use storefront_api::Error as Api;

        let message = err.message();
        match err {
            Api::Unauthorized { .. } => Self::Unauthorized { message },
            Api::Remote { status, .. } => Self::Remote { status, message },
            Api::Transport(_) => Self::Network { message },
            Api::Timeout { timeout_secs } => Self::Timeout {
                message,
                timeout_secs,
            },
            Api::CannotBeABase(_) | Api::Client(_) => Self::Config { message },
            Api::Deserialization { .. } => Self::Internal(message),
        }
    }
}
