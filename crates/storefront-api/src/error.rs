use thiserror::Error;

/// Message surfaced when the server could not be reached at all.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error: unable to reach the server";

/// Top-level error type for the `storefront-api` crate.
///
/// Three families matter to callers: transport failures (no response),
/// remote failures (non-2xx with a body), and authorization failures (401),
/// which the client has already acted on by the time this value is returned.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authorization ───────────────────────────────────────────────
    /// The server rejected the bearer credential (HTTP 401). The credential
    /// store has been cleared and the navigator redirected to login.
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    // ── Remote ──────────────────────────────────────────────────────
    /// Non-2xx response. `message` comes from the body's `message` field
    /// when present.
    #[error("{message}")]
    Remote { status: u16, message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The base URL cannot carry path segments (e.g. `mailto:`).
    #[error("Base URL cannot be a base: {0}")]
    CannotBeABase(String),

    /// Building the underlying HTTP client failed.
    #[error("HTTP client error: {0}")]
    Client(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// The normalized, user-presentable failure message.
    ///
    /// Transport-level failures collapse into a generic network message;
    /// remote failures carry the server's own wording.
    pub fn message(&self) -> String {
        match self {
            Self::Unauthorized { message } | Self::Remote { message, .. } => message.clone(),
            Self::Transport(_) | Self::Timeout { .. } => NETWORK_ERROR_MESSAGE.to_owned(),
            other => other.to_string(),
        }
    }

    /// Returns `true` for the 401 family.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Returns `true` if no response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout { .. })
    }

    /// HTTP status code of the response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Remote { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
