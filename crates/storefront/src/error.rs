//! CLI error types with miette diagnostics.
//!
//! Maps core errors and slice failures into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use storefront_config::ConfigError;
use storefront_core::{CoreError, Failure, FailureKind};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(storefront::connection_failed),
        help(
            "Check that the storefront API is running and reachable.\n\
             Override the address with --api-url or set api_url in your profile."
        )
    )]
    ConnectionFailed { message: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(storefront::timeout),
        help("Increase timeout with --timeout or check server responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Not signed in")]
    #[diagnostic(
        code(storefront::login_required),
        help("Run: storefront login --profile {profile}")
    )]
    LoginRequired { profile: String },

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(storefront::auth_failed),
        help(
            "The stored session has been cleared.\n\
             Run: storefront login --profile {profile}"
        )
    )]
    AuthFailed { message: String, profile: String },

    #[error("No password configured for profile '{profile}'")]
    #[diagnostic(
        code(storefront::no_credentials),
        help(
            "Store one with: storefront config set-password --profile {profile}\n\
             Or set the STOREFRONT_PASSWORD environment variable."
        )
    )]
    NoCredentials { profile: String },

    #[error("Access to {path} requires '{permission}'")]
    #[diagnostic(
        code(storefront::permission_denied),
        help("Ask an administrator for the '{permission}' permission, then log in again.")
    )]
    PermissionDenied { path: String, permission: String },

    // ── Remote ───────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(storefront::not_found))]
    NotFound { message: String },

    #[error("{message}")]
    #[diagnostic(code(storefront::forbidden))]
    Forbidden { message: String },

    #[error("{message}")]
    #[diagnostic(code(storefront::conflict))]
    Conflict { message: String },

    #[error("API error ({status}): {message}")]
    #[diagnostic(code(storefront::api_error))]
    ApiError { status: u16, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(storefront::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("No API URL configured")]
    #[diagnostic(
        code(storefront::no_config),
        help(
            "Create a profile with: storefront config init\n\
             Expected at: {path}\n\
             Or pass --api-url / set STOREFRONT_API_URL."
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(storefront::config))]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(storefront::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / internal ────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    #[diagnostic(code(storefront::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::LoginRequired { .. } | Self::AuthFailed { .. } | Self::NoCredentials { .. } => {
                exit_code::AUTH
            }
            Self::PermissionDenied { .. } | Self::Forbidden { .. } => exit_code::PERMISSION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            Self::Config(ConfigError::NoCredentials { .. }) => exit_code::AUTH,
            _ => exit_code::GENERAL,
        }
    }

    /// Build the error for a failed slice operation.
    pub fn from_failure(failure: Failure, profile: &str) -> Self {
        let Failure { kind, message } = failure;
        match kind {
            FailureKind::Unauthorized => Self::AuthFailed {
                message,
                profile: profile.into(),
            },
            FailureKind::Remote(status) => Self::from_status(status, message),
            FailureKind::Network => Self::ConnectionFailed { message },
            FailureKind::Timeout(seconds) => Self::Timeout { seconds },
            FailureKind::Local => Self::Internal(message),
        }
    }

    fn from_status(status: u16, message: String) -> Self {
        match status {
            403 => Self::Forbidden { message },
            404 => Self::NotFound { message },
            409 => Self::Conflict { message },
            _ => Self::ApiError { status, message },
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Unauthorized { message } => Self::AuthFailed {
                message,
                profile: "current".into(),
            },
            CoreError::Remote { status, message } => Self::from_status(status, message),
            CoreError::Network { message } => Self::ConnectionFailed { message },
            CoreError::Timeout { timeout_secs, .. } => Self::Timeout {
                seconds: timeout_secs,
            },
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
            other @ (CoreError::Credential(_) | CoreError::Internal(_)) => {
                Self::Internal(other.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_kinds_map_to_exit_codes() {
        let cases = [
            (FailureKind::Unauthorized, exit_code::AUTH),
            (FailureKind::Remote(404), exit_code::NOT_FOUND),
            (FailureKind::Remote(403), exit_code::PERMISSION),
            (FailureKind::Remote(409), exit_code::CONFLICT),
            (FailureKind::Remote(500), exit_code::GENERAL),
            (FailureKind::Network, exit_code::CONNECTION),
            (FailureKind::Timeout(5), exit_code::TIMEOUT),
            (FailureKind::Local, exit_code::GENERAL),
        ];
        for (kind, code) in cases {
            let err = CliError::from_failure(
                Failure {
                    kind,
                    message: "x".into(),
                },
                "default",
            );
            assert_eq!(err.exit_code(), code, "{kind:?}");
        }
    }

    #[test]
    fn remote_message_is_displayed_verbatim() {
        let err = CliError::from(CoreError::Remote {
            status: 404,
            message: "Product not found".into(),
        });
        assert_eq!(err.to_string(), "Product not found");
    }
}
