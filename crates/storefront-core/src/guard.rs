// ── Route guard ──
//
// Pure access decision over the stored credential. The guard never calls
// the server; it only looks at what the credential store holds right now.

use std::sync::Arc;

use serde::Serialize;
use storefront_api::{Credential, CredentialStore, HOME_PATH, LOGIN_PATH};

/// Permission that satisfies every requirement.
pub const ADMIN_WILDCARD: &str = "admin.*";

/// Outcome of a navigation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "access", rename_all = "snake_case")]
pub enum Access {
    Allow,
    /// Go to `to` instead. `return_to` is the originally requested
    /// destination when the user should come back after signing in.
    Redirect {
        to: &'static str,
        return_to: Option<String>,
    },
}

impl Access {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Decide whether `credential` may enter `destination`.
///
/// - no token: redirect to the login entry point, remembering `destination`
/// - token and no requirement: allow
/// - token and a requirement: allow iff the permission set holds it or
///   holds [`ADMIN_WILDCARD`], else redirect home
pub fn authorize(credential: &Credential, destination: &str, required: Option<&str>) -> Access {
    if !credential.is_authenticated() {
        return Access::Redirect {
            to: LOGIN_PATH,
            return_to: Some(destination.to_owned()),
        };
    }

    let Some(required) = required else {
        return Access::Allow;
    };

    let permissions = &credential.permissions;
    if permissions.contains(required) || permissions.contains(ADMIN_WILDCARD) {
        Access::Allow
    } else {
        Access::Redirect {
            to: HOME_PATH,
            return_to: None,
        }
    }
}

/// [`authorize`] bound to a live credential store.
#[derive(Clone)]
pub struct RouteGuard {
    credentials: Arc<dyn CredentialStore>,
}

impl RouteGuard {
    pub fn new(credentials: Arc<dyn CredentialStore>) -> Self {
        Self { credentials }
    }

    pub fn authorize(&self, destination: &str, required: Option<&str>) -> Access {
        authorize(&self.credentials.get(), destination, required)
    }
}
