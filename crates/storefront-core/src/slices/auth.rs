// ── Auth slice ──
//
// Login and registration replace `user` and `token`. On success the token
// and the user's permission set are written to the credential store before
// the slice state resolves. Logout is local only. A 401 seen by the
// request channel expires the in-memory session through the router hook.

use std::collections::BTreeSet;
use std::sync::{Arc, Weak};

use secrecy::SecretString;
use serde::Serialize;
use storefront_api::{ApiClient, AuthSession, CredentialStore, Registration, User};
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::lifecycle::{RequestStatus, Settlement, Slice, SliceState, SliceStream, Ticket};

const LOGIN: &str = "login";
const REGISTER: &str = "register";

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthState {
    pub user: Option<User>,
    /// Bearer token for the session. Never serialized.
    #[serde(skip)]
    pub token: Option<SecretString>,
    #[serde(flatten)]
    pub status: RequestStatus,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

impl SliceState for AuthState {
    fn status(&self) -> &RequestStatus {
        &self.status
    }
    fn status_mut(&mut self) -> &mut RequestStatus {
        &mut self.status
    }
}

pub struct AuthSlice {
    slice: Arc<Slice<AuthState>>,
    api: Arc<ApiClient>,
    credentials: Arc<dyn CredentialStore>,
}

impl AuthSlice {
    /// The initial token is seeded from the credential store.
    pub(crate) fn new(api: Arc<ApiClient>, credentials: Arc<dyn CredentialStore>) -> Self {
        let initial = AuthState {
            token: credentials.token(),
            ..AuthState::default()
        };
        Self {
            slice: Arc::new(Slice::new("auth", initial)),
            api,
            credentials,
        }
    }

    pub fn state(&self) -> AuthState {
        self.slice.snapshot()
    }

    pub fn subscribe(&self) -> SliceStream<AuthState> {
        self.slice.subscribe()
    }

    pub async fn login(&self, email: &str, password: &SecretString) -> Settlement {
        let ticket = self.slice.begin(LOGIN);
        let result = self.api.login(email, password).await.map_err(CoreError::from);
        self.establish(&ticket, result)
    }

    pub async fn register(&self, registration: &Registration) -> Settlement {
        let ticket = self.slice.begin(REGISTER);
        let result = self
            .api
            .register(registration)
            .await
            .map_err(CoreError::from);
        self.establish(&ticket, result)
    }

    /// End the session locally: clears `user`, `token` and the persisted
    /// credential. Never contacts the server. In-flight logins are
    /// discarded when they settle.
    ///
    /// Tools without a configured server can call [`clear_session`] on the
    /// store directly; this method does the same plus the in-memory reset.
    pub fn logout(&self) -> Result<(), CoreError> {
        self.slice.invalidate(LOGIN);
        self.slice.invalidate(REGISTER);
        self.slice.mutate(|s| {
            s.user = None;
            s.token = None;
            s.status = RequestStatus::default();
        });
        info!("logged out");
        clear_session(self.credentials.as_ref())
    }

    /// Callback that drops the in-memory session once the request channel
    /// has cleared the store after a 401.
    ///
    /// In-flight logins keep their tickets: a login rejected with 401 must
    /// still record its own failure, and one that succeeds afterwards
    /// establishes a fresh session.
    pub(crate) fn expiry_hook(&self) -> impl Fn() + Send + Sync + 'static {
        let slice: Weak<Slice<AuthState>> = Arc::downgrade(&self.slice);
        move || {
            if let Some(slice) = slice.upgrade() {
                expire(&slice);
            }
        }
    }

    /// Persist the session, then resolve the slice state.
    fn establish(&self, ticket: &Ticket, result: Result<AuthSession, CoreError>) -> Settlement {
        // A superseded session is neither persisted nor applied.
        let result = match result {
            Ok(session) if self.slice.is_current(ticket) => {
                self.persist(&session).map(|token| (session.user, token))
            }
            Ok(session) => Ok((session.user, SecretString::from(session.token))),
            Err(e) => Err(e),
        };

        self.slice.settle(ticket, result, |s, (user, token)| {
            s.user = Some(user);
            s.token = Some(token);
        })
    }

    /// Write permissions, then the token. Any write failure clears the
    /// store so a failed login never leaves a usable token behind.
    fn persist(&self, session: &AuthSession) -> Result<SecretString, CoreError> {
        let token = SecretString::from(session.token.clone());
        let permissions: BTreeSet<String> = session.user.permissions.iter().cloned().collect();

        let written = self
            .credentials
            .set_permissions(&permissions)
            .and_then(|()| self.credentials.set_token(&token));
        if let Err(e) = written {
            warn!(error = %e, "persisting credential failed; rolling back");
            if let Err(rollback) = self.credentials.clear() {
                warn!(error = %rollback, "failed to roll back partial credential");
            }
            return Err(e.into());
        }

        debug!(
            user = %session.user.email,
            permissions = permissions.len(),
            "credential persisted"
        );
        Ok(token)
    }
}

fn expire(slice: &Slice<AuthState>) {
    slice.mutate(|s| {
        s.user = None;
        s.token = None;
    });
    info!("session expired");
}

/// Forget the persisted session in `credentials`.
pub fn clear_session(credentials: &dyn CredentialStore) -> Result<(), CoreError> {
    credentials.clear()?;
    debug!("persisted session cleared");
    Ok(())
}
