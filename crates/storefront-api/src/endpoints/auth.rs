// Login and registration
//
// Both return `{ user, token }`. Persisting the token is the caller's job;
// the client only reads the credential store.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{AuthSession, Registration};

impl ApiClient {
    /// `POST /auth/login`
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<AuthSession, Error> {
        debug!(email, "logging in");
        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });
        self.post("auth/login", &body).await
    }

    /// `POST /auth/register`
    pub async fn register(&self, registration: &Registration) -> Result<AuthSession, Error> {
        debug!(email = %registration.email, "registering account");
        self.post("auth/register", registration).await
    }
}
