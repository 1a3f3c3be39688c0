#![allow(clippy::unwrap_used)]
// Session, credential and navigation behavior across slices.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storefront_api::{ApiClient, CredentialError, HOME_PATH, LOGIN_PATH};
use storefront_core::{
    Access, CredentialStore, FailureKind, MemoryCredentialStore, Registration, Router, Settlement,
    Storefront, clear_session,
};

struct Fixture {
    server: MockServer,
    store: Storefront,
    credentials: Arc<MemoryCredentialStore>,
}

async fn setup() -> Fixture {
    setup_with(MemoryCredentialStore::new()).await
}

async fn setup_with(credentials: MemoryCredentialStore) -> Fixture {
    let server = MockServer::start().await;
    let credentials = Arc::new(credentials);
    let store = storefront_for(&server, credentials.clone());
    Fixture {
        server,
        store,
        credentials,
    }
}

fn storefront_for(server: &MockServer, credentials: Arc<dyn CredentialStore>) -> Storefront {
    let router = Arc::new(Router::default());
    let api = ApiClient::with_client(
        reqwest::Client::new(),
        Url::parse(&format!("{}/api", server.uri())).unwrap(),
        Arc::clone(&credentials),
        router.clone(),
    );
    Storefront::with_client(Arc::new(api), credentials, router)
}

/// Memory store whose token writes always fail.
#[derive(Default)]
struct TokenWriteFails {
    inner: MemoryCredentialStore,
}

impl CredentialStore for TokenWriteFails {
    fn token(&self) -> Option<SecretString> {
        self.inner.token()
    }

    fn set_token(&self, _: &SecretString) -> Result<(), CredentialError> {
        Err(std::io::Error::other("disk full").into())
    }

    fn clear_token(&self) -> Result<(), CredentialError> {
        self.inner.clear_token()
    }

    fn permissions(&self) -> BTreeSet<String> {
        self.inner.permissions()
    }

    fn set_permissions(&self, permissions: &BTreeSet<String>) -> Result<(), CredentialError> {
        self.inner.set_permissions(permissions)
    }
}

fn secret(s: &str) -> SecretString {
    SecretString::from(s.to_owned())
}

fn session_body(token: &str, permissions: &[&str]) -> serde_json::Value {
    json!({
        "user": {
            "_id": "u1",
            "name": "Ada",
            "email": "ada@example.com",
            "role": "admin",
            "permissions": permissions
        },
        "token": token
    })
}

async fn mount_login(server: &MockServer, token: &str, permissions: &[&str]) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body(token, permissions)))
        .mount(server)
        .await;
}

// ── Login / logout ──────────────────────────────────────────────────

#[tokio::test]
async fn test_login_persists_then_logout_clears() {
    let fx = setup().await;
    mount_login(&fx.server, "jwt-abc", &["orders.view"]).await;

    let outcome = fx.store.auth().login("ada@example.com", &secret("pw")).await;
    assert_eq!(outcome, Settlement::Applied);

    let state = fx.store.auth().state();
    assert_eq!(state.user.as_ref().unwrap().name, "Ada");
    assert_eq!(state.token.as_ref().unwrap().expose_secret(), "jwt-abc");
    assert_eq!(fx.credentials.token().unwrap().expose_secret(), "jwt-abc");
    assert_eq!(
        fx.credentials.permissions(),
        BTreeSet::from(["orders.view".to_owned()])
    );

    fx.store.auth().logout().unwrap();

    let state = fx.store.auth().state();
    assert!(state.user.is_none());
    assert!(state.token.is_none());
    assert!(fx.credentials.token().is_none());
    assert!(fx.credentials.permissions().is_empty());
}

#[tokio::test]
async fn test_register_establishes_session() {
    let fx = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(session_body("jwt-new", &[])))
        .mount(&fx.server)
        .await;

    let outcome = fx
        .store
        .auth()
        .register(&Registration {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "pw".into(),
        })
        .await;

    assert!(outcome.is_applied());
    assert!(fx.store.auth().state().is_authenticated());
    assert_eq!(fx.credentials.token().unwrap().expose_secret(), "jwt-new");
}

#[tokio::test]
async fn test_failed_login_stores_nothing() {
    let fx = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&fx.server)
        .await;

    let outcome = fx.store.auth().login("ada@example.com", &secret("nope")).await;

    assert_eq!(outcome.error(), Some("Invalid credentials"));
    let state = fx.store.auth().state();
    assert_eq!(state.status.error.as_deref(), Some("Invalid credentials"));
    assert!(state.user.is_none());
    assert!(fx.credentials.token().is_none());
}

#[tokio::test]
async fn test_logout_discards_in_flight_login() {
    let fx = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(session_body("late", &["admin.*"]))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&fx.server)
        .await;

    let auth = fx.store.auth();
    let pw = secret("pw");
    let (outcome, ()) = tokio::join!(auth.login("ada@example.com", &pw), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        auth.logout().unwrap();
    });

    assert_eq!(outcome, Settlement::Superseded);
    assert!(auth.state().token.is_none());
    assert!(fx.credentials.token().is_none());
    assert!(fx.credentials.permissions().is_empty());
}

#[tokio::test]
async fn test_initial_token_seeded_from_store() {
    let credentials = MemoryCredentialStore::new();
    credentials.set_token(&secret("from-disk")).unwrap();
    let fx = setup_with(credentials).await;

    let state = fx.store.auth().state();
    assert!(state.is_authenticated());
    assert_eq!(state.token.unwrap().expose_secret(), "from-disk");
}

#[tokio::test]
async fn test_failed_credential_write_leaves_no_token() {
    let server = MockServer::start().await;
    mount_login(&server, "jwt", &["orders.view"]).await;
    let credentials = Arc::new(TokenWriteFails::default());
    let store = storefront_for(&server, credentials.clone());

    let outcome = store.auth().login("ada@example.com", &secret("pw")).await;

    assert_eq!(outcome.failure().unwrap().kind, FailureKind::Local);
    assert!(credentials.token().is_none());
    assert!(credentials.permissions().is_empty());
    assert!(!store.auth().state().is_authenticated());
    assert!(!store.guard().authorize("/cart", None).is_allowed());
}

#[test]
fn test_clear_session_without_slice() {
    let credentials = MemoryCredentialStore::new();
    credentials.set_token(&secret("t")).unwrap();
    credentials
        .set_permissions(&BTreeSet::from(["admin.*".to_owned()]))
        .unwrap();

    clear_session(&credentials).unwrap();

    assert!(credentials.token().is_none());
    assert!(credentials.permissions().is_empty());
}

// ── Unauthorized handling ───────────────────────────────────────────

#[tokio::test]
async fn test_unauthorized_clears_session_and_redirects() {
    let fx = setup().await;
    mount_login(&fx.server, "jwt-abc", &["admin.*"]).await;
    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Token expired" })))
        .mount(&fx.server)
        .await;

    let _ = fx.store.auth().login("ada@example.com", &secret("pw")).await;
    let router = fx.store.router();
    assert_eq!(fx.store.visit("/cart", None), Access::Allow);

    let outcome = fx.store.cart().fetch_cart().await;

    assert_eq!(outcome.error(), Some("Token expired"));
    assert!(fx.credentials.token().is_none());
    assert!(fx.credentials.permissions().is_empty());
    let auth = fx.store.auth().state();
    assert!(!auth.is_authenticated());
    assert!(auth.user.is_none());
    assert_eq!(router.location(), LOGIN_PATH);
    assert_eq!(router.take_return_to().as_deref(), Some("/cart"));
    assert_eq!(
        fx.store.cart().state().status.error.as_deref(),
        Some("Token expired")
    );
}

#[tokio::test]
async fn test_login_rejected_with_401_records_its_error() {
    let fx = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&fx.server)
        .await;

    let outcome = fx.store.auth().login("ada@example.com", &secret("nope")).await;

    assert_eq!(outcome.failure().unwrap().kind, FailureKind::Unauthorized);
    let state = fx.store.auth().state();
    assert_eq!(state.status.error.as_deref(), Some("Invalid credentials"));
    assert!(!state.is_authenticated());
}

// ── Route guard ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_guard_follows_stored_credential() {
    let fx = setup().await;
    mount_login(&fx.server, "jwt-abc", &["orders.view"]).await;

    assert_eq!(
        fx.store.guard().authorize("/orders", None),
        Access::Redirect {
            to: LOGIN_PATH,
            return_to: Some("/orders".into()),
        }
    );

    let _ = fx.store.auth().login("ada@example.com", &secret("pw")).await;

    assert_eq!(fx.store.guard().authorize("/orders", None), Access::Allow);
    assert_eq!(
        fx.store.guard().authorize("/admin/orders", Some("orders.view")),
        Access::Allow
    );
    assert_eq!(
        fx.store.visit("/admin/brands", Some("brands.manage")),
        Access::Redirect {
            to: HOME_PATH,
            return_to: None,
        }
    );
    assert_eq!(fx.store.router().location(), HOME_PATH);
}

#[tokio::test]
async fn test_admin_wildcard_opens_every_route() {
    let fx = setup().await;
    mount_login(&fx.server, "jwt-root", &["admin.*"]).await;
    let _ = fx.store.auth().login("root@example.com", &secret("pw")).await;

    for required in ["orders.view", "brands.manage", "anything.else"] {
        assert!(fx.store.guard().authorize("/admin", Some(required)).is_allowed());
    }
}
