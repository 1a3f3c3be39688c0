#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use storefront_api::{
    ApiClient, CredentialStore, Error, LOGIN_PATH, MemoryCredentialStore, Navigator, OrderQuery,
    OrderStatus, ProductQuery,
};

// ── Helpers ─────────────────────────────────────────────────────────

#[derive(Default)]
struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, target: &str) {
        self.visits.lock().unwrap().push(target.to_owned());
    }
}

struct Fixture {
    server: MockServer,
    client: ApiClient,
    credentials: Arc<MemoryCredentialStore>,
    navigator: Arc<RecordingNavigator>,
}

async fn setup() -> Fixture {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/api", server.uri())).unwrap();
    let credentials = Arc::new(MemoryCredentialStore::new());
    let navigator = Arc::new(RecordingNavigator::default());
    let client = ApiClient::with_client(
        reqwest::Client::new(),
        base_url,
        credentials.clone(),
        navigator.clone(),
    );
    Fixture {
        server,
        client,
        credentials,
        navigator,
    }
}

fn secret(s: &str) -> SecretString {
    SecretString::from(s.to_owned())
}

// ── Credential attachment ───────────────────────────────────────────

#[tokio::test]
async fn test_bearer_attached_when_token_present() {
    let fx = setup().await;
    fx.credentials.set_token(&secret("tok-123")).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [], "totalItems": 0, "totalPrice": 0
        })))
        .expect(1)
        .mount(&fx.server)
        .await;

    let cart = fx.client.get_cart().await.unwrap();
    assert!(cart.items.is_empty());
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let fx = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(|req: &Request| {
            if req.headers.contains_key("authorization") {
                ResponseTemplate::new(400)
            } else {
                ResponseTemplate::new(200).set_body_json(json!({
                    "categories": [{ "_id": "c1", "name": "Kitchen" }]
                }))
            }
        })
        .mount(&fx.server)
        .await;

    let categories = fx.client.list_categories().await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].id, "c1");
}

// ── Body unwrapping ─────────────────────────────────────────────────

#[tokio::test]
async fn test_login_returns_session() {
    let fx = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "a@b.c", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "_id": "u1", "name": "Ada", "email": "a@b.c", "permissions": ["orders.manage"] },
            "token": "jwt-1"
        })))
        .mount(&fx.server)
        .await;

    let session = fx.client.login("a@b.c", &secret("pw")).await.unwrap();
    assert_eq!(session.token, "jwt-1");
    assert_eq!(session.user.name, "Ada");
    assert_eq!(session.user.permissions, vec!["orders.manage".to_owned()]);
}

#[tokio::test]
async fn test_list_products_sends_query_and_unwraps_envelope() {
    let fx = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "2"))
        .and(query_param("search", "mug"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [
                { "_id": "p1", "name": "Mug", "price": 8.0 },
                { "_id": "p2", "name": "Big Mug", "price": 12.0 },
                { "_id": "p3", "name": "Tiny Mug", "price": 4.0 }
            ],
            "pagination": { "total": 50, "page": 2, "pages": 5 }
        })))
        .mount(&fx.server)
        .await;

    let query = ProductQuery {
        page: Some(2),
        search: Some("mug".into()),
        ..ProductQuery::default()
    };
    let page = fx.client.list_products(&query).await.unwrap();

    assert_eq!(page.items.len(), 3);
    assert_eq!(page.pagination.total(), 50);
    assert_eq!(page.pagination.pages(), 5);
}

#[tokio::test]
async fn test_list_all_orders_filters_by_status() {
    let fx = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/orders/all"))
        .and(query_param("status", "shipped"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "orders": [{ "_id": "o1", "totalPrice": 20.0, "status": "shipped" }],
            "pagination": { "total": 1, "page": 1, "pages": 1 }
        })))
        .mount(&fx.server)
        .await;

    let page = fx
        .client
        .list_all_orders(&OrderQuery {
            status: Some(OrderStatus::Shipped),
            ..OrderQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(page.items[0].status, OrderStatus::Shipped);
}

#[tokio::test]
async fn test_delete_with_empty_body() {
    let fx = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/cart/p1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&fx.server)
        .await;

    fx.client.remove_from_cart("p1").await.unwrap();
}

// ── Failure normalization ───────────────────────────────────────────

#[tokio::test]
async fn test_remote_error_uses_body_message() {
    let fx = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/cart"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Insufficient stock" })),
        )
        .mount(&fx.server)
        .await;

    let err = fx.client.add_to_cart("p1", 3).await.unwrap_err();
    match err {
        Error::Remote { status, ref message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Insufficient stock");
        }
        other => panic!("expected Remote error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_remote_error_without_body_gets_status_message() {
    let fx = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&fx.server)
        .await;

    let err = fx.client.get_product("missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.message(), "Request failed with status code 404");
}

#[tokio::test]
async fn test_unauthorized_clears_credentials_and_redirects() {
    let fx = setup().await;
    fx.credentials.set_token(&secret("stale")).unwrap();
    fx.credentials
        .set_permissions(&BTreeSet::from(["admin.*".to_owned()]))
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/api/users/profile"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Token expired" })),
        )
        .mount(&fx.server)
        .await;

    let err = fx.client.get_profile().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.message(), "Token expired");
    assert!(fx.credentials.token().is_none());
    assert!(fx.credentials.permissions().is_empty());
    assert_eq!(
        *fx.navigator.visits.lock().unwrap(),
        vec![LOGIN_PATH.to_owned()]
    );
}

#[tokio::test]
async fn test_transport_failure_is_generic() {
    // Bind then drop a listener so the port refuses connections.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = ApiClient::with_client(
        reqwest::Client::new(),
        Url::parse(&format!("http://127.0.0.1:{port}/api")).unwrap(),
        Arc::new(MemoryCredentialStore::new()),
        Arc::new(RecordingNavigator::default()),
    );

    let err = client.get_cart().await.unwrap_err();
    assert!(err.is_transport(), "expected transport error, got: {err:?}");
    assert_eq!(err.message(), storefront_api::error::NETWORK_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_malformed_success_body_is_deserialization_error() {
    let fx = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&fx.server)
        .await;

    let err = fx.client.get_cart().await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }), "got: {err:?}");
}

#[tokio::test]
async fn test_token_survives_remote_failure() {
    let fx = setup().await;
    fx.credentials.set_token(&secret("keep-me")).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&fx.server)
        .await;

    let _ = fx.client.list_orders(&OrderQuery::default()).await.unwrap_err();
    assert_eq!(fx.credentials.token().unwrap().expose_secret(), "keep-me");
    assert!(fx.navigator.visits.lock().unwrap().is_empty());
}
