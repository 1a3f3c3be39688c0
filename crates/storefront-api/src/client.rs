// Storefront API HTTP client
//
// Wraps `reqwest::Client` with base-URL path joining, bearer credential
// attachment, body unwrapping, and failure normalization. Endpoint modules
// (auth, products, cart, ...) are implemented as inherent methods in
// `crate::endpoints` to keep this module focused on transport mechanics.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};
use url::Url;

use crate::credentials::CredentialStore;
use crate::error::Error;
use crate::navigation::{LOGIN_PATH, Navigator};
use crate::transport::TransportConfig;

/// Error bodies look like `{"message": "..."}`; some handlers use `error`.
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// The request channel to the storefront backend.
///
/// Every call reads the current token from the injected [`CredentialStore`]
/// and sends it as `Authorization: Bearer <token>`. A 401 clears the store
/// and redirects through the injected [`Navigator`] before the error is
/// returned, so callers always observe the cleared state.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    timeout_secs: u64,
    credentials: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the API root, e.g. `https://shop.example.com/api`.
    /// Request paths are appended to it segment by segment.
    pub fn new(
        base_url: Url,
        transport: &TransportConfig,
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let mut client = Self::with_client(http, base_url, credentials, navigator);
        client.timeout_secs = transport.timeout.as_secs();
        Ok(client)
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            http,
            base_url,
            timeout_secs: TransportConfig::default().timeout.as_secs(),
            credentials,
            navigator,
        }
    }

    /// The API root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The credential store this client reads its token from.
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append `path` (slash-separated, leading slash optional) to the base
    /// URL. Each segment is percent-encoded.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::CannotBeABase(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(path.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }

    // ── Request channel ──────────────────────────────────────────────

    /// Perform `method path` with an optional JSON body and query bag,
    /// returning the decoded response body.
    pub async fn call<T, B, Q>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        query: Option<&Q>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
        Q: Serialize + Sync + ?Sized,
    {
        let url = self.url(path)?;
        debug!(%method, %url, "dispatching request");

        let mut builder = self.http.request(method, url);
        if let Some(query) = query {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        if let Some(token) = self.credentials.token() {
            trace!("attaching bearer credential");
            builder = builder.bearer_auth(token.expose_secret());
        }

        let resp = builder.send().await.map_err(|e| self.transport_error(e))?;
        self.parse_response(resp).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.call(Method::GET, path, None::<&()>, None::<&()>).await
    }

    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Serialize + Sync + ?Sized,
    {
        self.call(Method::GET, path, None::<&()>, Some(query)).await
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        self.call(Method::POST, path, Some(body), None::<&()>).await
    }

    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        self.call(Method::PUT, path, Some(body), None::<&()>).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.call(Method::DELETE, path, None::<&()>, None::<&()>).await
    }

    // ── Response handling ────────────────────────────────────────────

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else if err.is_builder() {
            Error::Client(err.to_string())
        } else {
            Error::Transport(err)
        }
    }

    /// Return the decoded body on 2xx; otherwise normalize the failure.
    ///
    /// On 401 the credential store is cleared and the navigator is sent to
    /// the login entry point before returning.
    async fn parse_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;

        if status == StatusCode::UNAUTHORIZED {
            let message = remote_message(&body).unwrap_or_else(|| "Unauthorized".into());
            self.handle_unauthorized();
            return Err(Error::Unauthorized { message });
        }

        if !status.is_success() {
            let message = remote_message(&body).unwrap_or_else(|| {
                format!("Request failed with status code {}", status.as_u16())
            });
            debug!(status = status.as_u16(), %message, "remote failure");
            return Err(Error::Remote {
                status: status.as_u16(),
                message,
            });
        }

        // 204 and friends: decode as JSON `null` so `()` and `Value` work.
        let text = if body.trim().is_empty() { "null" } else { &body };
        serde_json::from_str(text).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }

    fn handle_unauthorized(&self) {
        warn!("server rejected credential; clearing session");
        if let Err(e) = self.credentials.clear() {
            warn!(error = %e, "failed to clear stored credential");
        }
        self.navigator.redirect(LOGIN_PATH);
    }
}

fn remote_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .message
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::credentials::MemoryCredentialStore;
    use crate::navigation::NullNavigator;

    fn client(base: &str) -> ApiClient {
        ApiClient::with_client(
            reqwest::Client::new(),
            Url::parse(base).unwrap(),
            Arc::new(MemoryCredentialStore::new()),
            Arc::new(NullNavigator),
        )
    }

    #[test]
    fn url_appends_segments_to_base_path() {
        let c = client("http://localhost:5000/api");
        assert_eq!(
            c.url("/cart/p1").unwrap().as_str(),
            "http://localhost:5000/api/cart/p1"
        );
    }

    #[test]
    fn url_tolerates_trailing_slash_on_base() {
        let c = client("http://localhost:5000/api/");
        assert_eq!(
            c.url("products").unwrap().as_str(),
            "http://localhost:5000/api/products"
        );
    }

    #[test]
    fn url_encodes_segments() {
        let c = client("http://localhost/api");
        assert_eq!(
            c.url("brands/a b").unwrap().as_str(),
            "http://localhost/api/brands/a%20b"
        );
    }

    #[test]
    fn remote_message_prefers_message_field() {
        assert_eq!(
            remote_message(r#"{"message":"Out of stock","error":"x"}"#).as_deref(),
            Some("Out of stock")
        );
        assert_eq!(
            remote_message(r#"{"error":"Bad input"}"#).as_deref(),
            Some("Bad input")
        );
        assert_eq!(remote_message("<html>oops</html>"), None);
        assert_eq!(remote_message(r#"{"message":""}"#), None);
    }
}
