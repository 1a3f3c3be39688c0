// ── Storefront facade ──
//
// Wires one request channel, one credential store and one router into the
// domain slices. The router's session-expiry hook keeps the auth slice in
// step with the store after a 401. Reads that no slice owns (addresses,
// categories, profile) go straight to the API as ad-hoc queries.

use std::sync::Arc;

use storefront_api::{
    Address, ApiClient, Category, CredentialStore, NewAddress, ProfileUpdate, TransportConfig,
    User,
};
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::CoreError;
use crate::guard::{Access, RouteGuard};
use crate::router::Router;
use crate::slices::{AuthSlice, BrandsSlice, CartSlice, OrdersSlice, ProductsSlice};

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<StorefrontInner>`. Every clone shares the
/// same slices, so state written through one handle is visible to all.
#[derive(Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

struct StorefrontInner {
    api: Arc<ApiClient>,
    credentials: Arc<dyn CredentialStore>,
    router: Arc<Router>,
    guard: RouteGuard,
    auth: AuthSlice,
    cart: CartSlice,
    products: ProductsSlice,
    orders: OrdersSlice,
    brands: BrandsSlice,
}

impl Storefront {
    /// Build the request channel from `config` and wire the slices.
    pub fn new(
        config: &StoreConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
            accept_invalid_certs: config.accept_invalid_certs,
        };
        let router = Arc::new(Router::default());
        let api = ApiClient::new(
            config.api_url.clone(),
            &transport,
            Arc::clone(&credentials),
            router.clone(),
        )?;
        debug!(api_url = %config.api_url, "storefront ready");
        Ok(Self::assemble(Arc::new(api), credentials, router))
    }

    /// Wire the slices around a pre-built client.
    ///
    /// `router` must be the navigator `api` was built with for 401
    /// redirects to show up in [`Storefront::router`].
    pub fn with_client(
        api: Arc<ApiClient>,
        credentials: Arc<dyn CredentialStore>,
        router: Arc<Router>,
    ) -> Self {
        Self::assemble(api, credentials, router)
    }

    fn assemble(
        api: Arc<ApiClient>,
        credentials: Arc<dyn CredentialStore>,
        router: Arc<Router>,
    ) -> Self {
        let auth = AuthSlice::new(Arc::clone(&api), Arc::clone(&credentials));
        router.on_session_expired(auth.expiry_hook());
        Self {
            inner: Arc::new(StorefrontInner {
                guard: RouteGuard::new(Arc::clone(&credentials)),
                auth,
                cart: CartSlice::new(Arc::clone(&api)),
                products: ProductsSlice::new(Arc::clone(&api)),
                orders: OrdersSlice::new(Arc::clone(&api)),
                brands: BrandsSlice::new(Arc::clone(&api)),
                api,
                credentials,
                router,
            }),
        }
    }

    // ── Slices ───────────────────────────────────────────────────────

    pub fn auth(&self) -> &AuthSlice {
        &self.inner.auth
    }

    pub fn cart(&self) -> &CartSlice {
        &self.inner.cart
    }

    pub fn products(&self) -> &ProductsSlice {
        &self.inner.products
    }

    pub fn orders(&self) -> &OrdersSlice {
        &self.inner.orders
    }

    pub fn brands(&self) -> &BrandsSlice {
        &self.inner.brands
    }

    // ── Navigation ───────────────────────────────────────────────────

    pub fn router(&self) -> &Router {
        &self.inner.router
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.inner.guard
    }

    /// Navigate through the route guard.
    pub fn visit(&self, destination: &str, required: Option<&str>) -> Access {
        self.inner
            .router
            .visit(&self.inner.guard, destination, required)
    }

    // ── Plumbing ─────────────────────────────────────────────────────

    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.inner.credentials
    }

    // ── Ad-hoc queries ───────────────────────────────────────────────

    pub async fn list_addresses(&self) -> Result<Vec<Address>, CoreError> {
        Ok(self.inner.api.list_addresses().await?)
    }

    pub async fn add_address(&self, address: &NewAddress) -> Result<Address, CoreError> {
        Ok(self.inner.api.add_address(address).await?)
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, CoreError> {
        Ok(self.inner.api.list_categories().await?)
    }

    pub async fn profile(&self) -> Result<User, CoreError> {
        Ok(self.inner.api.get_profile().await?)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, CoreError> {
        Ok(self.inner.api.update_profile(update).await?)
    }
}
