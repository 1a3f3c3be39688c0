//! Request-state synchronization for storefront clients.
//!
//! This crate sits between `storefront-api` and any presentational layer:
//!
//! - **[`Storefront`]**: facade wiring one [`ApiClient`](storefront_api::ApiClient),
//!   one credential store and one [`Router`] into the domain slices.
//!
//! - **Slices** ([`slices`]): `auth`, `cart`, `products`, `orders` and
//!   `brands`. Each owns one state fragment with a `loading`/`error` pair
//!   and applies every operation as started, then succeeded or failed.
//!   Results are reported as a [`Settlement`]; failures land in state and
//!   are never re-thrown.
//!
//! - **Stale-response guard**: every dispatch takes a ticket from a
//!   per-operation sequence. Only the newest dispatch of an operation may
//!   settle; older ones are reported as [`Settlement::Superseded`].
//!
//! - **[`SliceStream<S>`]**: subscription handle exposing
//!   `current()` / `latest()` / `changed()` over a slice's `watch` channel.
//!
//! - **Route guard** ([`authorize`], [`RouteGuard`]): pure access decision
//!   over the stored credential, honoring the `admin.*` wildcard.

pub mod config;
pub mod error;
pub mod guard;
pub mod lifecycle;
pub mod router;
pub mod slices;
pub mod storefront;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::StoreConfig;
pub use error::CoreError;
pub use guard::{ADMIN_WILDCARD, Access, RouteGuard, authorize};
pub use lifecycle::{
    Failure, FailureKind, RequestStatus, Settlement, SliceState, SliceStream, SliceWatchStream,
};
pub use router::Router;
pub use slices::{
    AuthSlice, AuthState, BrandsSlice, BrandsState, CartSlice, CartState, OrdersSlice,
    OrdersState, ProductsSlice, ProductsState, clear_session,
};
pub use storefront::Storefront;

// Wire types consumers need alongside the slices.
pub use storefront_api::{
    Address, Brand, BrandInput, Cart, CartItem, Category, Credential, CredentialStore, HOME_PATH,
    LOGIN_PATH, MemoryCredentialStore, NewAddress, NewOrder, Order, OrderQuery, OrderRating,
    OrderStatus, Product, ProductQuery, ProfileUpdate, Registration, User,
};
