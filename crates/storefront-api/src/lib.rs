//! Async Rust client for the storefront REST API.
//!
//! [`ApiClient`] is the single request channel: it attaches the bearer
//! credential held by the injected [`CredentialStore`], strips the response
//! down to its body, and normalizes failures into [`Error`]. An unauthorized
//! response clears the store and asks the injected [`Navigator`] to send the
//! user to the login entry point before the error reaches the caller.
//!
//! Endpoint wrappers (auth, products, cart, orders, addresses, categories,
//! brands, profile) live in [`endpoints`] as inherent methods on the client.

pub mod client;
pub mod credentials;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod navigation;
pub mod transport;

pub use client::ApiClient;
pub use credentials::{Credential, CredentialError, CredentialStore, MemoryCredentialStore};
pub use error::Error;
pub use navigation::{HOME_PATH, LOGIN_PATH, Navigator, NullNavigator};
pub use transport::TransportConfig;

pub use models::{
    Address, AuthSession, Brand, BrandInput, Cart, CartItem, Category, NewAddress, NewOrder,
    Order, OrderItem, OrderQuery, OrderRating, OrderStatus, Page, Pagination, Product,
    ProductQuery, ProductRef, ProfileUpdate, Registration, User,
};
