// ── Domain slices ──
//
// Each slice owns one state fragment and the async operations that update
// it through the request lifecycle. No slice mutates another's state.

pub mod auth;
pub mod brands;
pub mod cart;
pub mod orders;
pub mod products;

pub use auth::{AuthSlice, AuthState, clear_session};
pub use brands::{BrandsSlice, BrandsState};
pub use cart::{CartSlice, CartState};
pub use orders::{OrdersSlice, OrdersState};
pub use products::{ProductsSlice, ProductsState};
