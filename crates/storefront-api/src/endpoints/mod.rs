// Endpoint wrappers
//
// One module per remote resource, each adding inherent methods to
// `ApiClient`. Paths are relative to the configured API root.

pub mod addresses;
pub mod auth;
pub mod brands;
pub mod cart;
pub mod categories;
pub mod orders;
pub mod products;
pub mod profile;
