use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Page, Product, ProductQuery};

impl ApiClient {
    /// `GET /products` with filter/sort/paging parameters.
    pub async fn list_products(&self, query: &ProductQuery) -> Result<Page<Product>, Error> {
        debug!(?query, "listing products");
        self.get_with_query("products", query).await
    }

    /// `GET /products/{id}`
    pub async fn get_product(&self, id: &str) -> Result<Product, Error> {
        self.get(&format!("products/{id}")).await
    }
}
