// Cart endpoints
//
// Mutations answer with the full cart. Removal answers with a bare
// acknowledgement that callers ignore.

use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::Cart;

impl ApiClient {
    /// `GET /cart`
    pub async fn get_cart(&self) -> Result<Cart, Error> {
        self.get("cart").await
    }

    /// `POST /cart` with `{"productId", "quantity"}`
    pub async fn add_to_cart(&self, product_id: &str, quantity: u32) -> Result<Cart, Error> {
        debug!(product_id, quantity, "adding to cart");
        self.post(
            "cart",
            &json!({ "productId": product_id, "quantity": quantity }),
        )
        .await
    }

    /// `PUT /cart/{productId}` with `{"quantity"}`
    pub async fn update_cart_item(&self, product_id: &str, quantity: u32) -> Result<Cart, Error> {
        debug!(product_id, quantity, "updating cart line");
        self.put(&format!("cart/{product_id}"), &json!({ "quantity": quantity }))
            .await
    }

    /// `DELETE /cart/{productId}`
    pub async fn remove_from_cart(&self, product_id: &str) -> Result<(), Error> {
        debug!(product_id, "removing cart line");
        let _: serde_json::Value = self.delete(&format!("cart/{product_id}")).await?;
        Ok(())
    }
}
