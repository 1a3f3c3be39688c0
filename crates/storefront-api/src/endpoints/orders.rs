use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{NewOrder, Order, OrderQuery, OrderRating, Page};

impl ApiClient {
    /// `POST /orders`: place an order from the current cart.
    pub async fn create_order(&self, order: &NewOrder) -> Result<Order, Error> {
        debug!(payment_method = %order.payment_method, "creating order");
        self.post("orders", order).await
    }

    /// `GET /orders`: the signed-in user's orders.
    pub async fn list_orders(&self, query: &OrderQuery) -> Result<Page<Order>, Error> {
        self.get_with_query("orders", query).await
    }

    /// `GET /orders/all`: every order, for the admin order listing.
    pub async fn list_all_orders(&self, query: &OrderQuery) -> Result<Page<Order>, Error> {
        debug!(?query, "listing all orders");
        self.get_with_query("orders/all", query).await
    }

    /// `POST /orders/{id}/rate`
    pub async fn rate_order(&self, order_id: &str, rating: &OrderRating) -> Result<Order, Error> {
        debug!(order_id, rating = rating.rating, "rating order");
        self.post(&format!("orders/{order_id}/rate"), rating).await
    }
}
