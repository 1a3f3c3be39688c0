// ── Cart slice ──
//
// The server is authoritative for which lines exist; the aggregates are
// always recomputed here from the lines. `total_items` counts distinct
// lines, so removing a line lowers it by exactly one.

use std::sync::Arc;

use serde::Serialize;
use storefront_api::{ApiClient, Cart, CartItem};
use tracing::debug;

use crate::error::CoreError;
use crate::lifecycle::{RequestStatus, Settlement, Slice, SliceState, SliceStream};

const FETCH: &str = "fetch_cart";
const ADD: &str = "add_to_cart";
const UPDATE: &str = "update_cart_item";
const REMOVE: &str = "remove_from_cart";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CartState {
    pub items: Vec<CartItem>,
    pub total_items: u32,
    pub total_price: f64,
    #[serde(flatten)]
    pub status: RequestStatus,
}

impl CartState {
    /// Replace the lines with the server's and recompute the aggregates.
    fn replace(&mut self, cart: Cart) {
        if (cart.total_price - line_total(&cart.items)).abs() > f64::EPSILON {
            debug!(
                server = cart.total_price,
                "server cart total disagrees with line totals; using line totals"
            );
        }
        self.items = cart.items;
        self.recompute();
    }

    /// Drop the line for `product_id` and recompute the aggregates.
    fn remove_line(&mut self, product_id: &str) {
        self.items.retain(|item| item.product.id != product_id);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.total_items = u32::try_from(self.items.len()).unwrap_or(u32::MAX);
        self.total_price = line_total(&self.items);
    }
}

fn line_total(items: &[CartItem]) -> f64 {
    items.iter().map(|item| item.total_price).sum()
}

impl SliceState for CartState {
    fn status(&self) -> &RequestStatus {
        &self.status
    }
    fn status_mut(&mut self) -> &mut RequestStatus {
        &mut self.status
    }
}

pub struct CartSlice {
    slice: Slice<CartState>,
    api: Arc<ApiClient>,
}

impl CartSlice {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self {
            slice: Slice::new("cart", CartState::default()),
            api,
        }
    }

    pub fn state(&self) -> CartState {
        self.slice.snapshot()
    }

    pub fn subscribe(&self) -> SliceStream<CartState> {
        self.slice.subscribe()
    }

    pub async fn fetch_cart(&self) -> Settlement {
        let ticket = self.slice.begin(FETCH);
        let result = self.api.get_cart().await.map_err(CoreError::from);
        self.slice.settle(&ticket, result, CartState::replace)
    }

    pub async fn add_to_cart(&self, product_id: &str, quantity: u32) -> Settlement {
        let ticket = self.slice.begin(ADD);
        let result = self
            .api
            .add_to_cart(product_id, quantity)
            .await
            .map_err(CoreError::from);
        self.slice.settle(&ticket, result, CartState::replace)
    }

    pub async fn update_cart_item(&self, product_id: &str, quantity: u32) -> Settlement {
        let ticket = self.slice.begin(UPDATE);
        let result = self
            .api
            .update_cart_item(product_id, quantity)
            .await
            .map_err(CoreError::from);
        self.slice.settle(&ticket, result, CartState::replace)
    }

    /// Delete the line remotely, then drop it locally without waiting for a
    /// fresh server snapshot.
    pub async fn remove_from_cart(&self, product_id: &str) -> Settlement {
        let ticket = self.slice.begin(REMOVE);
        let result = self
            .api
            .remove_from_cart(product_id)
            .await
            .map_err(CoreError::from);
        self.slice
            .settle(&ticket, result, |s, ()| s.remove_line(product_id))
    }
}

#[cfg(test)]
mod tests {
    use storefront_api::ProductRef;

    use super::*;

    fn line(id: &str, quantity: u32, total: f64) -> CartItem {
        CartItem {
            product: ProductRef {
                id: id.into(),
                name: id.to_uppercase(),
                price: total / f64::from(quantity),
                image: None,
            },
            quantity,
            total_price: total,
        }
    }

    #[test]
    fn replace_recomputes_from_lines() {
        let mut state = CartState::default();
        state.replace(Cart {
            items: vec![line("a", 2, 10.0), line("b", 1, 2.5)],
            total_items: 99,
            total_price: 1000.0,
        });

        assert_eq!(state.total_items, 2);
        assert!((state.total_price - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn remove_line_drops_one_and_resums() {
        let mut state = CartState::default();
        state.replace(Cart {
            items: vec![line("a", 3, 9.0), line("b", 1, 4.0), line("c", 2, 1.0)],
            ..Cart::default()
        });

        state.remove_line("a");

        assert!(state.items.iter().all(|i| i.product.id != "a"));
        assert_eq!(state.total_items, 2);
        assert!((state.total_price - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn remove_unknown_line_changes_nothing() {
        let mut state = CartState::default();
        state.replace(Cart {
            items: vec![line("a", 1, 3.0)],
            ..Cart::default()
        });

        state.remove_line("zzz");
        assert_eq!(state.total_items, 1);
        assert!((state.total_price - 3.0).abs() < f64::EPSILON);
    }
}
