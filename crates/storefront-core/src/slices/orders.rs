// ── Orders slice ──
//
// Backs both the customer's order history and the admin order listing;
// the two share one list, so a newer listing of either kind wins.

use std::sync::Arc;

use serde::Serialize;
use storefront_api::{ApiClient, NewOrder, Order, OrderQuery, OrderRating, Page};

use crate::error::CoreError;
use crate::lifecycle::{RequestStatus, Settlement, Slice, SliceState, SliceStream};

const LIST: &str = "fetch_orders";
const CREATE: &str = "create_order";
const RATE: &str = "rate_order";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrdersState {
    pub items: Vec<Order>,
    pub total: u64,
    pub page: u32,
    pub pages: u32,
    #[serde(flatten)]
    pub status: RequestStatus,
}

impl Default for OrdersState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            pages: 1,
            status: RequestStatus::default(),
        }
    }
}

impl OrdersState {
    fn apply_page(&mut self, page: Page<Order>) {
        self.total = page.pagination.total();
        self.page = page.pagination.page();
        self.pages = page.pagination.pages();
        self.items = page.items;
    }

    fn prepend(&mut self, order: Order) {
        self.items.insert(0, order);
        self.total += 1;
    }

    fn replace(&mut self, order: Order) {
        if let Some(slot) = self.items.iter_mut().find(|o| o.id == order.id) {
            *slot = order;
        }
    }
}

impl SliceState for OrdersState {
    fn status(&self) -> &RequestStatus {
        &self.status
    }
    fn status_mut(&mut self) -> &mut RequestStatus {
        &mut self.status
    }
}

pub struct OrdersSlice {
    slice: Slice<OrdersState>,
    api: Arc<ApiClient>,
}

impl OrdersSlice {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self {
            slice: Slice::new("orders", OrdersState::default()),
            api,
        }
    }

    pub fn state(&self) -> OrdersState {
        self.slice.snapshot()
    }

    pub fn subscribe(&self) -> SliceStream<OrdersState> {
        self.slice.subscribe()
    }

    /// The signed-in customer's orders.
    pub async fn fetch_orders(&self, query: &OrderQuery) -> Settlement {
        let ticket = self.slice.begin(LIST);
        let result = self.api.list_orders(query).await.map_err(CoreError::from);
        self.slice.settle(&ticket, result, OrdersState::apply_page)
    }

    /// Every order in the shop (admin listing).
    pub async fn fetch_all_orders(&self, query: &OrderQuery) -> Settlement {
        let ticket = self.slice.begin(LIST);
        let result = self
            .api
            .list_all_orders(query)
            .await
            .map_err(CoreError::from);
        self.slice.settle(&ticket, result, OrdersState::apply_page)
    }

    pub async fn create_order(&self, order: &NewOrder) -> Settlement {
        let ticket = self.slice.begin(CREATE);
        let result = self.api.create_order(order).await.map_err(CoreError::from);
        self.slice.settle(&ticket, result, OrdersState::prepend)
    }

    pub async fn rate_order(&self, order_id: &str, rating: &OrderRating) -> Settlement {
        let ticket = self.slice.begin(RATE);
        let result = self
            .api
            .rate_order(order_id, rating)
            .await
            .map_err(CoreError::from);
        self.slice.settle(&ticket, result, OrdersState::replace)
    }
}
