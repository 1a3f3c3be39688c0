// ── Products slice ──
//
// The list view flattens the pagination envelope into `total/page/pages`;
// the detail view only ever touches `selected`.

use std::sync::Arc;

use serde::Serialize;
use storefront_api::{ApiClient, Page, Product, ProductQuery};

use crate::error::CoreError;
use crate::lifecycle::{RequestStatus, Settlement, Slice, SliceState, SliceStream};

const FETCH_LIST: &str = "fetch_products";
const FETCH_ONE: &str = "fetch_product_by_id";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductsState {
    pub items: Vec<Product>,
    pub selected: Option<Product>,
    pub total: u64,
    pub page: u32,
    pub pages: u32,
    #[serde(flatten)]
    pub status: RequestStatus,
}

impl Default for ProductsState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            total: 0,
            page: 1,
            pages: 1,
            status: RequestStatus::default(),
        }
    }
}

impl ProductsState {
    fn apply_page(&mut self, page: Page<Product>) {
        self.total = page.pagination.total();
        self.page = page.pagination.page();
        self.pages = page.pagination.pages();
        self.items = page.items;
    }
}

impl SliceState for ProductsState {
    fn status(&self) -> &RequestStatus {
        &self.status
    }
    fn status_mut(&mut self) -> &mut RequestStatus {
        &mut self.status
    }
}

pub struct ProductsSlice {
    slice: Slice<ProductsState>,
    api: Arc<ApiClient>,
}

impl ProductsSlice {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self {
            slice: Slice::new("products", ProductsState::default()),
            api,
        }
    }

    pub fn state(&self) -> ProductsState {
        self.slice.snapshot()
    }

    pub fn subscribe(&self) -> SliceStream<ProductsState> {
        self.slice.subscribe()
    }

    pub async fn fetch_products(&self, query: &ProductQuery) -> Settlement {
        let ticket = self.slice.begin(FETCH_LIST);
        let result = self.api.list_products(query).await.map_err(CoreError::from);
        self.slice.settle(&ticket, result, ProductsState::apply_page)
    }

    pub async fn fetch_product_by_id(&self, id: &str) -> Settlement {
        let ticket = self.slice.begin(FETCH_ONE);
        let result = self.api.get_product(id).await.map_err(CoreError::from);
        self.slice
            .settle(&ticket, result, |s, product| s.selected = Some(product))
    }
}
