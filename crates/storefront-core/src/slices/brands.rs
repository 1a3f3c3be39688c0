// ── Brands slice ──
//
// State behind the brand management dialogs. Mutations patch the local
// list from the server's answer instead of refetching.

use std::sync::Arc;

use serde::Serialize;
use storefront_api::{ApiClient, Brand, BrandInput, Page};

use crate::error::CoreError;
use crate::lifecycle::{RequestStatus, Settlement, Slice, SliceState, SliceStream};

const FETCH: &str = "fetch_brands";
const CREATE: &str = "create_brand";
const UPDATE: &str = "update_brand";
const DELETE: &str = "delete_brand";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BrandsState {
    pub items: Vec<Brand>,
    #[serde(flatten)]
    pub status: RequestStatus,
}

impl SliceState for BrandsState {
    fn status(&self) -> &RequestStatus {
        &self.status
    }
    fn status_mut(&mut self) -> &mut RequestStatus {
        &mut self.status
    }
}

impl BrandsState {
    fn upsert(&mut self, brand: Brand) {
        match self.items.iter_mut().find(|b| b.id == brand.id) {
            Some(slot) => *slot = brand,
            None => self.items.push(brand),
        }
    }
}

pub struct BrandsSlice {
    slice: Slice<BrandsState>,
    api: Arc<ApiClient>,
}

impl BrandsSlice {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self {
            slice: Slice::new("brands", BrandsState::default()),
            api,
        }
    }

    pub fn state(&self) -> BrandsState {
        self.slice.snapshot()
    }

    pub fn subscribe(&self) -> SliceStream<BrandsState> {
        self.slice.subscribe()
    }

    pub async fn fetch_brands(&self) -> Settlement {
        let ticket = self.slice.begin(FETCH);
        let result = self.api.list_brands().await.map_err(CoreError::from);
        self.slice
            .settle(&ticket, result, |s, page: Page<Brand>| s.items = page.items)
    }

    pub async fn create_brand(&self, brand: &BrandInput) -> Settlement {
        let ticket = self.slice.begin(CREATE);
        let result = self.api.create_brand(brand).await.map_err(CoreError::from);
        self.slice.settle(&ticket, result, BrandsState::upsert)
    }

    pub async fn update_brand(&self, id: &str, brand: &BrandInput) -> Settlement {
        let ticket = self.slice.begin(UPDATE);
        let result = self
            .api
            .update_brand(id, brand)
            .await
            .map_err(CoreError::from);
        self.slice.settle(&ticket, result, BrandsState::upsert)
    }

    pub async fn delete_brand(&self, id: &str) -> Settlement {
        let ticket = self.slice.begin(DELETE);
        let result = self.api.delete_brand(id).await.map_err(CoreError::from);
        self.slice
            .settle(&ticket, result, |s, ()| s.items.retain(|b| b.id != id))
    }
}
