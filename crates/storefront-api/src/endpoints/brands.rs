// Brand endpoints
//
// Listing is public; create/update/delete back the admin brand dialogs.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Brand, BrandInput, Page};

impl ApiClient {
    /// `GET /brands`
    pub async fn list_brands(&self) -> Result<Page<Brand>, Error> {
        self.get("brands").await
    }

    /// `POST /brands`
    pub async fn create_brand(&self, brand: &BrandInput) -> Result<Brand, Error> {
        debug!(name = ?brand.name, "creating brand");
        self.post("brands", brand).await
    }

    /// `PUT /brands/{id}`
    pub async fn update_brand(&self, id: &str, brand: &BrandInput) -> Result<Brand, Error> {
        debug!(id, "updating brand");
        self.put(&format!("brands/{id}"), brand).await
    }

    /// `DELETE /brands/{id}`
    pub async fn delete_brand(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting brand");
        let _: serde_json::Value = self.delete(&format!("brands/{id}")).await?;
        Ok(())
    }
}
