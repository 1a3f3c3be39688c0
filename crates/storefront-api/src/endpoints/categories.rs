use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Category, Page};

impl ApiClient {
    /// `GET /categories`
    pub async fn list_categories(&self) -> Result<Vec<Category>, Error> {
        let page: Page<Category> = self.get("categories").await?;
        Ok(page.items)
    }
}
