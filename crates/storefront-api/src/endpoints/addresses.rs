use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Address, NewAddress, Page};

impl ApiClient {
    /// `GET /addresses`
    pub async fn list_addresses(&self) -> Result<Vec<Address>, Error> {
        let page: Page<Address> = self.get("addresses").await?;
        Ok(page.items)
    }

    /// `POST /addresses`
    pub async fn add_address(&self, address: &NewAddress) -> Result<Address, Error> {
        self.post("addresses", address).await
    }
}
