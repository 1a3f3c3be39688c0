use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ProfileUpdate, User};

impl ApiClient {
    /// `GET /users/profile`
    pub async fn get_profile(&self) -> Result<User, Error> {
        self.get("users/profile").await
    }

    /// `PUT /users/profile`
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, Error> {
        self.put("users/profile", update).await
    }
}
