use serde_json::{json, Value};

use super::{
    client::ApiClient,
    types::{ApiError, User},
};

impl ApiClient {
    /// `None` means the server answered without a user (anonymous visitor).
    pub async fn get_me(&self) -> Result<Option<User>, ApiError> {
        self.get_json("/auth/me").await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let _: Value = self.post_json("/auth/logout", &json!({})).await?;
        Ok(())
    }
}
