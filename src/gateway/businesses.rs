//! Business directory endpoints.

use reqwest::Method;
use serde_json::Value;
use uuid::Uuid;

use crate::gateway::{ApiClient, GatewayError};
use crate::shared::types::{Business, BusinessPage};

impl ApiClient {
    /// Fetch one page of the directory. Category and barangay are
    /// forwarded to the backend when present.
    pub async fn list_businesses(
        &self,
        sid: Uuid,
        page: u32,
        limit: u32,
        category: Option<&str>,
        barangay: Option<&str>,
    ) -> Result<BusinessPage, GatewayError> {
        let mut query = vec![("page", page.to_string()), ("limit", limit.to_string())];
        if let Some(category) = category {
            query.push(("category", category.to_string()));
        }
        if let Some(barangay) = barangay {
            query.push(("barangay", barangay.to_string()));
        }
        self.execute(sid, Method::GET, "/businesses", &query, None)
            .await?
            .into_data()
    }

    pub async fn get_business(&self, sid: Uuid, id: i64) -> Result<Business, GatewayError> {
        self.execute(sid, Method::GET, &format!("/businesses/{id}"), &[], None)
            .await?
            .into_data()
    }

    /// Businesses owned by the authenticated user.
    pub async fn my_businesses(&self, sid: Uuid) -> Result<Vec<Business>, GatewayError> {
        let page: BusinessPage = self
            .execute(sid, Method::GET, "/businesses/my-businesses", &[], None)
            .await?
            .into_data()?;
        Ok(page.businesses)
    }

    pub async fn create_business(
        &self,
        sid: Uuid,
        data: &Value,
    ) -> Result<Business, GatewayError> {
        self.execute(sid, Method::POST, "/businesses", &[], Some(data))
            .await?
            .into_data()
    }

    pub async fn update_business(
        &self,
        sid: Uuid,
        id: i64,
        data: &Value,
    ) -> Result<Business, GatewayError> {
        self.execute(sid, Method::PUT, &format!("/businesses/{id}"), &[], Some(data))
            .await?
            .into_data()
    }

    pub async fn delete_business(&self, sid: Uuid, id: i64) -> Result<(), GatewayError> {
        self.execute(sid, Method::DELETE, &format!("/businesses/{id}"), &[], None)
            .await?
            .into_ack()
            .map(|_| ())
    }
}
