//! Discussion endpoints. The backend returns every thread for a
//! business as a fully nested tree; replies are created through the
//! same POST with a `parentId`.

use reqwest::Method;
use serde_json::json;
use uuid::Uuid;

use crate::gateway::{ApiClient, GatewayError};
use crate::shared::types::Discussion;

impl ApiClient {
    pub async fn business_discussions(
        &self,
        sid: Uuid,
        business_id: i64,
    ) -> Result<Vec<Discussion>, GatewayError> {
        self.execute(
            sid,
            Method::GET,
            &format!("/discussions/business/{business_id}"),
            &[],
            None,
        )
        .await?
        .into_data()
    }

    pub async fn create_discussion(
        &self,
        sid: Uuid,
        business_id: i64,
        content: &str,
        parent_id: Option<i64>,
    ) -> Result<Discussion, GatewayError> {
        let body = json!({
            "businessId": business_id,
            "content": content,
            "parentId": parent_id,
        });
        self.execute(sid, Method::POST, "/discussions", &[], Some(&body))
            .await?
            .into_data()
    }

    pub async fn delete_discussion(&self, sid: Uuid, id: i64) -> Result<(), GatewayError> {
        self.execute(sid, Method::DELETE, &format!("/discussions/{id}"), &[], None)
            .await?
            .into_ack()
            .map(|_| ())
    }
}
