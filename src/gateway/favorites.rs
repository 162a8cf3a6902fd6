//! Favorites (wishlist) endpoints.

use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::gateway::{ApiClient, GatewayError};
use crate::shared::types::Favorite;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FavoriteCheck {
    is_favorite: bool,
}

#[derive(Debug, Deserialize)]
struct FavoriteCount {
    count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ToggleResult {
    #[serde(default)]
    is_favorite: Option<bool>,
}

impl ApiClient {
    pub async fn favorites(&self, sid: Uuid) -> Result<Vec<Favorite>, GatewayError> {
        self.execute(sid, Method::GET, "/favorites", &[], None)
            .await?
            .into_data()
    }

    /// Whether the authenticated user has favorited the business.
    pub async fn is_favorite(&self, sid: Uuid, business_id: i64) -> Result<bool, GatewayError> {
        let check: FavoriteCheck = self
            .execute(
                sid,
                Method::GET,
                &format!("/favorites/check/{business_id}"),
                &[],
                None,
            )
            .await?
            .into_data()?;
        Ok(check.is_favorite)
    }

    /// The total number of users who favorited the business. Public,
    /// no authentication required.
    pub async fn favorite_count(&self, sid: Uuid, business_id: i64) -> Result<u64, GatewayError> {
        let counted: FavoriteCount = self
            .execute(
                sid,
                Method::GET,
                &format!("/favorites/business/{business_id}/count"),
                &[],
                None,
            )
            .await?
            .into_data()?;
        Ok(counted.count)
    }

    /// Flip the favorite state, returning the new state when the
    /// backend reports it.
    pub async fn toggle_favorite(
        &self,
        sid: Uuid,
        business_id: i64,
    ) -> Result<Option<bool>, GatewayError> {
        let body = json!({"businessId": business_id});
        let result: ToggleResult = self
            .execute(sid, Method::POST, "/favorites/toggle", &[], Some(&body))
            .await?
            .into_data()?;
        Ok(result.is_favorite)
    }

    pub async fn remove_favorite(&self, sid: Uuid, business_id: i64) -> Result<(), GatewayError> {
        self.execute(
            sid,
            Method::DELETE,
            &format!("/favorites/{business_id}"),
            &[],
            None,
        )
        .await?
        .into_ack()
        .map(|_| ())
    }
}
