//! Admin endpoints. All of them require an ADMIN bearer token; the
//! backend enforces the role, the frontend guards the routes.

use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::gateway::{ApiClient, GatewayError};
use crate::shared::types::{Business, PaginationResult, User};

#[derive(Debug, Deserialize)]
pub struct AdminUserPage {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub pagination: Option<PaginationResult>,
}

#[derive(Debug, Deserialize)]
pub struct AdminBusinessPage {
    #[serde(default)]
    pub businesses: Vec<Business>,
    #[serde(default)]
    pub pagination: Option<PaginationResult>,
}

impl ApiClient {
    /// Aggregate counters for the admin landing page. The shape varies
    /// across backend versions, so it stays untyped.
    pub async fn admin_dashboard(&self, sid: Uuid) -> Result<Value, GatewayError> {
        self.execute(sid, Method::GET, "/admin/dashboard", &[], None)
            .await?
            .into_data()
    }

    pub async fn admin_users(&self, sid: Uuid, page: u32) -> Result<AdminUserPage, GatewayError> {
        self.execute(
            sid,
            Method::GET,
            "/admin/users",
            &[("page", page.to_string())],
            None,
        )
        .await?
        .into_data()
    }

    pub async fn set_user_role(
        &self,
        sid: Uuid,
        user_id: &str,
        role: &str,
    ) -> Result<(), GatewayError> {
        let body = json!({"role": role});
        self.execute(
            sid,
            Method::PUT,
            &format!("/admin/users/{user_id}/role"),
            &[],
            Some(&body),
        )
        .await?
        .into_ack()
        .map(|_| ())
    }

    pub async fn delete_user(&self, sid: Uuid, user_id: &str) -> Result<(), GatewayError> {
        self.execute(
            sid,
            Method::DELETE,
            &format!("/admin/users/{user_id}"),
            &[],
            None,
        )
        .await?
        .into_ack()
        .map(|_| ())
    }

    pub async fn admin_businesses(
        &self,
        sid: Uuid,
        page: u32,
    ) -> Result<AdminBusinessPage, GatewayError> {
        self.execute(
            sid,
            Method::GET,
            "/admin/businesses",
            &[("page", page.to_string())],
            None,
        )
        .await?
        .into_data()
    }

    /// Businesses awaiting verification.
    pub async fn pending_businesses(&self, sid: Uuid) -> Result<Vec<Business>, GatewayError> {
        let page: AdminBusinessPage = self
            .execute(sid, Method::GET, "/admin/businesses/pending", &[], None)
            .await?
            .into_data()?;
        Ok(page.businesses)
    }

    pub async fn verify_business(&self, sid: Uuid, id: i64) -> Result<(), GatewayError> {
        self.execute(
            sid,
            Method::POST,
            &format!("/admin/businesses/{id}/verify"),
            &[],
            None,
        )
        .await?
        .into_ack()
        .map(|_| ())
    }

    pub async fn unverify_business(&self, sid: Uuid, id: i64) -> Result<(), GatewayError> {
        self.execute(
            sid,
            Method::POST,
            &format!("/admin/businesses/{id}/unverify"),
            &[],
            None,
        )
        .await?
        .into_ack()
        .map(|_| ())
    }

    pub async fn admin_delete_business(&self, sid: Uuid, id: i64) -> Result<(), GatewayError> {
        self.execute(
            sid,
            Method::DELETE,
            &format!("/admin/businesses/{id}"),
            &[],
            None,
        )
        .await?
        .into_ack()
        .map(|_| ())
    }
}
