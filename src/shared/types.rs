use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Platform roles. The backend emits these as SCREAMING_CASE strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Customer,
    Vendor,
    Admin,
}

impl Role {
    /// Landing page after a successful login or OAuth exchange.
    pub fn post_login_destination(self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Vendor => "/business-owner-dashboard",
            Role::Customer => "/home",
        }
    }
}

/// The authenticated user as cached client-side after login/OAuth.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Token pair issued by the auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<String>,
    #[serde(default)]
    pub refresh_expires_in: Option<String>,
}

/// Owner summary embedded in business payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSummary {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub barangay: String,
    pub location: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    /// JSON-encoded `{phone, email}` or a bare phone string.
    #[serde(default)]
    pub contact_info: Option<String>,
    /// JSON-encoded social links; shape varies per business.
    #[serde(default)]
    pub socials: Option<serde_json::Value>,
    #[serde(default)]
    pub cover_photo: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub open_time: Option<String>,
    #[serde(default)]
    pub close_time: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub owner_id: String,
    #[serde(default)]
    pub owner: Option<OwnerSummary>,
}

/// Author summary embedded in discussion payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSummary {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A discussion node. The backend delivers replies pre-nested; the client
/// never reconstructs the tree from a flat list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub business_id: i64,
    pub user_id: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    pub user: AuthorSummary,
    #[serde(default)]
    pub replies: Vec<Discussion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: i64,
    pub user_id: String,
    pub business_id: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub business: Option<Business>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResult {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// Payload of the business list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessPage {
    #[serde(default)]
    pub businesses: Vec<Business>,
    #[serde(default)]
    pub pagination: Option<PaginationResult>,
}
