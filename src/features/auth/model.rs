use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::constants::ROLE_ADMIN;

/// Database model for an admin account
#[derive(Debug, Clone, FromRow)]
pub struct AdminUser {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub role: String,
}

/// Admin attached to a request by a valid session token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedAdmin {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    pub expires_at: DateTime<Utc>,
}

impl AuthenticatedAdmin {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}
