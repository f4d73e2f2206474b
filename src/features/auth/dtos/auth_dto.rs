use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::auth::model::{AdminUser, AuthenticatedAdmin};

/// Request DTO for admin login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(required, length(min = 1))]
    pub username: Option<String>,

    #[validate(required, length(min = 1))]
    pub password: Option<String>,
}

/// Public view of an admin account
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminProfileDto {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
}

impl From<&AdminUser> for AdminProfileDto {
    fn from(user: &AdminUser) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}

impl From<AuthenticatedAdmin> for AdminProfileDto {
    fn from(admin: AuthenticatedAdmin) -> Self {
        Self {
            id: admin.id,
            username: admin.username,
            email: admin.email,
            role: admin.role,
        }
    }
}

/// Response DTO for a successful login. The token is also set as the session cookie.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseDto {
    pub user: AdminProfileDto,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Response DTO for the current session
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponseDto {
    pub user: AdminProfileDto,
    pub expires_at: DateTime<Utc>,
}

impl From<AuthenticatedAdmin> for SessionResponseDto {
    fn from(admin: AuthenticatedAdmin) -> Self {
        let expires_at = admin.expires_at;
        Self {
            user: admin.into(),
            expires_at,
        }
    }
}
