use sqlx::PgPool;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{AdminProfileDto, LoginRequestDto, LoginResponseDto};
use crate::features::auth::model::AdminUser;
use crate::features::auth::password;
use crate::features::auth::session::SessionManager;
use crate::shared::validation::validate_required;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Service for admin login and session issuing
pub struct AuthService {
    pool: PgPool,
    sessions: Arc<SessionManager>,
}

impl AuthService {
    pub fn new(pool: PgPool, sessions: Arc<SessionManager>) -> Self {
        Self { pool, sessions }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Verify username/password and issue a session.
    ///
    /// Unknown usernames and wrong passwords produce the same error.
    pub async fn login(&self, dto: LoginRequestDto) -> Result<LoginResponseDto> {
        validate_required(&dto)?;
        let (Some(username), Some(password)) = (dto.username, dto.password) else {
            return Err(AppError::Validation("Missing required fields".to_string()));
        };

        let user = self.find_by_username(&username).await?;

        // Argon2 is deliberately slow; keep it off the async workers
        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        let password_valid = tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => password::verify_password(&password, &hash),
            None => Ok(password::verify_against_dummy(&password)),
        })
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Stored password hash is invalid: {}", e)))?;

        let user = match user {
            Some(user) if password_valid => user,
            _ => {
                tracing::info!("Rejected admin login for username '{}'", username);
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };

        let issued = self
            .sessions
            .issue(&user)
            .map_err(|e| AppError::Internal(format!("Failed to sign session token: {}", e)))?;

        tracing::info!("Admin '{}' logged in", user.username);

        Ok(LoginResponseDto {
            user: AdminProfileDto::from(&user),
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>> {
        sqlx::query_as::<_, AdminUser>(
            r#"
            SELECT id, username, password_hash, email, role
            FROM admin_users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up admin user: {:?}", e);
            AppError::Database(e)
        })
    }
}
