//! Signed admin sessions.
//!
//! A session is an HS256 JWT carried in the `toolnav_session` cookie (or a
//! Bearer header for API clients). Expiry lives in the token's `exp` claim, so
//! nothing is stored server-side; logging out clears the cookie.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::core::config::SessionConfig;
use crate::features::auth::model::{AdminUser, AuthenticatedAdmin};

/// Cookie name for the session token
pub const SESSION_COOKIE: &str = "toolnav_session";

/// Claims embedded in every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Admin user id
    pub sub: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    /// Issued-at (UTC Unix timestamp)
    pub iat: i64,
    /// Expiration (UTC Unix timestamp)
    pub exp: i64,
    pub jti: String,
}

/// Freshly issued session token
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub struct SessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    cookie_secure: bool,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ttl", &self.ttl)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

impl SessionManager {
    pub fn new(config: &SessionConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            ttl: config.ttl,
            cookie_secure: config.cookie_secure,
        }
    }

    /// Issue a session token for a successfully authenticated admin.
    pub fn issue(&self, user: &AdminUser) -> Result<IssuedSession, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let ttl = chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::days(1));
        let expires_at = now + ttl;

        let claims = SessionClaims {
            sub: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        Ok(IssuedSession { token, expires_at })
    }

    /// Verify signature and expiry, returning the admin the token was issued to.
    pub fn validate(&self, token: &str) -> Result<AuthenticatedAdmin, jsonwebtoken::errors::Error> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        Ok(AuthenticatedAdmin {
            id: claims.sub,
            username: claims.username,
            email: claims.email,
            role: claims.role,
            expires_at: DateTime::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now),
        })
    }

    /// `Set-Cookie` value carrying a new session token
    pub fn session_cookie(&self, token: &str) -> String {
        let mut cookie = format!(
            "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.ttl.as_secs()
        );
        if self.cookie_secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// `Set-Cookie` value that removes the session cookie
    pub fn clear_cookie(&self) -> String {
        let mut cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
        if self.cookie_secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> SessionConfig {
        SessionConfig {
            secret: secret.to_string(),
            ttl: Duration::from_secs(3600),
            cookie_secure: false,
        }
    }

    fn admin() -> AdminUser {
        AdminUser {
            id: Uuid::new_v4(),
            username: "admin".to_string(),
            password_hash: "unused".to_string(),
            email: "admin@example.com".to_string(),
            role: "admin".to_string(),
        }
    }

    #[test]
    fn test_issue_and_validate() {
        let sessions = SessionManager::new(&config("test-secret-that-is-long-enough-for-hmac"));
        let user = admin();

        let issued = sessions.issue(&user).expect("issue should succeed");
        let session = sessions
            .validate(&issued.token)
            .expect("validation should succeed");

        assert_eq!(session.id, user.id);
        assert_eq!(session.username, "admin");
        assert_eq!(session.role, "admin");
        assert_eq!(session.expires_at.timestamp(), issued.expires_at.timestamp());
        assert!(issued.expires_at > Utc::now());
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let a = SessionManager::new(&config("secret-alpha-secret-alpha-secret-alpha"));
        let b = SessionManager::new(&config("secret-bravo-secret-bravo-secret-bravo"));

        let issued = a.issue(&admin()).unwrap();
        assert!(b.validate(&issued.token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let secret = "test-secret-that-is-long-enough-for-hmac";
        let sessions = SessionManager::new(&config(secret));
        let now = Utc::now().timestamp();

        // Well past the default 60 second leeway
        let claims = SessionClaims {
            sub: Uuid::new_v4(),
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            role: "admin".to_string(),
            iat: now - 7200,
            exp: now - 3600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert!(sessions.validate(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let sessions = SessionManager::new(&config("test-secret-that-is-long-enough-for-hmac"));
        assert!(sessions.validate("not.a.jwt").is_err());
        assert!(sessions.validate("").is_err());
    }

    #[test]
    fn test_cookie_attributes() {
        let mut cfg = config("test-secret-that-is-long-enough-for-hmac");
        let sessions = SessionManager::new(&cfg);

        let cookie = sessions.session_cookie("abc");
        assert!(cookie.starts_with("toolnav_session=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(!cookie.contains("Secure"));

        let cleared = sessions.clear_cookie();
        assert!(cleared.starts_with("toolnav_session=;"));
        assert!(cleared.contains("Max-Age=0"));

        cfg.cookie_secure = true;
        let secure = SessionManager::new(&cfg);
        assert!(secure.session_cookie("abc").ends_with("; Secure"));
    }
}
