//! Authentication service for user registration and JWT handling
//!
//! Provides:
//! - User registration and login
//! - Password hashing with bcrypt
//! - Access token generation and validation

use anyhow::{Context, Result, anyhow};
use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::db::{CreateUser, Database, UserRecord};
use crate::error::{ApiError, ApiResult};
use crate::services::caller::{AuthUser, Caller};

/// Claims structure for access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// User ID (subject)
    pub sub: String,
    pub username: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Signs and verifies HS256 access tokens
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Issue an access token for a user
    pub fn issue(&self, user: &UserRecord) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = AccessTokenClaims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            exp: now + self.ttl_secs,
            iat: now,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .context("Failed to sign access token")
    }

    /// Verify a token and extract the user it was issued for
    pub fn verify(&self, token: &str) -> Result<AuthUser> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;

        let token_data = decode::<AccessTokenClaims>(token, &self.decoding, &validation)
            .map_err(|e| anyhow!("Invalid token: {}", e))?;

        let user_id = token_data
            .claims
            .sub
            .parse()
            .map_err(|_| anyhow!("Invalid token subject '{}'", token_data.claims.sub))?;

        Ok(AuthUser {
            user_id,
            username: token_data.claims.username,
        })
    }

    /// Resolve an optional bearer token into a caller.
    ///
    /// A token that fails verification leaves the request anonymous.
    pub fn resolve_caller(&self, token: Option<&str>) -> Caller {
        let Some(token) = token else {
            return Caller::Anonymous;
        };

        match self.verify(token) {
            Ok(user) => {
                tracing::debug!(user_id = user.user_id, "Token verified");
                Caller::User(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Rejected bearer token, continuing as anonymous");
                Caller::Anonymous
            }
        }
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: Database,
    tokens: TokenIssuer,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(db: Database, tokens: TokenIssuer, bcrypt_cost: u32) -> Self {
        Self {
            db,
            tokens,
            bcrypt_cost,
        }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Register a new user
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: Option<String>,
    ) -> ApiResult<UserRecord> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ApiError::BadInput("Username must not be empty".to_string()));
        }
        if password.is_empty() {
            return Err(ApiError::BadInput("Password must not be empty".to_string()));
        }

        let users = self.db.users();
        if users.get_by_username(username).await?.is_some() {
            return Err(ApiError::BadInput(
                "A user with that username already exists.".to_string(),
            ));
        }

        let password_hash = hash(password, self.bcrypt_cost).context("Failed to hash password")?;

        let user = users
            .create(CreateUser {
                username: username.to_string(),
                email: email.filter(|e| !e.trim().is_empty()),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "Registered user");
        Ok(user)
    }

    /// Check credentials and issue an access token
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<(String, UserRecord)> {
        let invalid = || ApiError::BadInput("Please enter valid credentials".to_string());

        let user = self
            .db
            .users()
            .get_by_username(username.trim())
            .await?
            .ok_or_else(invalid)?;

        if !verify(password, &user.password_hash).context("Failed to verify password")? {
            tracing::info!(user_id = user.id, "Login rejected");
            return Err(invalid());
        }

        let token = self.tokens.issue(&user)?;
        tracing::info!(user_id = user.id, "User logged in");
        Ok((token, user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    /// Lowest work factor bcrypt accepts
    const TEST_BCRYPT_COST: u32 = 4;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret", 3600)
    }

    fn user_record(id: i64, username: &str) -> UserRecord {
        UserRecord {
            id,
            username: username.to_string(),
            email: None,
            password_hash: String::new(),
            date_joined: String::new(),
        }
    }

    async fn service() -> AuthService {
        let db = Database::connect_in_memory().await.unwrap();
        db.migrate().await.unwrap();
        AuthService::new(db, issuer(), TEST_BCRYPT_COST)
    }

    #[test]
    fn test_token_roundtrip() {
        let token = issuer().issue(&user_record(42, "alice")).unwrap();
        let user = issuer().verify(&token).unwrap();
        assert_eq!(user.user_id, 42);
        assert_eq!(user.username, "alice");
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let token = TokenIssuer::new("other-secret", 3600)
            .issue(&user_record(1, "mallory"))
            .unwrap();
        assert!(issuer().verify(&token).is_err());
        assert_eq!(issuer().resolve_caller(Some(&token)), Caller::Anonymous);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = TokenIssuer::new("test-secret", -3600)
            .issue(&user_record(1, "alice"))
            .unwrap();
        assert!(issuer().verify(&token).is_err());
    }

    #[test]
    fn test_resolve_caller() {
        assert_eq!(issuer().resolve_caller(None), Caller::Anonymous);
        assert_eq!(issuer().resolve_caller(Some("garbage")), Caller::Anonymous);

        let token = issuer().issue(&user_record(7, "bob")).unwrap();
        assert_eq!(
            issuer().resolve_caller(Some(&token)),
            Caller::User(AuthUser {
                user_id: 7,
                username: "bob".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let auth = service().await;
        let user = auth
            .register("alice", "hunter2", Some("alice@example.com".to_string()))
            .await
            .unwrap();
        assert_eq!(user.email.as_deref(), Some("alice@example.com"));
        assert_ne!(user.password_hash, "hunter2");

        let (token, logged_in) = auth.login("alice", "hunter2").await.unwrap();
        assert_eq!(logged_in.id, user.id);
        assert_eq!(auth.tokens().verify(&token).unwrap().user_id, user.id);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicates_and_blanks() {
        let auth = service().await;
        auth.register("alice", "pw", None).await.unwrap();

        assert_matches!(auth.register("alice", "pw", None).await, Err(ApiError::BadInput(_)));
        assert_matches!(auth.register("  ", "pw", None).await, Err(ApiError::BadInput(_)));
        assert_matches!(auth.register("bob", "", None).await, Err(ApiError::BadInput(_)));
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let auth = service().await;
        auth.register("alice", "pw", None).await.unwrap();

        assert_matches!(
            auth.login("alice", "wrong").await,
            Err(ApiError::BadInput(msg)) if msg == "Please enter valid credentials"
        );
        assert_matches!(auth.login("nobody", "pw").await, Err(ApiError::BadInput(_)));
    }
}
