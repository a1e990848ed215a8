//! Application configuration management

use std::env;

use anyhow::{Context, Result};
use base64::Engine;

/// Default lifetime of issued access tokens (7 days)
const DEFAULT_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

const GENERATED_SECRET_PREFIX: &str = "dev-secret-";

/// Output format of the console log layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    fn from_env_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind the HTTP server to
    pub host: String,

    /// Server port
    pub port: u16,

    /// SQLite database URL, e.g. `sqlite://./data/tracks.db`
    pub database_url: String,

    /// Maximum size of the database connection pool
    pub database_max_connections: u32,

    /// Secret used to sign and verify access tokens
    pub jwt_secret: String,

    /// Lifetime of issued access tokens in seconds
    pub token_ttl_secs: i64,

    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,

    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret.trim().to_string(),
            // Tokens signed with this secret do not survive a restart
            _ => generate_jwt_secret(),
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            port: env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .context("Invalid PORT")?,

            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://./data/tracks.db".to_string()),

            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),

            jwt_secret,

            token_ttl_secs: env::var("TOKEN_TTL_SECS")
                .ok()
                .map(|s| s.parse().context("Invalid TOKEN_TTL_SECS"))
                .transpose()?
                .unwrap_or(DEFAULT_TOKEN_TTL_SECS),

            bcrypt_cost: env::var("BCRYPT_COST")
                .ok()
                .map(|s| s.parse().context("Invalid BCRYPT_COST"))
                .transpose()?
                .unwrap_or(bcrypt::DEFAULT_COST),

            log_format: env::var("LOG_FORMAT")
                .map(|v| LogFormat::from_env_value(&v))
                .unwrap_or_default(),
        })
    }

    /// Whether the signing secret was generated because `JWT_SECRET` was unset
    pub fn uses_generated_secret(&self) -> bool {
        self.jwt_secret.starts_with(GENERATED_SECRET_PREFIX)
    }
}

/// 32 random bytes, base64 encoded
fn generate_jwt_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut bytes);
    format!(
        "{GENERATED_SECRET_PREFIX}{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}
