//! Database connection and repositories

pub mod filter;
pub mod likes;
pub mod schema_sync;
pub mod sqlite_helpers;
pub mod tracks;
pub mod users;

use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub use filter::{MatchOp, TrackField, TrackFilter, TrackFilterTerm};
pub use likes::{LikeRecord, LikesRepository};
pub use tracks::{CreateTrack, TrackRecord, TrackRepository, UpdateTrack};
pub use users::{CreateUser, UserRecord, UsersRepository};

/// Database wrapper providing connection pool access
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database wrapper from an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new connection pool for a `sqlite://` URL, creating the file if needed
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        if let Some(path) = url
            .strip_prefix("sqlite://")
            .filter(|p| !p.is_empty() && !p.starts_with(":memory:"))
            && let Some(parent) = std::path::Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory {}", parent.display()))?;
        }

        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid DATABASE_URL '{}'", url))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Open a private in-memory database.
    ///
    /// Every in-memory connection is its own database, so the pool is pinned
    /// to a single connection that is never recycled.
    pub async fn connect_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Get the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get a users repository
    pub fn users(&self) -> UsersRepository {
        UsersRepository::new(self.pool.clone())
    }

    /// Get a tracks repository
    pub fn tracks(&self) -> TrackRepository {
        TrackRepository::new(self.pool.clone())
    }

    /// Get a likes repository
    pub fn likes(&self) -> LikesRepository {
        LikesRepository::new(self.pool.clone())
    }

    /// Create missing tables and indexes
    pub async fn migrate(&self) -> Result<()> {
        let result = schema_sync::sync_schema(&self.pool).await?;
        if !result.tables_created.is_empty() {
            tracing::info!(tables = ?result.tables_created, "Created database tables");
        }
        Ok(())
    }

    /// Check that the database answers queries
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await.is_ok()
    }
}
