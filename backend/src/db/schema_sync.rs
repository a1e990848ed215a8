//! Schema bootstrap for the tracks database
//!
//! Creates missing tables and indexes on startup. Existing tables are left
//! untouched: column renames or type changes require a fresh database.

use sqlx::SqlitePool;
use tracing::debug;

/// Table definitions in dependency order (referenced tables first)
const TABLES: &[(&str, &str)] = &[
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT,
            password_hash TEXT NOT NULL,
            date_joined TEXT NOT NULL
        )
        "#,
    ),
    (
        "tracks",
        r#"
        CREATE TABLE IF NOT EXISTS tracks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL DEFAULT '',
            url TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            posted_by_id INTEGER REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    ),
    (
        "likes",
        r#"
        CREATE TABLE IF NOT EXISTS likes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            track_id INTEGER NOT NULL REFERENCES tracks(id) ON DELETE CASCADE
        )
        "#,
    ),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_tracks_posted_by ON tracks(posted_by_id)",
    "CREATE INDEX IF NOT EXISTS idx_likes_track ON likes(track_id)",
    "CREATE INDEX IF NOT EXISTS idx_likes_user ON likes(user_id)",
];

/// Result of a schema sync operation
#[derive(Debug, Default)]
pub struct SchemaSyncResult {
    pub tables_created: Vec<String>,
}

/// Check if a table exists in the database
async fn table_exists(pool: &SqlitePool, table_name: &str) -> Result<bool, sqlx::Error> {
    let result: Option<(String,)> =
        sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' AND name = ?")
            .bind(table_name)
            .fetch_optional(pool)
            .await?;

    Ok(result.is_some())
}

/// Create all missing tables and indexes
pub async fn sync_schema(pool: &SqlitePool) -> Result<SchemaSyncResult, sqlx::Error> {
    let mut result = SchemaSyncResult::default();

    for (table_name, create_sql) in TABLES {
        if table_exists(pool, table_name).await? {
            continue;
        }
        debug!("Creating table {}", table_name);
        sqlx::query(create_sql).execute(pool).await?;
        result.tables_created.push((*table_name).to_string());
    }

    for index_sql in INDEXES {
        sqlx::query(index_sql).execute(pool).await?;
    }

    Ok(result)
}
