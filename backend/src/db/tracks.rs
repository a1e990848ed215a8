//! Track database repository

use anyhow::Result;
use sqlx::SqlitePool;

use super::filter::TrackFilter;
use super::sqlite_helpers::{in_placeholders, now_iso8601};

/// Track record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TrackRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub url: String,
    pub created_at: String,
    /// Owner; the column is nullable for rows inserted outside the API
    pub posted_by_id: Option<i64>,
}

/// Input for creating a track
#[derive(Debug)]
pub struct CreateTrack {
    pub title: String,
    pub description: String,
    pub url: String,
    pub posted_by_id: i64,
}

/// Input for updating a track. All fields are written.
#[derive(Debug, Default)]
pub struct UpdateTrack {
    pub title: String,
    pub description: String,
    pub url: String,
}

const TRACK_COLUMNS: &str = "t.id, t.title, t.description, t.url, t.created_at, t.posted_by_id";
const RETURNING_COLUMNS: &str = "id, title, description, url, created_at, posted_by_id";

pub struct TrackRepository {
    pool: SqlitePool,
}

impl TrackRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a track by ID
    pub async fn get_by_id(&self, id: i64) -> Result<Option<TrackRecord>> {
        let record = sqlx::query_as::<_, TrackRecord>(&format!(
            "SELECT {TRACK_COLUMNS} FROM tracks t WHERE t.id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// List all tracks in storage order
    pub async fn list_all(&self) -> Result<Vec<TrackRecord>> {
        self.list_filtered(&TrackFilter::default()).await
    }

    /// List tracks matching any term of the filter
    pub async fn list_filtered(&self, filter: &TrackFilter) -> Result<Vec<TrackRecord>> {
        let mut sql = format!("SELECT {TRACK_COLUMNS} FROM tracks t");
        if filter.needs_owner_join() {
            sql.push_str(" LEFT JOIN users u ON u.id = t.posted_by_id");
        }

        let values = match filter.to_sql_condition() {
            Some((condition, values)) => {
                sql.push_str(" WHERE ");
                sql.push_str(&condition);
                values
            }
            None => Vec::new(),
        };
        sql.push_str(" ORDER BY t.id");

        tracing::debug!(sql = %sql, terms = filter.any_of.len(), "Listing tracks");

        let mut query = sqlx::query_as::<_, TrackRecord>(&sql);
        for value in values {
            query = query.bind(value);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Get all tracks with the given IDs
    pub async fn list_by_ids(&self, ids: &[i64]) -> Result<Vec<TrackRecord>> {
        let sql = format!(
            "SELECT {TRACK_COLUMNS} FROM tracks t WHERE t.id IN ({})",
            in_placeholders(ids.len())
        );
        let mut query = sqlx::query_as::<_, TrackRecord>(&sql);
        for id in ids {
            query = query.bind(*id);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Get all tracks posted by any of the given users
    pub async fn list_by_owners(&self, owner_ids: &[i64]) -> Result<Vec<TrackRecord>> {
        let sql = format!(
            "SELECT {TRACK_COLUMNS} FROM tracks t WHERE t.posted_by_id IN ({}) ORDER BY t.id",
            in_placeholders(owner_ids.len())
        );
        let mut query = sqlx::query_as::<_, TrackRecord>(&sql);
        for id in owner_ids {
            query = query.bind(*id);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Create a new track
    pub async fn create(&self, input: CreateTrack) -> Result<TrackRecord> {
        let record = sqlx::query_as::<_, TrackRecord>(&format!(
            r#"
            INSERT INTO tracks (title, description, url, created_at, posted_by_id)
            VALUES (?, ?, ?, ?, ?)
            RETURNING {RETURNING_COLUMNS}
            "#
        ))
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.url)
        .bind(now_iso8601())
        .bind(input.posted_by_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Overwrite title, description and url. Returns `None` if the track does not exist.
    pub async fn update(&self, id: i64, input: UpdateTrack) -> Result<Option<TrackRecord>> {
        let record = sqlx::query_as::<_, TrackRecord>(&format!(
            r#"
            UPDATE tracks SET title = ?, description = ?, url = ?
            WHERE id = ?
            RETURNING {RETURNING_COLUMNS}
            "#
        ))
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.url)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Delete a track (its likes cascade). Returns whether a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tracks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
