//! Likes repository

use anyhow::Result;
use sqlx::SqlitePool;

use super::sqlite_helpers::in_placeholders;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LikeRecord {
    pub id: i64,
    pub user_id: i64,
    pub track_id: i64,
}

pub struct LikesRepository {
    pool: SqlitePool,
}

impl LikesRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List every like
    pub async fn list_all(&self) -> Result<Vec<LikeRecord>> {
        let records = sqlx::query_as::<_, LikeRecord>(
            "SELECT id, user_id, track_id FROM likes ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// List likes on any of the given tracks
    pub async fn list_by_tracks(&self, track_ids: &[i64]) -> Result<Vec<LikeRecord>> {
        let sql = format!(
            "SELECT id, user_id, track_id FROM likes WHERE track_id IN ({}) ORDER BY id",
            in_placeholders(track_ids.len())
        );
        let mut query = sqlx::query_as::<_, LikeRecord>(&sql);
        for id in track_ids {
            query = query.bind(*id);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Record a like. Repeated likes by the same user are kept as separate rows.
    pub async fn create(&self, user_id: i64, track_id: i64) -> Result<LikeRecord> {
        let record = sqlx::query_as::<_, LikeRecord>(
            r#"
            INSERT INTO likes (user_id, track_id)
            VALUES (?, ?)
            RETURNING id, user_id, track_id
            "#,
        )
        .bind(user_id)
        .bind(track_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }
}
