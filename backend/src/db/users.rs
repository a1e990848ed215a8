//! Users repository
//!
//! Users are owned by the auth layer; the tracks layer only references them.

use anyhow::Result;
use sqlx::SqlitePool;

use super::sqlite_helpers::{in_placeholders, now_iso8601};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub date_joined: String,
}

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
}

const USER_COLUMNS: &str = "id, username, email, password_hash, date_joined";

pub struct UsersRepository {
    pool: SqlitePool,
}

impl UsersRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user by ID
    pub async fn get_by_id(&self, id: i64) -> Result<Option<UserRecord>> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Get a user by exact username
    pub async fn get_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Get all users with the given IDs (order unspecified)
    pub async fn list_by_ids(&self, ids: &[i64]) -> Result<Vec<UserRecord>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id IN ({})",
            in_placeholders(ids.len())
        );
        let mut query = sqlx::query_as::<_, UserRecord>(&sql);
        for id in ids {
            query = query.bind(*id);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Insert a new user
    pub async fn create(&self, input: CreateUser) -> Result<UserRecord> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            INSERT INTO users (username, email, password_hash, date_joined)
            VALUES (?, ?, ?, ?)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&input.username)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(now_iso8601())
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn test_db() -> Database {
        let db = Database::connect_in_memory().await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    fn new_user(username: &str) -> CreateUser {
        CreateUser {
            username: username.to_string(),
            email: None,
            password_hash: "x".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let db = test_db().await;
        let created = db.users().create(new_user("alice")).await.unwrap();

        let by_id = db.users().get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "alice");

        let by_name = db.users().get_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_name.id, created.id);

        assert!(db.users().get_by_username("ALICE").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_username_is_unique() {
        let db = test_db().await;
        db.users().create(new_user("alice")).await.unwrap();
        assert!(db.users().create(new_user("alice")).await.is_err());
    }

    #[tokio::test]
    async fn test_list_by_ids() {
        let db = test_db().await;
        let alice = db.users().create(new_user("alice")).await.unwrap();
        db.users().create(new_user("bob")).await.unwrap();

        let found = db.users().list_by_ids(&[alice.id, 999]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].username, "alice");

        assert!(db.users().list_by_ids(&[]).await.unwrap().is_empty());
    }
}
