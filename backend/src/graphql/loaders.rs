//! GraphQL DataLoaders for batching database queries
//!
//! DataLoaders solve the N+1 problem by collecting multiple requests
//! for related entities and executing them in a single batch query.
//! When GraphQL resolves `tracks { likes { user { username } } }`, every
//! `likes` and `user` resolver calls `load_one`, and the loader turns the
//! collected keys into one `WHERE ... IN (...)` query per relation.

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dataloader::Loader;

use crate::db::{Database, LikeRecord, TrackRecord, UserRecord};

pub type LoaderError = Arc<anyhow::Error>;

/// Users by id
pub struct UserLoader {
    db: Database,
}

impl UserLoader {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl Loader<i64> for UserLoader {
    type Value = UserRecord;
    type Error = LoaderError;

    async fn load(&self, keys: &[i64]) -> Result<HashMap<i64, Self::Value>, Self::Error> {
        tracing::debug!(count = keys.len(), "Batch loading users");
        let records = self.db.users().list_by_ids(keys).await.map_err(Arc::new)?;
        Ok(records.into_iter().map(|r| (r.id, r)).collect())
    }
}

/// Tracks by id
pub struct TrackLoader {
    db: Database,
}

impl TrackLoader {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl Loader<i64> for TrackLoader {
    type Value = TrackRecord;
    type Error = LoaderError;

    async fn load(&self, keys: &[i64]) -> Result<HashMap<i64, Self::Value>, Self::Error> {
        tracing::debug!(count = keys.len(), "Batch loading tracks");
        let records = self.db.tracks().list_by_ids(keys).await.map_err(Arc::new)?;
        Ok(records.into_iter().map(|r| (r.id, r)).collect())
    }
}

/// Likes grouped by the liked track's id
pub struct LikesByTrackLoader {
    db: Database,
}

impl LikesByTrackLoader {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl Loader<i64> for LikesByTrackLoader {
    type Value = Vec<LikeRecord>;
    type Error = LoaderError;

    async fn load(&self, keys: &[i64]) -> Result<HashMap<i64, Self::Value>, Self::Error> {
        tracing::debug!(parent_count = keys.len(), "Batch loading likes for tracks");
        let records = self.db.likes().list_by_tracks(keys).await.map_err(Arc::new)?;

        let mut result: HashMap<i64, Vec<LikeRecord>> =
            keys.iter().map(|k| (*k, Vec::new())).collect();
        for record in records {
            if let Some(likes) = result.get_mut(&record.track_id) {
                likes.push(record);
            }
        }
        Ok(result)
    }
}

/// Tracks grouped by the posting user's id
pub struct TracksByOwnerLoader {
    db: Database,
}

impl TracksByOwnerLoader {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl Loader<i64> for TracksByOwnerLoader {
    type Value = Vec<TrackRecord>;
    type Error = LoaderError;

    async fn load(&self, keys: &[i64]) -> Result<HashMap<i64, Self::Value>, Self::Error> {
        tracing::debug!(parent_count = keys.len(), "Batch loading tracks for owners");
        let records = self.db.tracks().list_by_owners(keys).await.map_err(Arc::new)?;

        let mut result: HashMap<i64, Vec<TrackRecord>> =
            keys.iter().map(|k| (*k, Vec::new())).collect();
        for record in records {
            if let Some(tracks) = record.posted_by_id.and_then(|id| result.get_mut(&id)) {
                tracks.push(record);
            }
        }
        Ok(result)
    }
}
