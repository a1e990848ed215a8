//! GraphQL type definitions
//!
//! These types mirror the database records but are decorated with async-graphql
//! attributes. Relations are resolved through the DataLoaders in [`super::loaders`].

use async_graphql::{ComplexObject, Context, ID, Result, SimpleObject};

use crate::db::{LikeRecord, TrackRecord, UserRecord};

use super::helpers::{likes_for_track, tracks_for_owner, user_by_id, track_by_id};

/// A shared media reference
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Track {
    pub id: ID,
    pub title: String,
    pub description: String,
    pub url: String,
    /// Creation time (RFC 3339)
    pub created_at: String,
    #[graphql(skip)]
    pub pk: i64,
    #[graphql(skip)]
    pub posted_by_id: Option<i64>,
}

impl From<TrackRecord> for Track {
    fn from(r: TrackRecord) -> Self {
        Self {
            id: ID(r.id.to_string()),
            title: r.title,
            description: r.description,
            url: r.url,
            created_at: r.created_at,
            pk: r.id,
            posted_by_id: r.posted_by_id,
        }
    }
}

#[ComplexObject]
impl Track {
    /// User who posted the track
    async fn posted_by(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        match self.posted_by_id {
            Some(id) => user_by_id(ctx, id).await,
            None => Ok(None),
        }
    }

    /// Likes this track received
    async fn likes(&self, ctx: &Context<'_>) -> Result<Vec<Like>> {
        likes_for_track(ctx, self.pk).await
    }
}

/// An endorsement of a track by a user
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Like {
    pub id: ID,
    #[graphql(skip)]
    pub user_id: i64,
    #[graphql(skip)]
    pub track_id: i64,
}

impl From<LikeRecord> for Like {
    fn from(r: LikeRecord) -> Self {
        Self {
            id: ID(r.id.to_string()),
            user_id: r.user_id,
            track_id: r.track_id,
        }
    }
}

#[ComplexObject]
impl Like {
    async fn user(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        user_by_id(ctx, self.user_id).await
    }

    async fn track(&self, ctx: &Context<'_>) -> Result<Option<Track>> {
        track_by_id(ctx, self.track_id).await
    }
}

/// A registered user. The password hash is never exposed.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct User {
    pub id: ID,
    pub username: String,
    pub email: Option<String>,
    /// Registration time (RFC 3339)
    pub date_joined: String,
    #[graphql(skip)]
    pub pk: i64,
}

impl From<UserRecord> for User {
    fn from(r: UserRecord) -> Self {
        Self {
            id: ID(r.id.to_string()),
            username: r.username,
            email: r.email,
            date_joined: r.date_joined,
            pk: r.id,
        }
    }
}

#[ComplexObject]
impl User {
    /// Tracks posted by this user
    async fn tracks(&self, ctx: &Context<'_>) -> Result<Vec<Track>> {
        tracks_for_owner(ctx, self.pk).await
    }
}

// ============================================================================
// Mutation payloads
// ============================================================================

#[derive(Debug, SimpleObject)]
#[graphql(name = "CreateTrack")]
pub struct CreateTrackPayload {
    pub track: Option<Track>,
}

#[derive(Debug, SimpleObject)]
#[graphql(name = "UpdateTrack")]
pub struct UpdateTrackPayload {
    pub track: Option<Track>,
}

#[derive(Debug, SimpleObject)]
#[graphql(name = "DeleteTrack")]
pub struct DeleteTrackPayload {
    pub track_id: Option<i32>,
}

#[derive(Debug, SimpleObject)]
#[graphql(name = "CreateLike")]
pub struct CreateLikePayload {
    pub user: Option<User>,
    pub track: Option<Track>,
}

#[derive(Debug, SimpleObject)]
#[graphql(name = "CreateUser")]
pub struct CreateUserPayload {
    pub user: Option<User>,
}

#[derive(Debug, SimpleObject)]
#[graphql(name = "TokenAuth")]
pub struct TokenAuthPayload {
    /// Bearer token for the `Authorization` header
    pub token: Option<String>,
    pub user: Option<User>,
}
