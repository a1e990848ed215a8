// Helper functions shared across GraphQL query/mutation modules.

use async_graphql::dataloader::DataLoader;
use async_graphql::{Context, ErrorExtensions, Result};

use crate::error::ApiError;

use super::loaders::{LikesByTrackLoader, LoaderError, TrackLoader, TracksByOwnerLoader, UserLoader};
use super::types::{Like, Track, User};

/// Convert a loader failure into an opaque internal error
pub(crate) fn loader_error(e: LoaderError) -> async_graphql::Error {
    ApiError::Storage(anyhow::anyhow!("{:#}", e)).extend()
}

pub(crate) async fn user_by_id(ctx: &Context<'_>, id: i64) -> Result<Option<User>> {
    let loader = ctx.data_unchecked::<DataLoader<UserLoader>>();
    let record = loader.load_one(id).await.map_err(loader_error)?;
    Ok(record.map(User::from))
}

pub(crate) async fn track_by_id(ctx: &Context<'_>, id: i64) -> Result<Option<Track>> {
    let loader = ctx.data_unchecked::<DataLoader<TrackLoader>>();
    let record = loader.load_one(id).await.map_err(loader_error)?;
    Ok(record.map(Track::from))
}

pub(crate) async fn likes_for_track(ctx: &Context<'_>, track_id: i64) -> Result<Vec<Like>> {
    let loader = ctx.data_unchecked::<DataLoader<LikesByTrackLoader>>();
    let records = loader
        .load_one(track_id)
        .await
        .map_err(loader_error)?
        .unwrap_or_default();
    Ok(records.into_iter().map(Like::from).collect())
}

pub(crate) async fn tracks_for_owner(ctx: &Context<'_>, user_id: i64) -> Result<Vec<Track>> {
    let loader = ctx.data_unchecked::<DataLoader<TracksByOwnerLoader>>();
    let records = loader
        .load_one(user_id)
        .await
        .map_err(loader_error)?
        .unwrap_or_default();
    Ok(records.into_iter().map(Track::from).collect())
}
