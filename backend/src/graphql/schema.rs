//! GraphQL schema definition with queries and mutations
//!
//! Reads are public. Writes decide per operation whether the caller may
//! perform them.

use async_graphql::dataloader::DataLoader;
use async_graphql::extensions::Tracing;
use async_graphql::{EmptySubscription, MergedObject, Schema};

use crate::db::Database;
use crate::services::{AuthService, TrackService};

use super::loaders::{LikesByTrackLoader, TrackLoader, TracksByOwnerLoader, UserLoader};
use super::mutations::{LikeMutations, TrackMutations, UserMutations};
use super::queries::{LikeQueries, TrackQueries, UserQueries};

/// The GraphQL schema type
pub type TrackshareSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

#[derive(MergedObject, Default)]
pub struct QueryRoot(TrackQueries, LikeQueries, UserQueries);

#[derive(MergedObject, Default)]
pub struct MutationRoot(TrackMutations, LikeMutations, UserMutations);

/// Build the GraphQL schema with all resolvers
pub fn build_schema(db: Database, auth: AuthService) -> TrackshareSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .extension(Tracing)
        .data(TrackService::new(db.clone()))
        .data(auth)
        .data(DataLoader::new(UserLoader::new(db.clone()), tokio::spawn))
        .data(DataLoader::new(TrackLoader::new(db.clone()), tokio::spawn))
        .data(DataLoader::new(LikesByTrackLoader::new(db.clone()), tokio::spawn))
        .data(DataLoader::new(TracksByOwnerLoader::new(db), tokio::spawn))
        .finish()
}
