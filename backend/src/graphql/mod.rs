//! GraphQL API for tracks, likes and users
//!
//! Queries and mutations live in domain-specific modules under `queries/` and
//! `mutations/`, each a `#[derive(Default)]` struct with an `#[Object]` impl,
//! merged into the roots in `schema.rs`.

pub mod auth;
pub mod helpers;
pub mod loaders;
pub mod mutations;
pub mod queries;
mod schema;
pub mod types;

pub use auth::AuthExt;
pub use schema::{MutationRoot, QueryRoot, TrackshareSchema, build_schema};
