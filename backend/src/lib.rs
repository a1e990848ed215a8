//! Trackshare - a GraphQL API for sharing tracks and liking them
//!
//! The binary in `main.rs` wires these modules together; integration tests use
//! them directly.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod services;
