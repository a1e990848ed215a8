//! Application services invoked by the GraphQL resolvers

pub mod auth;
pub mod caller;
pub mod tracks;

pub use auth::{AuthService, TokenIssuer};
pub use caller::{AuthUser, Caller, Ownership};
pub use tracks::{TrackFields, TrackService};
