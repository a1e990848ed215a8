//! GraphQL authentication context
//!
//! The HTTP handler resolves the bearer token and stores a [`Caller`] in the
//! request data. Resolvers read it back with [`AuthExt`] and pass it on to the
//! services explicitly.
//!
//! Use `AuthGuard` to require authentication on any GraphQL operation:
//!
//! ```ignore
//! #[graphql(guard = "AuthGuard")]
//! async fn protected_query(&self, ctx: &Context<'_>) -> Result<String> { ... }
//! ```

use async_graphql::{Context, ErrorExtensions, Result};

use crate::error::ApiError;
use crate::services::{AuthUser, Caller};

static ANONYMOUS: Caller = Caller::Anonymous;

/// Extension trait to get the caller from GraphQL context
pub trait AuthExt {
    /// The request's caller; anonymous when the transport injected none
    fn caller(&self) -> &Caller;

    /// Get the authenticated user, or return an error if not authenticated
    fn auth_user(&self) -> Result<&AuthUser>;
}

impl<'a> AuthExt for Context<'a> {
    fn caller(&self) -> &Caller {
        self.data_opt::<Caller>().unwrap_or(&ANONYMOUS)
    }

    fn auth_user(&self) -> Result<&AuthUser> {
        self.caller()
            .user()
            .ok_or_else(|| ApiError::Unauthenticated.extend())
    }
}

/// Guard that requires authentication for GraphQL operations.
pub struct AuthGuard;

impl async_graphql::Guard for AuthGuard {
    fn check(&self, ctx: &Context<'_>) -> impl std::future::Future<Output = Result<()>> + Send {
        let result = ctx.auth_user().map(|_| ());
        async move { result }
    }
}
