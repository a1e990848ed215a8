//! Error type shared by the service layer and the GraphQL resolvers

use async_graphql::ErrorExtensions;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Caller is anonymous or does not own the resource
    #[error("{0}")]
    PermissionDenied(&'static str),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Cannot find {entity} with given {entity} id")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{0}")]
    BadInput(String),

    /// Details are logged, never sent to the client
    #[error("Internal server error")]
    Storage(#[from] anyhow::Error),
}

impl ApiError {
    pub fn track_not_found(id: i64) -> Self {
        ApiError::NotFound {
            entity: "track",
            id,
        }
    }

    /// Machine-readable code placed in `extensions.code`
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::PermissionDenied(_) => "FORBIDDEN",
            ApiError::Unauthenticated => "UNAUTHORIZED",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::BadInput(_) => "BAD_USER_INPUT",
            ApiError::Storage(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        if let ApiError::Storage(source) = self {
            tracing::error!(error = ?source, "Storage operation failed");
        }

        let code = self.code();
        let id = match self {
            ApiError::NotFound { id, .. } => Some(*id),
            _ => None,
        };

        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("code", code);
            if let Some(id) = id {
                e.set("id", id);
            }
        })
    }
}
