//! Per-request caller identity
//!
//! The HTTP layer resolves the bearer token into a [`Caller`] once per request
//! and every service operation receives it as an explicit argument.

use crate::error::{ApiError, ApiResult};

/// Identity carried by a verified access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
}

/// Who is making the request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Caller {
    #[default]
    Anonymous,
    User(AuthUser),
}

/// Relationship between a caller and a resource's owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    Owner,
    OtherUser,
    Anonymous,
}

impl Caller {
    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            Caller::User(user) => Some(user),
            Caller::Anonymous => None,
        }
    }

    /// The authenticated user, or a permission error carrying `message`
    pub fn require_user(&self, message: &'static str) -> ApiResult<&AuthUser> {
        self.user().ok_or(ApiError::PermissionDenied(message))
    }

    /// Classify the caller against a resource owner. An ownerless resource
    /// is owned by nobody, so every authenticated caller is `OtherUser`.
    pub fn ownership_of(&self, owner_id: Option<i64>) -> Ownership {
        match self {
            Caller::Anonymous => Ownership::Anonymous,
            Caller::User(user) if owner_id == Some(user.user_id) => Ownership::Owner,
            Caller::User(_) => Ownership::OtherUser,
        }
    }
}
