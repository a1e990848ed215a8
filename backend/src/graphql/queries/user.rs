use super::prelude::*;

#[derive(Default)]
pub struct UserQueries;

#[Object]
impl UserQueries {
    /// The authenticated caller
    #[graphql(guard = "AuthGuard")]
    async fn me(&self, ctx: &Context<'_>) -> Result<User> {
        let user = ctx.auth_user()?;
        user_by_id(ctx, user.user_id)
            .await?
            .ok_or_else(|| crate::error::ApiError::Unauthenticated.extend())
    }

    /// Get a user by ID
    async fn user(&self, ctx: &Context<'_>, id: i32) -> Result<Option<User>> {
        user_by_id(ctx, i64::from(id)).await
    }
}
