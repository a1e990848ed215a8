use super::prelude::*;

#[derive(Default)]
pub struct UserMutations;

#[Object]
impl UserMutations {
    /// Register a new account
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
        email: Option<String>,
    ) -> Result<CreateUserPayload> {
        let auth = ctx.data_unchecked::<AuthService>();

        let record = auth
            .register(&username, &password, email)
            .await
            .map_err(|e| e.extend())?;

        Ok(CreateUserPayload {
            user: Some(User::from(record)),
        })
    }

    /// Exchange credentials for a bearer token
    async fn token_auth(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
    ) -> Result<TokenAuthPayload> {
        let auth = ctx.data_unchecked::<AuthService>();

        let (token, record) = auth
            .login(&username, &password)
            .await
            .map_err(|e| e.extend())?;

        Ok(TokenAuthPayload {
            token: Some(token),
            user: Some(User::from(record)),
        })
    }
}
