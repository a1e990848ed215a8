use super::prelude::*;

#[derive(Default)]
pub struct LikeMutations;

#[Object]
impl LikeMutations {
    /// Like a track as the authenticated caller
    async fn create_like(&self, ctx: &Context<'_>, track_id: i32) -> Result<CreateLikePayload> {
        let service = ctx.data_unchecked::<TrackService>();

        let (like, track) = service
            .create_like(ctx.caller(), i64::from(track_id))
            .await
            .map_err(|e| e.extend())?;

        Ok(CreateLikePayload {
            user: user_by_id(ctx, like.user_id).await?,
            track: Some(Track::from(track)),
        })
    }
}
