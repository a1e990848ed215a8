use super::prelude::*;

#[derive(Default)]
pub struct LikeQueries;

#[Object]
impl LikeQueries {
    /// Every like on every track
    async fn likes(&self, ctx: &Context<'_>) -> Result<Vec<Like>> {
        let service = ctx.data_unchecked::<TrackService>();

        let records = service.list_likes().await.map_err(|e| e.extend())?;

        Ok(records.into_iter().map(Like::from).collect())
    }
}
