use super::prelude::*;

#[derive(Default)]
pub struct TrackQueries;

#[Object]
impl TrackQueries {
    /// All tracks, or those whose title, description, url or poster's username
    /// contains `search` (case-insensitive)
    async fn tracks(&self, ctx: &Context<'_>, search: Option<String>) -> Result<Vec<Track>> {
        let service = ctx.data_unchecked::<TrackService>();

        let records = service
            .list_tracks(search.as_deref())
            .await
            .map_err(|e| e.extend())?;

        Ok(records.into_iter().map(Track::from).collect())
    }
}
