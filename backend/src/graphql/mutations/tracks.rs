use super::prelude::*;

#[derive(Default)]
pub struct TrackMutations;

#[Object]
impl TrackMutations {
    /// Share a new track as the authenticated caller
    async fn create_track(
        &self,
        ctx: &Context<'_>,
        title: Option<String>,
        description: Option<String>,
        url: Option<String>,
    ) -> Result<CreateTrackPayload> {
        let service = ctx.data_unchecked::<TrackService>();
        let fields = TrackFields {
            title,
            description,
            url,
        };

        let record = service
            .create_track(ctx.caller(), fields)
            .await
            .map_err(|e| e.extend())?;

        Ok(CreateTrackPayload {
            track: Some(Track::from(record)),
        })
    }

    /// Overwrite title, description and url of a track the caller posted
    async fn update_track(
        &self,
        ctx: &Context<'_>,
        track_id: i32,
        title: Option<String>,
        description: Option<String>,
        url: Option<String>,
    ) -> Result<UpdateTrackPayload> {
        let service = ctx.data_unchecked::<TrackService>();
        let fields = TrackFields {
            title,
            description,
            url,
        };

        let record = service
            .update_track(ctx.caller(), i64::from(track_id), fields)
            .await
            .map_err(|e| e.extend())?;

        Ok(UpdateTrackPayload {
            track: Some(Track::from(record)),
        })
    }

    /// Delete a track the caller posted
    async fn delete_track(&self, ctx: &Context<'_>, track_id: i32) -> Result<DeleteTrackPayload> {
        let service = ctx.data_unchecked::<TrackService>();

        service
            .delete_track(ctx.caller(), i64::from(track_id))
            .await
            .map_err(|e| e.extend())?;

        Ok(DeleteTrackPayload {
            track_id: Some(track_id),
        })
    }
}
