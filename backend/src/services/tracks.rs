//! Track and like operations
//!
//! Every operation takes the request's [`Caller`] explicitly. Lookups that
//! find nothing become [`ApiError::NotFound`]; ownership is decided with
//! [`Caller::ownership_of`].

use crate::db::{CreateTrack, Database, LikeRecord, TrackFilter, TrackRecord, UpdateTrack};
use crate::error::{ApiError, ApiResult};
use crate::services::caller::{Caller, Ownership};

pub const LOGIN_TO_ADD_TRACK: &str = "Login to add a track";
pub const NOT_PERMITTED_TO_UPDATE: &str = "Not permitted to update this track.";
pub const NOT_PERMITTED_TO_DELETE: &str = "not permitted to delete track";
pub const NOT_LOGGED_IN: &str = "not logged in";

/// Editable track fields as received from the client. Missing values are stored as empty text.
#[derive(Debug, Clone, Default)]
pub struct TrackFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

impl TrackFields {
    fn into_update(self) -> UpdateTrack {
        UpdateTrack {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            url: self.url.unwrap_or_default(),
        }
    }
}

#[derive(Clone)]
pub struct TrackService {
    db: Database,
}

impl TrackService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All tracks, or those matching `search` in title, description, url or owner username
    pub async fn list_tracks(&self, search: Option<&str>) -> ApiResult<Vec<TrackRecord>> {
        let filter = search.map(TrackFilter::search).unwrap_or_default();
        Ok(self.db.tracks().list_filtered(&filter).await?)
    }

    pub async fn list_likes(&self) -> ApiResult<Vec<LikeRecord>> {
        Ok(self.db.likes().list_all().await?)
    }

    pub async fn get_track(&self, track_id: i64) -> ApiResult<TrackRecord> {
        self.db
            .tracks()
            .get_by_id(track_id)
            .await?
            .ok_or_else(|| ApiError::track_not_found(track_id))
    }

    pub async fn create_track(&self, caller: &Caller, fields: TrackFields) -> ApiResult<TrackRecord> {
        let user = caller.require_user(LOGIN_TO_ADD_TRACK)?;
        let fields = fields.into_update();

        let track = self
            .db
            .tracks()
            .create(CreateTrack {
                title: fields.title,
                description: fields.description,
                url: fields.url,
                posted_by_id: user.user_id,
            })
            .await?;

        tracing::info!(user_id = user.user_id, track_id = track.id, "Track created");
        Ok(track)
    }

    /// Overwrite title, description and url of a track owned by the caller
    pub async fn update_track(
        &self,
        caller: &Caller,
        track_id: i64,
        fields: TrackFields,
    ) -> ApiResult<TrackRecord> {
        let track = self.get_track(track_id).await?;
        if caller.ownership_of(track.posted_by_id) != Ownership::Owner {
            tracing::info!(track_id, caller = ?caller.user().map(|u| u.user_id), "Track update denied");
            return Err(ApiError::PermissionDenied(NOT_PERMITTED_TO_UPDATE));
        }

        let updated = self
            .db
            .tracks()
            .update(track_id, fields.into_update())
            .await?
            .ok_or_else(|| ApiError::track_not_found(track_id))?;

        tracing::info!(track_id, "Track updated");
        Ok(updated)
    }

    /// Delete a track owned by the caller, returning its id
    pub async fn delete_track(&self, caller: &Caller, track_id: i64) -> ApiResult<i64> {
        let track = self.get_track(track_id).await?;
        if caller.ownership_of(track.posted_by_id) != Ownership::Owner {
            tracing::info!(track_id, caller = ?caller.user().map(|u| u.user_id), "Track delete denied");
            return Err(ApiError::PermissionDenied(NOT_PERMITTED_TO_DELETE));
        }

        if !self.db.tracks().delete(track_id).await? {
            return Err(ApiError::track_not_found(track_id));
        }

        tracing::info!(track_id, "Track deleted");
        Ok(track_id)
    }

    /// Record a like by the caller. Returns the like and the liked track.
    pub async fn create_like(
        &self,
        caller: &Caller,
        track_id: i64,
    ) -> ApiResult<(LikeRecord, TrackRecord)> {
        let user = caller.require_user(NOT_LOGGED_IN)?;
        let track = self.get_track(track_id).await?;

        let like = self.db.likes().create(user.user_id, track.id).await?;

        tracing::info!(user_id = user.user_id, track_id, like_id = like.id, "Track liked");
        Ok((like, track))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::CreateUser;
    use crate::services::caller::AuthUser;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    struct Fixture {
        service: TrackService,
        db: Database,
        alice: Caller,
        bob: Caller,
    }

    async fn fixture() -> Fixture {
        let db = Database::connect_in_memory().await.unwrap();
        db.migrate().await.unwrap();

        let mut callers = Vec::new();
        for name in ["alice", "bob"] {
            let user = db
                .users()
                .create(CreateUser {
                    username: name.to_string(),
                    email: None,
                    password_hash: "x".to_string(),
                })
                .await
                .unwrap();
            callers.push(Caller::User(AuthUser {
                user_id: user.id,
                username: user.username,
            }));
        }
        let bob = callers.pop().unwrap();
        let alice = callers.pop().unwrap();

        Fixture {
            service: TrackService::new(db.clone()),
            db,
            alice,
            bob,
        }
    }

    fn fields(title: &str, description: &str, url: &str) -> TrackFields {
        TrackFields {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            url: Some(url.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_track_requires_login() {
        let f = fixture().await;
        let result = f
            .service
            .create_track(&Caller::Anonymous, fields("Lofi", "", ""))
            .await;

        assert_matches!(result, Err(ApiError::PermissionDenied(LOGIN_TO_ADD_TRACK)));
        assert!(f.db.tracks().list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_track_is_owned_by_caller() {
        let f = fixture().await;
        let track = f
            .service
            .create_track(&f.alice, fields("Lofi", "chill beats", "https://example.com/lofi"))
            .await
            .unwrap();

        assert_eq!(track.title, "Lofi");
        assert_eq!(track.description, "chill beats");
        assert_eq!(track.url, "https://example.com/lofi");
        assert_eq!(track.posted_by_id, f.alice.user().map(|u| u.user_id));

        let all = f.db.tracks().list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, track.id);
    }

    #[tokio::test]
    async fn test_create_track_with_missing_fields_stores_empty_text() {
        let f = fixture().await;
        let track = f
            .service
            .create_track(&f.alice, TrackFields::default())
            .await
            .unwrap();
        assert_eq!(track.title, "");
        assert_eq!(track.url, "");
    }

    #[tokio::test]
    async fn test_update_by_other_user_is_denied_and_unchanged() {
        let f = fixture().await;
        let track = f
            .service
            .create_track(&f.alice, fields("Lofi", "chill", "https://a"))
            .await
            .unwrap();

        let result = f
            .service
            .update_track(&f.bob, track.id, fields("Lofi2", "", ""))
            .await;
        assert_matches!(result, Err(ApiError::PermissionDenied(msg)) if msg == "Not permitted to update this track.");

        let stored = f.service.get_track(track.id).await.unwrap();
        assert_eq!(stored.title, "Lofi");
        assert_eq!(stored.description, "chill");
    }

    #[tokio::test]
    async fn test_update_by_anonymous_is_denied() {
        let f = fixture().await;
        let track = f
            .service
            .create_track(&f.alice, fields("Lofi", "", ""))
            .await
            .unwrap();

        let result = f
            .service
            .update_track(&Caller::Anonymous, track.id, fields("x", "", ""))
            .await;
        assert_matches!(result, Err(ApiError::PermissionDenied(NOT_PERMITTED_TO_UPDATE)));
    }

    #[tokio::test]
    async fn test_update_by_owner_overwrites_all_fields() {
        let f = fixture().await;
        let track = f
            .service
            .create_track(&f.alice, fields("Lofi", "chill", "https://a"))
            .await
            .unwrap();

        let updated = f
            .service
            .update_track(&f.alice, track.id, fields("Lofi2", "", ""))
            .await
            .unwrap();
        assert_eq!(updated.title, "Lofi2");
        assert_eq!(updated.description, "");
        assert_eq!(updated.url, "");

        let stored = f.service.get_track(track.id).await.unwrap();
        assert_eq!(stored.title, "Lofi2");
        assert_eq!(stored.posted_by_id, track.posted_by_id);
    }

    #[tokio::test]
    async fn test_update_missing_track_is_not_found() {
        let f = fixture().await;
        let result = f
            .service
            .update_track(&f.alice, 404, TrackFields::default())
            .await;
        assert_matches!(result, Err(ApiError::NotFound { id: 404, .. }));
    }

    #[tokio::test]
    async fn test_delete_track() {
        let f = fixture().await;
        let track = f
            .service
            .create_track(&f.alice, fields("Lofi", "", ""))
            .await
            .unwrap();

        assert_matches!(
            f.service.delete_track(&f.bob, track.id).await,
            Err(ApiError::PermissionDenied(NOT_PERMITTED_TO_DELETE))
        );
        assert_matches!(
            f.service.delete_track(&Caller::Anonymous, track.id).await,
            Err(ApiError::PermissionDenied(NOT_PERMITTED_TO_DELETE))
        );

        assert_eq!(f.service.delete_track(&f.alice, track.id).await.unwrap(), track.id);
        assert_matches!(
            f.service.get_track(track.id).await,
            Err(ApiError::NotFound { .. })
        );
        assert_matches!(
            f.service.delete_track(&f.alice, track.id).await,
            Err(ApiError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn test_create_like() {
        let f = fixture().await;
        let track = f
            .service
            .create_track(&f.alice, fields("Lofi", "", ""))
            .await
            .unwrap();

        assert_matches!(
            f.service.create_like(&Caller::Anonymous, track.id).await,
            Err(ApiError::PermissionDenied(NOT_LOGGED_IN))
        );
        assert_matches!(
            f.service.create_like(&f.bob, 999).await,
            Err(ApiError::NotFound { id: 999, .. })
        );

        let (first, liked) = f.service.create_like(&f.bob, track.id).await.unwrap();
        assert_eq!(liked.id, track.id);
        assert_eq!(Some(first.user_id), f.bob.user().map(|u| u.user_id));
        assert_eq!(first.track_id, track.id);

        let (second, _) = f.service.create_like(&f.bob, track.id).await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(f.service.list_likes().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_tracks_with_and_without_search() {
        let f = fixture().await;
        f.service
            .create_track(&f.alice, fields("Lofi", "chill", "https://a"))
            .await
            .unwrap();
        f.service
            .create_track(&f.bob, fields("Techno", "loud", "https://b"))
            .await
            .unwrap();

        assert_eq!(f.service.list_tracks(None).await.unwrap().len(), 2);
        assert_eq!(f.service.list_tracks(Some("")).await.unwrap().len(), 2);

        let by_owner = f.service.list_tracks(Some("BOB")).await.unwrap();
        assert_eq!(by_owner.len(), 1);
        assert_eq!(by_owner[0].title, "Techno");

        assert!(f.service.list_tracks(Some("ambient")).await.unwrap().is_empty());
    }
}
