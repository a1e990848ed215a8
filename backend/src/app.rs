//! Application state and HTTP router construction.

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::Config;
use crate::db::Database;
use crate::graphql::{TrackshareSchema, build_schema};
use crate::services::{AuthService, TokenIssuer};

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub schema: TrackshareSchema,
    pub tokens: TokenIssuer,
}

impl AppState {
    /// Wire services and the schema on top of a connected database
    pub fn new(config: &Config, db: Database) -> Self {
        let tokens = TokenIssuer::new(&config.jwt_secret, config.token_ttl_secs);
        let auth = AuthService::new(db.clone(), tokens.clone(), config.bcrypt_cost);
        let schema = build_schema(db.clone(), auth);

        Self {
            db,
            schema,
            tokens,
        }
    }
}

/// Build the full Axum router: /graphql, health probes and layers.
pub fn build_app(state: AppState) -> Router<()> {
    Router::new()
        .merge(api::health::router())
        .merge(api::graphql::router())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;
    use crate::db::UserRecord;

    #[tokio::test]
    async fn test_state_signs_with_configured_secret() {
        let db = Database::connect_in_memory().await.unwrap();
        db.migrate().await.unwrap();
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_url: "sqlite::memory:".to_string(),
            database_max_connections: 1,
            jwt_secret: "configured-secret".to_string(),
            token_ttl_secs: 60,
            bcrypt_cost: 4,
            log_format: LogFormat::Json,
        };

        let state = AppState::new(&config, db);
        let user = UserRecord {
            id: 3,
            username: "carol".to_string(),
            email: None,
            password_hash: String::new(),
            date_joined: String::new(),
        };
        let token = state.tokens.issue(&user).unwrap();

        let verified = TokenIssuer::new("configured-secret", 60).verify(&token).unwrap();
        assert_eq!(verified.user_id, 3);
        assert!(TokenIssuer::new("other-secret", 60).verify(&token).is_err());
    }
}
