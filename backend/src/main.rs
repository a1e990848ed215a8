//! Trackshare - GraphQL API for shared tracks and likes
//!
//! All operations are exposed via GraphQL at /graphql.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trackshare::app::{AppState, build_app};
use trackshare::cli::CliOptions;
use trackshare::config::{Config, LogFormat};
use trackshare::db::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = CliOptions::from_args();

    let mut config = Config::from_env()?;
    if let Some(port) = cli.port_override {
        config.port = port;
    }
    if let Some(url) = cli.database_url_override {
        config.database_url = url;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "trackshare=debug,tower_http=debug".into());
    match config.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init(),
    }

    tracing::info!("Starting Trackshare");
    if config.uses_generated_secret() {
        tracing::warn!("JWT_SECRET is not set; using a generated secret, tokens will not survive a restart");
    }

    let db = if cli.print_schema {
        Database::connect_in_memory().await?
    } else {
        Database::connect(&config.database_url, config.database_max_connections).await?
    };
    db.migrate().await?;
    tracing::info!("Database connected");

    let state = AppState::new(&config, db);
    tracing::info!("GraphQL schema built");

    if cli.print_schema {
        println!("{}", state.schema.sdl());
        return Ok(());
    }

    let app = build_app(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);
    tracing::info!("GraphQL playground: http://localhost:{}/graphql", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
