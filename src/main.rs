use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jeopardy::{api, catalog::HttpCatalog, config::AppConfig, state::AppState, ws};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist, only log if it's a different issue
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jeopardy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Jeopardy...");

    let config = AppConfig::from_env();
    tracing::info!(
        "Using clue API {} ({} categories x {} clues)",
        config.api_url,
        config.game.category_count,
        config.game.clues_per_category
    );

    let catalog = HttpCatalog::new(&config.api_url, config.fetch_timeout)?;
    let state = Arc::new(AppState::new(Arc::new(catalog), config.game.clone()));

    let app = Router::new()
        .route("/ws", get(ws::ws_handler))
        .route("/api/board", get(api::get_board))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
