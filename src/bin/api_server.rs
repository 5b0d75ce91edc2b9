// API Server Binary Entry Point
//
// Purpose: Start the Axum API server over the crop recommender
// Usage: cargo run --features api --bin api_server

use crop_recommender::{AppState, ServiceConfig, create_router};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "crop_recommender=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    let config = ServiceConfig::from_env();

    tracing::info!("Configuration:");
    tracing::info!("  MODEL_PATH: {:?}", config.model_path);
    tracing::info!("  CATALOG_PATH: {:?}", config.catalog_path);
    tracing::info!("  IMAGE_DIR: {}", config.image_dir);
    tracing::info!("  PORT: {}", config.port);

    // Load classifier + catalog; refuse to serve if either fails
    let state = AppState::new(&config)?;
    tracing::info!("Application state initialized successfully");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await?;

    Ok(())
}
