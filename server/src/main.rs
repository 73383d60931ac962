//! Skill Server - Main Entry Point
//!
//! Serves the sample skill over HTTP.

use anyhow::Result;
use tracing::info;

use skill_server::{api, auth::RequestAuthenticator, config, demo};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skill_server=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        validate_requests = config.validate_requests,
        tolerance_secs = config.timestamp_tolerance_secs,
        "Starting Skill Server"
    );

    let authenticator = RequestAuthenticator::from_config(&config)?;
    let skill = demo::demo_skill()?;

    // Build application state
    let state = api::AppState::new(config.clone(), authenticator, skill);

    // Build router
    let app = api::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(address = %config.bind_address, "Server listening");

    // Graceful shutdown handler
    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Received shutdown signal");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");

    Ok(())
}
