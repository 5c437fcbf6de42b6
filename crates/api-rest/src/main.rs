//! Standalone REST API server binary.
//!
//! Useful during development when only the REST surface is needed. The workspace's main
//! `assist-run` binary serves the same router.

use api_rest::{router, AppState};
use assist_core::{constants::DEFAULT_LISTEN_ADDR, AssistConfig, Responder};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Starts the REST API server.
///
/// # Environment Variables
/// - `ASSIST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `ASSIST_REMOTE_URL`, `ASSIST_REMOTE_TIMEOUT_SECS`, `ASSIST_THINKING_DELAY_MS`,
///   `ASSIST_KNOWLEDGE_DIR`: see [`AssistConfig::from_env`]
///
/// # Errors
/// Returns an error if configuration or knowledge tables are invalid, or the server fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("assist_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("ASSIST_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.into());

    tracing::info!("-- Starting assistant REST API on {}", addr);

    let cfg = AssistConfig::from_env()?;
    let responder = Arc::new(Responder::from_config(&cfg)?);
    let app = router(AppState::new(responder));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
