use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use assist_core::{AssistConfig, Responder, constants::DEFAULT_LISTEN_ADDR};

/// Main entry point for the assistant service
///
/// Loads the knowledge tables, connects the remote inference client and serves the REST API
/// with Swagger UI.
///
/// # Environment Variables
/// - `ASSIST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `ASSIST_REMOTE_URL`: base URL of the inference service (default: "http://localhost:8000")
/// - `ASSIST_REMOTE_TIMEOUT_SECS`: bound on one remote call (default: 15)
/// - `ASSIST_THINKING_DELAY_MS`: "min-max" or a fixed value (default: "1500-2500")
/// - `ASSIST_KNOWLEDGE_DIR`: optional directory replacing the embedded tables
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, table loading or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("assist_run=info".parse()?)
                .add_directive("assist_core=info".parse()?)
                .add_directive("knowledge=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("ASSIST_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.into());

    let cfg = AssistConfig::from_env()?;
    let responder = Arc::new(Responder::from_config(&cfg)?);

    tracing::info!("++ Starting assistant REST on {}", rest_addr);

    let app = router(AppState::new(responder));
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
