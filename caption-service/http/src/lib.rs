use std::sync::Arc;

use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use caption_application::FetchTranscriptCommandHandler;
use caption_configuration::{CorsConfig, ServerConfig};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod extract;
pub mod handlers;

pub use error::{error_mapper, HttpError};
pub use extract::JsonBody;
pub use handlers::*;

#[derive(Clone)]
pub struct AppState {
    pub command_handler: Arc<FetchTranscriptCommandHandler>,
}

impl AppState {
    pub fn new(command_handler: Arc<FetchTranscriptCommandHandler>) -> Self {
        Self { command_handler }
    }
}

pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/transcript", post(fetch_transcript))
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Mirrored instead of `*`: wildcards cannot be combined with credentials.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(config.allow_credentials)
}

pub async fn serve(router: Router, config: &ServerConfig) -> anyhow::Result<()> {
    let address = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    tracing::info!(address = %listener.local_addr()?, "caption http server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server terminated")
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(err) => {
            tracing::warn!(error = %err, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
