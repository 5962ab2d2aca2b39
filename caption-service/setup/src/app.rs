use std::sync::Arc;
use std::time::Duration;

use anyhow::Error;
use axum::Router;
use caption_application::{
    FetchTranscriptCommandHandler, FetchTranscriptUseCase, FetchTranscriptUseCaseImpl,
};
use caption_configuration::{AppConfig, ServerConfig};
use caption_domain::TranscriptProviderPort;
use caption_http_server::{create_router, serve, AppState};
use caption_infra_youtube::{YouTubeAdapterConfig, YouTubeTranscriptAdapter};

pub async fn build_and_run(config: AppConfig) -> Result<(), Error> {
    let server_config = config.server.clone();
    let app = Application::new(config)?;
    app.run(server_config).await
}

pub struct Application {
    pub config: AppConfig,
    pub command_handler: Arc<FetchTranscriptCommandHandler>,
}

impl Application {
    pub fn new(config: AppConfig) -> Result<Self, Error> {
        let youtube = &config.service.youtube;
        tracing::info!(
            base_url = %youtube.base_url,
            default_language = %config.service.default_language,
            request_timeout_secs = youtube.request_timeout_secs.unwrap_or(0),
            "initializing caption application"
        );

        let provider: Arc<dyn TranscriptProviderPort> =
            Arc::new(YouTubeTranscriptAdapter::new(YouTubeAdapterConfig {
                base_url: youtube.base_url.clone(),
                accept_language: youtube.accept_language.clone(),
                request_timeout: youtube.request_timeout_secs.map(Duration::from_secs),
            })?);

        Ok(Self::with_provider(config, provider))
    }

    /// Wires the application around an already built provider.
    pub fn with_provider(config: AppConfig, provider: Arc<dyn TranscriptProviderPort>) -> Self {
        let usecase: Arc<dyn FetchTranscriptUseCase> = Arc::new(FetchTranscriptUseCaseImpl::new(
            provider,
            config.service.default_language.clone(),
        ));
        let command_handler = Arc::new(FetchTranscriptCommandHandler::new(usecase));

        Self {
            config,
            command_handler,
        }
    }

    pub fn router(&self) -> Router {
        create_router(
            AppState::new(self.command_handler.clone()),
            &self.config.cors,
        )
    }

    pub async fn run(self, server_config: ServerConfig) -> Result<(), Error> {
        tracing::info!(
            host = %server_config.host,
            port = server_config.port,
            "starting caption HTTP server"
        );

        serve(self.router(), &server_config).await
    }
}
