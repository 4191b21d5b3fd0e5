//! Process entry point: configuration, logging, wiring, serving.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use the_paths::adapters::ai::{OpenAiCompletionService, OpenAiConfig};
use the_paths::adapters::http::{router, AppState};
use the_paths::application::SessionController;
use the_paths::config::AppConfig;
use the_paths::ports::CompletionService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let api_key = config
        .ai
        .openai_api_key
        .clone()
        .ok_or("OPENAI_API_KEY is required")?;
    let completion: Arc<dyn CompletionService> = Arc::new(OpenAiCompletionService::new(
        OpenAiConfig::new(api_key)
            .with_model(config.ai.model.clone())
            .with_timeout(config.ai.timeout()),
    ));

    let state = AppState::new(SessionController::new(completion));
    let addr = config.server.socket_addr();

    tracing::info!(%addr, model = %config.ai.model, "server running");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
