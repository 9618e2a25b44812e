//! Zinc shopping assistant API server.

use std::sync::Arc;

use api::{router, AppState, Config, ProviderKind};
use chat_core::{ModelProvider, ToolExecutor};
use database::Database;
use mock_model::{EchoModel, FixedProvider};
use openai_model::OpenAiProvider;
use tracing::info;
use zinc_tools::{shopping_executor, ZincConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting shopping API");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    let models: Arc<dyn ModelProvider> = match config.provider {
        ProviderKind::OpenAi => Arc::new(OpenAiProvider::from_env()?),
        ProviderKind::Echo => {
            info!("Using offline echo model");
            Arc::new(FixedProvider::new(Arc::new(EchoModel::new())))
        }
    };

    let tools: Arc<dyn ToolExecutor> = Arc::new(shopping_executor(&ZincConfig::from_env()?)?);
    info!("Tools: {}", tools.supported_tools().join(", "));

    if config.api_token.is_some() {
        info!("Bearer token required on /api routes");
    }

    info!("Prompt mode: {:?}", config.prompt_mode);
    let state = AppState::new(db, models, tools, config.limits)
        .with_api_token(config.api_token)
        .with_prompt_mode(config.prompt_mode);
    let app = router(state);

    // Start server
    info!(addr = %config.addr, "Shopping API listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
