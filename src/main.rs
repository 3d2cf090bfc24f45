use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Import our modules
use alma_server::{
    api::routes,
    config::Config,
    orchestrator::ConversationOrchestrator,
    services::{completion_client::CompletionClient, speech_client::SpeechClient},
    storage::{self, repository::SeaOrmWellnessRepository},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "alma_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load config
    let config = Config::load()?;

    // Initialize database
    let db_conn = storage::init_db(&config.database_url).await?;
    let repository = Arc::new(SeaOrmWellnessRepository::new(db_conn));

    // Completion + speech clients against the OpenAI-compatible provider
    let llm = Arc::new(CompletionClient::new(
        config.llm_base_url.clone(),
        config.llm_api_key.clone(),
    ));
    let speech = Arc::new(SpeechClient::new(
        config.llm_base_url.clone(),
        config.llm_api_key.clone(),
        config.transcription_model.clone(),
        config.tts_model.clone(),
        config.tts_voice.clone(),
    ));

    if config.llm_api_key.is_empty() {
        tracing::warn!("No LLM API key configured; replies will use the fallback path");
    }

    // Verify provider health on startup; the server still starts degraded
    match llm.health_check().await {
        Ok(true) => tracing::info!("LLM provider reachable"),
        Ok(false) => tracing::warn!("LLM provider health check returned failure status"),
        Err(e) => tracing::warn!(
            "LLM provider not available: {}. Chat will answer with the fallback message.",
            e
        ),
    }

    // Wire the per-turn pipeline
    let orchestrator = Arc::new(ConversationOrchestrator::new(
        repository.clone(),
        llm,
        &config,
    ));

    let port = config.server_port;
    let state = routes::AppState {
        config: Arc::new(RwLock::new(config)),
        repo: repository,
        orchestrator,
        speech,
    };

    let app = routes::create_router(state);

    // Start server
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Chat endpoint: POST /api/chat");

    axum::serve(listener, app).await?;

    Ok(())
}
