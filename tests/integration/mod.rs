// tests/integration/mod.rs

// ============================================
// Re-export commonly used types
// ============================================
pub use serde_json::json;
pub use std::sync::Arc;

use alma_server::{
    api::routes::{create_router, AppState},
    config::Config,
    orchestrator::ConversationOrchestrator,
    services::{CompletionClient, SpeechClient},
    storage::{init_db, SeaOrmWellnessRepository, WellnessRepository},
};
use axum::Router;
use tokio::sync::RwLock;

// ============================================
// Public modules (test files)
// ============================================
pub mod api;

// ============================================
// Shared Test Helpers
// ============================================

pub fn test_config(llm_base_url: String, summarization_enabled: bool) -> Config {
    Config {
        server_port: 8080,
        database_url: "sqlite::memory:".to_string(),
        llm_base_url,
        llm_api_key: "test-key".to_string(),
        chat_model: "gpt-4o-mini".to_string(),
        summarization_model: "gpt-4o-mini".to_string(),
        summarization_enabled,
        transcription_model: "whisper-1".to_string(),
        tts_model: "tts-1".to_string(),
        tts_voice: "alloy".to_string(),
        log_level: "info".to_string(),
    }
}

pub async fn test_repo() -> Arc<dyn WellnessRepository> {
    let db = init_db("sqlite::memory:").await.unwrap();
    Arc::new(SeaOrmWellnessRepository::new(db))
}

pub async fn test_orchestrator(
    llm_base_url: String,
    summarization_enabled: bool,
) -> (Arc<dyn WellnessRepository>, ConversationOrchestrator) {
    let config = test_config(llm_base_url, summarization_enabled);
    let repo = test_repo().await;
    let llm = Arc::new(CompletionClient::new(
        config.llm_base_url.clone(),
        config.llm_api_key.clone(),
    ));

    let orchestrator = ConversationOrchestrator::new(repo.clone(), llm, &config);
    (repo, orchestrator)
}

pub async fn test_app(llm_base_url: String) -> (Arc<dyn WellnessRepository>, Router) {
    let config = test_config(llm_base_url, false);
    let repo = test_repo().await;

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
    let orchestrator = Arc::new(ConversationOrchestrator::new(
        repo.clone(),
        llm,
        &config,
    ));

    let app = create_router(AppState {
        config: Arc::new(RwLock::new(config)),
        repo: repo.clone(),
        orchestrator,
        speech,
    });

    (repo, app)
}

/// Standard chat completion payload the mock provider answers with.
pub fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    })
}
