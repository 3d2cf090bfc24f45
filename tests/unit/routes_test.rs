use alma_server::api::routes::{create_router, AppState};
use alma_server::config::Config;
use alma_server::orchestrator::ConversationOrchestrator;
use alma_server::services::{CompletionClient, SpeechClient};
use alma_server::storage::{init_db, SeaOrmWellnessRepository, WellnessRepository};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceExt;

fn test_config() -> Config {
    Config {
        server_port: 8080,
        database_url: "sqlite::memory:".to_string(),
        llm_base_url: "http://127.0.0.1:1".to_string(),
        llm_api_key: "test-key".to_string(),
        chat_model: "gpt-4o-mini".to_string(),
        summarization_model: "gpt-4o-mini".to_string(),
        summarization_enabled: false,
        transcription_model: "whisper-1".to_string(),
        tts_model: "tts-1".to_string(),
        tts_voice: "alloy".to_string(),
        log_level: "info".to_string(),
    }
}

async fn test_app() -> Router {
    let config = test_config();
    let db = init_db("sqlite::memory:").await.unwrap();
    let repo: Arc<dyn WellnessRepository> = Arc::new(SeaOrmWellnessRepository::new(db));

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
    let orchestrator = Arc::new(ConversationOrchestrator::new(repo.clone(), llm, &config));

    create_router(AppState {
        config: Arc::new(RwLock::new(config)),
        repo,
        orchestrator,
        speech,
    })
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_reports_api_configured() {
    let app = test_app().await;

    let response = app
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["api_configured"], true);
}

#[tokio::test]
async fn test_mood_trend_for_unknown_user_is_no_data() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::get("/api/mood-trend/ghost/7")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["trend"]["trend"], "sem_dados");
    assert_eq!(body["trend"]["sample_count"], 0);
}

#[tokio::test]
async fn test_invalid_mood_is_rejected_with_400() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::post("/api/mood")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::json!({"user_id": "u1", "mood_value": 9}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_mood_logging_succeeds() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::post("/api/mood")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::json!({"user_id": "u1", "mood_value": 4, "note": "melhor hoje"})
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["mood"], 4);
}

#[tokio::test]
async fn test_audio_tracks_catalog() {
    let app = test_app().await;

    let response = app
        .oneshot(Request::get("/api/audio/tracks").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["tracks"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_audio_session_config_falls_back() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::get("/api/audio/session/unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["audio"]["track"], "gentle_rain.mp3");
    assert_eq!(body["audio"]["loop"], true);
}

#[tokio::test]
async fn test_subscription_for_unknown_user_is_free() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::get("/api/subscription/ghost")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["subscription"]["is_premium"], false);
    assert_eq!(body["subscription"]["plan"], "free");
}

#[tokio::test]
async fn test_user_context_endpoint_creates_user_lazily() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::get("/api/user-context/fresh-user")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["context"]["profile"]["display_name"], "Usuário");
    assert_eq!(
        body["context"]["memories"],
        serde_json::json!(["Nenhuma memória", "Nenhuma memória", "Nenhuma memória"])
    );
}
