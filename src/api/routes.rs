use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{AppendHeaders, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::{
    api::dto::*,
    audio,
    config::Config,
    models::internal::{
        NewAudioEvent, NewJournalEntry, NewMoodLog, NewSessionCompletion, NewSosEvent,
        NewTechniqueUsage, SosContact,
    },
    orchestrator::{ChatTurn, ConversationOrchestrator},
    services::{completion_client::ChatMessage, speech_client::SpeechClient},
    storage::repository::{RepositoryError, WellnessRepository},
    subscription,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub repo: Arc<dyn WellnessRepository>,
    pub orchestrator: Arc<ConversationOrchestrator>,
    pub speech: Arc<SpeechClient>,
}

#[derive(Deserialize)]
pub struct LimitParams {
    limit: Option<u64>,
}

#[derive(Deserialize)]
pub struct JournalParams {
    limit: Option<u64>,
    tag: Option<String>,
}

fn repo_error(e: RepositoryError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &e {
        RepositoryError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        RepositoryError::NotFound(_) => StatusCode::NOT_FOUND,
        RepositoryError::DbError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
            code: status.as_u16() as u32,
        }),
    )
}

// ==================== CORE CHAT ====================

/// The chat path never surfaces a hard error: the orchestrator degrades
/// internally and always produces a reply.
pub async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4().to_string();
    tracing::info!(
        "[{}] Chat request: {}... (user: {})",
        correlation_id,
        req.message.chars().take(50).collect::<String>(),
        req.user_id
    );

    let history = req
        .history
        .into_iter()
        .map(|m| ChatMessage::new(m.role, m.content))
        .collect();

    let outcome = state
        .orchestrator
        .handle_turn(ChatTurn {
            user_id: req.user_id,
            message: req.message,
            history,
            language: req.lang,
        })
        .await;

    (
        AppendHeaders([("x-correlation-id", correlation_id.clone())]),
        Json(ChatResponse {
            response: outcome.response,
            is_crisis: outcome.is_crisis,
            correlation_id,
        }),
    )
}

pub async fn get_user_context(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let context = state
        .orchestrator
        .context_assembler
        .build_context(&user_id)
        .await
        .map_err(repo_error)?;

    Ok(Json(serde_json::json!({
        "user_id": user_id,
        "context": context,
    })))
}

pub async fn get_user_memories(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let memories = state
        .repo
        .find_recent_memories(&user_id, 10)
        .await
        .map_err(repo_error)?;

    Ok(Json(serde_json::json!({
        "user_id": user_id,
        "memories": memories,
    })))
}

pub async fn get_risk_events(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let events = state
        .repo
        .find_recent_risk_events(&user_id, 10)
        .await
        .map_err(repo_error)?;

    Ok(Json(serde_json::json!({
        "user_id": user_id,
        "risk_events": events,
    })))
}

// ==================== SPEECH ====================

pub async fn transcribe(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranscriptionResponse>, (StatusCode, Json<ErrorResponse>)> {
    let correlation_id = Uuid::new_v4().to_string();

    let mut audio_bytes = None;
    let mut filename = "audio.webm".to_string();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Invalid multipart body: {}", e),
                code: 400,
            }),
        )
    })? {
        if field.name() == Some("file") {
            if let Some(name) = field.file_name() {
                filename = name.to_string();
            }
            let bytes = field.bytes().await.map_err(|e| {
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read audio: {}", e),
                        code: 400,
                    }),
                )
            })?;
            audio_bytes = Some(bytes.to_vec());
        }
    }

    let audio_bytes = audio_bytes.ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Missing 'file' field".to_string(),
                code: 400,
            }),
        )
    })?;

    tracing::info!("[{}] STT: received {} bytes", correlation_id, audio_bytes.len());

    let transcription = state
        .speech
        .transcribe(audio_bytes, filename)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Transcription failed: {}", e),
                    code: 500,
                }),
            )
        })?;

    Ok(Json(TranscriptionResponse {
        text: transcription.text,
        lang_detected: transcription.language,
        correlation_id,
    }))
}

pub async fn tts(
    State(state): State<AppState>,
    Json(req): Json<TtsRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let correlation_id = Uuid::new_v4().to_string();
    tracing::info!(
        "[{}] TTS: {} chars ({})",
        correlation_id,
        req.text.chars().count(),
        req.lang
    );

    let audio_bytes = state.speech.synthesize(&req.text).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("TTS failed: {}", e),
                code: 500,
            }),
        )
    })?;

    Ok((
        AppendHeaders([
            (header::CONTENT_TYPE, "audio/mpeg".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "inline; filename=speech.mp3".to_string(),
            ),
        ]),
        audio_bytes,
    ))
}

// ==================== MOOD ====================

pub async fn log_mood(
    State(state): State<AppState>,
    Json(req): Json<MoodLogRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    state
        .repo
        .insert_mood_log(NewMoodLog {
            user_id: req.user_id,
            mood_value: req.mood_value,
            note: req.note,
        })
        .await
        .map_err(repo_error)?;

    Ok(Json(
        serde_json::json!({ "success": true, "mood": req.mood_value }),
    ))
}

pub async fn get_mood_trend(
    State(state): State<AppState>,
    Path((user_id, days)): Path<(String, i64)>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let trend = state
        .orchestrator
        .trend_analyzer
        .mood_trend(&user_id, days)
        .await
        .map_err(repo_error)?;

    Ok(Json(serde_json::json!({
        "user_id": user_id,
        "trend": trend,
    })))
}

// ==================== TECHNIQUES ====================

pub async fn track_technique(
    State(state): State<AppState>,
    Json(req): Json<TechniqueTrackRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    state
        .repo
        .insert_technique_usage(NewTechniqueUsage {
            user_id: req.user_id,
            technique: req.technique.clone(),
            effectiveness: req.effectiveness,
            context: req.context,
        })
        .await
        .map_err(repo_error)?;

    Ok(Json(
        serde_json::json!({ "success": true, "technique": req.technique }),
    ))
}

pub async fn get_best_techniques(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<LimitParams>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let limit = params.limit.unwrap_or(5) as usize;
    let techniques = state
        .orchestrator
        .trend_analyzer
        .best_techniques(&user_id, limit)
        .await
        .map_err(repo_error)?;

    Ok(Json(serde_json::json!({
        "user_id": user_id,
        "techniques": techniques,
    })))
}

// ==================== GUIDED SESSIONS ====================

pub async fn log_session(
    State(state): State<AppState>,
    Json(req): Json<SessionLogRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    state
        .repo
        .insert_session(NewSessionCompletion {
            user_id: req.user_id,
            session_id: req.session_id.clone(),
            duration_seconds: req.duration_seconds,
            completed: req.completed,
            notes: req.notes,
        })
        .await
        .map_err(repo_error)?;

    Ok(Json(
        serde_json::json!({ "success": true, "session_id": req.session_id }),
    ))
}

pub async fn get_sessions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<LimitParams>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let limit = params.limit.unwrap_or(10);
    let sessions = state
        .repo
        .find_recent_sessions(&user_id, limit)
        .await
        .map_err(repo_error)?;
    let stats = state.repo.session_stats(&user_id).await.map_err(repo_error)?;

    Ok(Json(serde_json::json!({
        "user_id": user_id,
        "sessions": sessions,
        "stats": stats,
    })))
}

// ==================== JOURNAL ====================

pub async fn create_journal_entry(
    State(state): State<AppState>,
    Json(req): Json<JournalCreateRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let entry_id = state
        .repo
        .insert_journal_entry(NewJournalEntry {
            user_id: req.user_id,
            title: req.title,
            content: req.content,
            mood: req.mood,
            tags: req.tags,
        })
        .await
        .map_err(repo_error)?;

    Ok(Json(
        serde_json::json!({ "success": true, "entry_id": entry_id }),
    ))
}

pub async fn get_journal_entries(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<JournalParams>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let limit = params.limit.unwrap_or(20);
    let entries = state
        .repo
        .find_journal_entries(&user_id, limit, params.tag.as_deref())
        .await
        .map_err(repo_error)?;
    let common_tags = state
        .repo
        .journal_common_tags(&user_id, 10)
        .await
        .map_err(repo_error)?;

    Ok(Json(serde_json::json!({
        "user_id": user_id,
        "entries": entries,
        "common_tags": common_tags,
    })))
}

// ==================== SUBSCRIPTION ====================

pub async fn get_subscription(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let user = state.repo.find_user(&user_id).await.map_err(repo_error)?;
    let status = subscription::premium_status(user.is_some());

    Ok(Json(serde_json::json!({
        "user_id": user_id,
        "subscription": status,
    })))
}

// ==================== ADMIN ANALYTICS ====================

pub async fn admin_stats(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let stats = state
        .orchestrator
        .analytics
        .global_stats()
        .await
        .map_err(repo_error)?;

    Ok(Json(serde_json::json!({ "stats": stats })))
}

pub async fn admin_popular_sessions(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let sessions = state
        .orchestrator
        .analytics
        .popular_sessions(10)
        .await
        .map_err(repo_error)?;

    Ok(Json(serde_json::json!({ "sessions": sessions })))
}

pub async fn admin_mood_distribution(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let distribution = state
        .orchestrator
        .analytics
        .mood_distribution()
        .await
        .map_err(repo_error)?;

    Ok(Json(serde_json::json!(distribution)))
}

// ==================== SOS ====================

pub async fn trigger_sos(
    State(state): State<AppState>,
    Json(req): Json<SosTriggerRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let event_id = state
        .repo
        .trigger_sos(NewSosEvent {
            user_id: req.user_id,
            location: req.location,
            notes: req.notes,
        })
        .await
        .map_err(repo_error)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "event_id": event_id,
        "message": "SOS protocol activated",
    })))
}

pub async fn get_emergency_contacts(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let user = state.repo.find_user(&user_id).await.map_err(repo_error)?;
    let contacts = user.map(|u| u.sos_contacts).unwrap_or_default();

    Ok(Json(serde_json::json!({
        "user_id": user_id,
        "contacts": contacts,
    })))
}

pub async fn add_emergency_contact(
    State(state): State<AppState>,
    Json(req): Json<EmergencyContactRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    state
        .repo
        .add_sos_contact(
            &req.user_id,
            SosContact {
                name: req.name,
                phone: req.phone,
            },
        )
        .await
        .map_err(repo_error)?;

    Ok(Json(serde_json::json!({ "success": true })))
}

pub async fn get_sos_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<LimitParams>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let limit = params.limit.unwrap_or(10);
    let history = state
        .repo
        .find_sos_history(&user_id, limit)
        .await
        .map_err(repo_error)?;

    Ok(Json(serde_json::json!({
        "user_id": user_id,
        "history": history,
    })))
}

// ==================== AUDIO ====================

pub async fn get_session_audio(Path(session_id): Path<String>) -> Json<serde_json::Value> {
    let config = audio::session_audio(&session_id);
    Json(serde_json::json!({ "session_id": session_id, "audio": config }))
}

pub async fn get_mood_audio(Path(mood_value): Path<i32>) -> Json<serde_json::Value> {
    let config = audio::mood_audio(mood_value);
    Json(serde_json::json!({ "mood": mood_value, "audio": config }))
}

pub async fn get_sos_audio() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "audio": audio::sos_audio() }))
}

pub async fn get_audio_tracks() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "tracks": audio::available_tracks() }))
}

pub async fn suggest_audio(Path(emotion): Path<String>) -> Json<serde_json::Value> {
    let suggestion = audio::suggest_by_emotion(&emotion);
    Json(serde_json::json!({ "emotion": emotion, "suggestion": suggestion }))
}

pub async fn log_audio_event(
    State(state): State<AppState>,
    Json(req): Json<AudioEventRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    state
        .repo
        .insert_audio_event(NewAudioEvent {
            user_id: req.user_id,
            event_type: req.event_type,
            track: req.track,
            context: req.context,
        })
        .await
        .map_err(repo_error)?;

    Ok(Json(serde_json::json!({ "success": true })))
}

// ==================== META ====================

pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Alma API - apoio emocional com memória",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let api_configured = !state.config.read().await.llm_api_key.is_empty();
    Json(serde_json::json!({
        "status": "ok",
        "service": "alma",
        "api_configured": api_configured,
    }))
}

pub async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "name": "Alma API",
        "endpoints": {
            "chat": "POST /api/chat",
            "health": "GET /api/health",
            "version": "GET /api/version",
            "transcribe": "POST /api/transcribe",
            "tts": "POST /api/tts",
        },
        "contract": {
            "chat": {
                "request": {
                    "message": "string",
                    "lang": "string (optional: en|pt-BR|es)",
                    "history": "array (optional)",
                    "user_id": "string (optional)",
                },
                "response": {
                    "response": "string",
                    "is_crisis": "boolean",
                    "correlation_id": "string",
                },
            },
        },
    }))
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/version", get(version))
        .route("/api/chat", post(chat))
        .route("/api/transcribe", post(transcribe))
        .route("/api/tts", post(tts))
        .route("/api/user-context/{user_id}", get(get_user_context))
        .route("/api/user-memories/{user_id}", get(get_user_memories))
        .route("/api/risk-events/{user_id}", get(get_risk_events))
        .route("/api/mood", post(log_mood))
        .route("/api/mood-trend/{user_id}/{days}", get(get_mood_trend))
        .route("/api/technique", post(track_technique))
        .route("/api/best-techniques/{user_id}", get(get_best_techniques))
        .route("/api/session", post(log_session))
        .route("/api/sessions/{user_id}", get(get_sessions))
        .route("/api/journal", post(create_journal_entry))
        .route("/api/journal/{user_id}", get(get_journal_entries))
        .route("/api/subscription/{user_id}", get(get_subscription))
        .route("/api/admin/stats", get(admin_stats))
        .route("/api/admin/popular-sessions", get(admin_popular_sessions))
        .route("/api/admin/mood-distribution", get(admin_mood_distribution))
        .route("/api/sos/trigger", post(trigger_sos))
        .route("/api/sos/contacts/{user_id}", get(get_emergency_contacts))
        .route("/api/sos/contact", post(add_emergency_contact))
        .route("/api/sos/history/{user_id}", get(get_sos_history))
        .route("/api/audio/session/{session_id}", get(get_session_audio))
        .route("/api/audio/mood/{mood_value}", get(get_mood_audio))
        .route("/api/audio/sos", get(get_sos_audio))
        .route("/api/audio/tracks", get(get_audio_tracks))
        .route("/api/audio/suggest/{emotion}", get(suggest_audio))
        .route("/api/audio/event", post(log_audio_event))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
