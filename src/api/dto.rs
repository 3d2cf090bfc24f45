use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn default_lang() -> String {
    "en".to_string()
}

fn default_user_id() -> String {
    "anonymous".to_string()
}

fn default_true() -> bool {
    true
}

// ==================== REQUEST DTOs ====================

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ChatRequest {
    pub message: String,
    /// Optional: en, pt-BR, es
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Prior messages from the current conversation window
    #[serde(default)]
    pub history: Vec<MessageDto>,
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MessageDto {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TtsRequest {
    pub text: String,
    #[serde(default = "default_lang")]
    pub lang: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MoodLogRequest {
    pub user_id: String,
    /// 1 = very low ... 5 = very well
    pub mood_value: i32,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TechniqueTrackRequest {
    pub user_id: String,
    pub technique: String,
    /// 1 = did not help ... 5 = helped a lot
    pub effectiveness: i32,
    #[serde(default)]
    pub context: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SessionLogRequest {
    pub user_id: String,
    pub session_id: String,
    pub duration_seconds: i64,
    #[serde(default = "default_true")]
    pub completed: bool,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct JournalCreateRequest {
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub mood: i32,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SosTriggerRequest {
    pub user_id: String,
    /// Optional {latitude, longitude, city}
    #[serde(default)]
    pub location: Option<serde_json::Value>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EmergencyContactRequest {
    pub user_id: String,
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AudioEventRequest {
    pub user_id: String,
    pub event_type: String,
    pub track: String,
    #[serde(default)]
    pub context: String,
}

// ==================== RESPONSE DTOs ====================

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
    pub is_crisis: bool,
    pub correlation_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TranscriptionResponse {
    pub text: String,
    pub lang_detected: String,
    pub correlation_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u32,
}
