use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// User profile. Created lazily on first contact; `user_id` is the
/// caller-supplied opaque identity and the only join key across entities.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub user_id: String,
    pub display_name: String,
    pub language: String,
    pub country: String,
    pub goals: Vec<String>,
    pub prefers_voice: bool,
    pub sos_contacts: Vec<SosContact>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SosContact {
    pub name: String,
    pub phone: String,
}

/// One chat exchange as stored for audit/history. Append-only, never pruned.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationTurn {
    pub id: String,
    pub user_id: String,
    pub user_message: String,
    pub assistant_response: String,
    pub risk_level: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewConversationTurn {
    pub user_id: String,
    pub user_message: String,
    pub assistant_response: String,
    pub risk_level: i32,
}

/// Compact structured summary of one past exchange, kept for
/// personalization. At most 20 per user; oldest are trimmed after insert.
#[derive(Debug, Clone, Serialize)]
pub struct Memory {
    pub id: String,
    pub user_id: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub techniques_worked: Vec<String>,
    pub next_step: String,
    pub importance: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMemory {
    pub user_id: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub techniques_worked: Vec<String>,
    pub next_step: String,
    pub importance: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskEvent {
    pub id: String,
    pub user_id: String,
    pub event_type: String,
    pub level: i32,
    pub matched_terms: Vec<String>,
    pub message_preview: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewRiskEvent {
    pub user_id: String,
    pub event_type: String,
    pub level: i32,
    pub matched_terms: Vec<String>,
    pub message_preview: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoodLog {
    pub id: String,
    pub user_id: String,
    pub mood_value: i32,
    pub note: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewMoodLog {
    pub user_id: String,
    pub mood_value: i32,
    pub note: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TechniqueUsage {
    pub id: String,
    pub user_id: String,
    pub technique: String,
    pub effectiveness: i32,
    pub context: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewTechniqueUsage {
    pub user_id: String,
    pub technique: String,
    pub effectiveness: i32,
    pub context: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionCompletion {
    pub id: String,
    pub user_id: String,
    pub session_id: String,
    pub duration_seconds: i64,
    pub completed: bool,
    pub notes: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewSessionCompletion {
    pub user_id: String,
    pub session_id: String,
    pub duration_seconds: i64,
    pub completed: bool,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct JournalEntry {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub mood: i32,
    pub tags: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewJournalEntry {
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub mood: i32,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SosEvent {
    pub id: String,
    pub user_id: String,
    pub event_type: String,
    pub status: String,
    pub location: Option<serde_json::Value>,
    pub notes: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewSosEvent {
    pub user_id: String,
    pub location: Option<serde_json::Value>,
    pub notes: String,
}

#[derive(Debug, Clone)]
pub struct NewAudioEvent {
    pub user_id: String,
    pub event_type: String,
    pub track: String,
    pub context: String,
}
