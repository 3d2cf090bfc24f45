//! Alma - conversational wellness-support backend

pub mod api;
pub mod audio;
pub mod config;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod storage;
pub mod subscription;

// Re-export main types for convenience
pub use crate::api::dto::*;
pub use crate::api::routes::{create_router, AppState};
pub use crate::config::Config;
pub use crate::orchestrator::ConversationOrchestrator;
pub use crate::services::completion_client::{ChatMessage, CompletionClient};
pub use crate::services::speech_client::SpeechClient;
pub use crate::storage::db::init_db;
pub use crate::storage::repository::{SeaOrmWellnessRepository, WellnessRepository};
