use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::{prelude::*, QueryOrder, QuerySelect, Set};
use uuid::Uuid;

use crate::models::internal::{
    ConversationTurn, JournalEntry, Memory, MoodLog, NewAudioEvent, NewConversationTurn,
    NewJournalEntry, NewMemory, NewMoodLog, NewRiskEvent, NewSessionCompletion, NewSosEvent,
    NewTechniqueUsage, RiskEvent, SessionCompletion, SosContact, SosEvent, TechniqueUsage, User,
};
use crate::storage::entities::{
    audio_events, conversations, journal_entries, memories, mood_logs, risk_events,
    sessions_completed, sos_events, techniques_tracking, users,
};

/// At most this many memories are retained per user; older ones are deleted
/// right after each insert.
pub const MEMORY_RETENTION_LIMIT: u64 = 20;

/// Risk events below this level are not persisted.
pub const RISK_EVENT_FLOOR: i32 = 2;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DbError(#[from] sea_orm::DbErr),
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Session aggregate for one user.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionStats {
    pub total_sessions: u64,
    pub sessions_last_7_days: u64,
    pub total_minutes: f64,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: u64,
}

// ============================================
// TRAIT DEFINITION - with Send + Sync bounds
// ============================================
#[async_trait]
pub trait WellnessRepository: Send + Sync {
    // Users
    async fn find_user(&self, user_id: &str) -> Result<Option<User>, RepositoryError>;
    /// Loads the user, creating a default profile on first contact.
    async fn ensure_user(&self, user_id: &str) -> Result<User, RepositoryError>;
    async fn add_sos_contact(
        &self,
        user_id: &str,
        contact: SosContact,
    ) -> Result<(), RepositoryError>;

    // Conversation turns (append-only audit trail)
    async fn insert_conversation(
        &self,
        turn: NewConversationTurn,
    ) -> Result<String, RepositoryError>;
    async fn find_recent_conversations(
        &self,
        user_id: &str,
        limit: u64,
    ) -> Result<Vec<ConversationTurn>, RepositoryError>;

    // Memories
    async fn insert_memory(&self, memory: NewMemory) -> Result<String, RepositoryError>;
    async fn find_recent_memories(
        &self,
        user_id: &str,
        limit: u64,
    ) -> Result<Vec<Memory>, RepositoryError>;
    async fn count_memories(&self, user_id: &str) -> Result<u64, RepositoryError>;

    // Risk events
    /// Persists the event only when `level >= RISK_EVENT_FLOOR`. Returns
    /// whether it was stored.
    async fn record_risk_event(&self, event: NewRiskEvent) -> Result<bool, RepositoryError>;
    async fn find_recent_risk_events(
        &self,
        user_id: &str,
        limit: u64,
    ) -> Result<Vec<RiskEvent>, RepositoryError>;

    // Mood
    async fn insert_mood_log(&self, log: NewMoodLog) -> Result<String, RepositoryError>;
    async fn find_mood_logs_since(
        &self,
        user_id: &str,
        cutoff: NaiveDateTime,
    ) -> Result<Vec<MoodLog>, RepositoryError>;

    // Techniques
    async fn insert_technique_usage(
        &self,
        usage: NewTechniqueUsage,
    ) -> Result<String, RepositoryError>;
    async fn find_technique_usage(
        &self,
        user_id: &str,
    ) -> Result<Vec<TechniqueUsage>, RepositoryError>;

    // Guided sessions
    async fn insert_session(
        &self,
        session: NewSessionCompletion,
    ) -> Result<String, RepositoryError>;
    async fn find_recent_sessions(
        &self,
        user_id: &str,
        limit: u64,
    ) -> Result<Vec<SessionCompletion>, RepositoryError>;
    async fn session_stats(&self, user_id: &str) -> Result<SessionStats, RepositoryError>;

    // Journal
    async fn insert_journal_entry(
        &self,
        entry: NewJournalEntry,
    ) -> Result<String, RepositoryError>;
    async fn find_journal_entries(
        &self,
        user_id: &str,
        limit: u64,
        tag: Option<&str>,
    ) -> Result<Vec<JournalEntry>, RepositoryError>;
    async fn journal_common_tags(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<TagCount>, RepositoryError>;

    // SOS
    /// Inserts the SOS event and synthesizes a critical risk event.
    async fn trigger_sos(&self, event: NewSosEvent) -> Result<String, RepositoryError>;
    async fn find_sos_history(
        &self,
        user_id: &str,
        limit: u64,
    ) -> Result<Vec<SosEvent>, RepositoryError>;

    // Audio telemetry
    async fn insert_audio_event(&self, event: NewAudioEvent) -> Result<String, RepositoryError>;

    // Platform-wide aggregates (admin analytics)
    async fn count_users(&self) -> Result<u64, RepositoryError>;
    async fn count_conversations(&self) -> Result<u64, RepositoryError>;
    async fn active_user_ids_since(
        &self,
        cutoff: NaiveDateTime,
    ) -> Result<Vec<String>, RepositoryError>;
    async fn count_completed_sessions(&self) -> Result<u64, RepositoryError>;
    async fn count_journal_entries(&self) -> Result<u64, RepositoryError>;
    async fn count_risk_events_since(
        &self,
        cutoff: NaiveDateTime,
    ) -> Result<u64, RepositoryError>;
    async fn all_mood_values(&self) -> Result<Vec<i32>, RepositoryError>;
    async fn all_completed_sessions(&self) -> Result<Vec<SessionCompletion>, RepositoryError>;
}

// ============================================
// IMPLEMENTATION STRUCT
// ============================================
pub struct SeaOrmWellnessRepository {
    db: DatabaseConnection,
}

impl SeaOrmWellnessRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

/// Truncates on a char boundary; stored previews and summaries are capped.
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn string_vec(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

// ============================================
// TRAIT IMPLEMENTATION
// ============================================
#[async_trait]
impl WellnessRepository for SeaOrmWellnessRepository {
    async fn find_user(&self, user_id: &str) -> Result<Option<User>, RepositoryError> {
        let model = users::Entity::find_by_id(user_id.to_string())
            .one(&self.db)
            .await?;

        Ok(model.map(User::from))
    }

    async fn ensure_user(&self, user_id: &str) -> Result<User, RepositoryError> {
        if user_id.trim().is_empty() {
            return Err(RepositoryError::InvalidInput(
                "user_id must not be empty".to_string(),
            ));
        }

        if let Some(user) = self.find_user(user_id).await? {
            return Ok(user);
        }

        let model = users::ActiveModel {
            user_id: Set(user_id.to_string()),
            display_name: Set("Usuário".to_string()),
            language: Set("pt-BR".to_string()),
            country: Set("BR".to_string()),
            goals: Set(serde_json::json!([])),
            prefers_voice: Set(true),
            sos_contacts: Set(serde_json::json!([])),
            created_at: Set(now()),
        };

        let inserted = model.insert(&self.db).await?;
        tracing::info!("Created user profile: {}", user_id);
        Ok(User::from(inserted))
    }

    async fn add_sos_contact(
        &self,
        user_id: &str,
        contact: SosContact,
    ) -> Result<(), RepositoryError> {
        let user = self.ensure_user(user_id).await?;

        let mut contacts = user.sos_contacts;
        contacts.push(contact);

        let model = users::Entity::find_by_id(user_id.to_string())
            .one(&self.db)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("user {}", user_id)))?;

        let mut active: users::ActiveModel = model.into();
        active.sos_contacts = Set(serde_json::json!(contacts));
        active.update(&self.db).await?;

        tracing::info!("Emergency contact added for {}", user_id);
        Ok(())
    }

    async fn insert_conversation(
        &self,
        turn: NewConversationTurn,
    ) -> Result<String, RepositoryError> {
        let id = new_id();
        let model = conversations::ActiveModel {
            id: Set(id.clone()),
            user_id: Set(turn.user_id),
            user_message: Set(turn.user_message),
            assistant_response: Set(turn.assistant_response),
            risk_level: Set(turn.risk_level),
            created_at: Set(now()),
        };

        model.insert(&self.db).await?;
        Ok(id)
    }

    async fn find_recent_conversations(
        &self,
        user_id: &str,
        limit: u64,
    ) -> Result<Vec<ConversationTurn>, RepositoryError> {
        let models = conversations::Entity::find()
            .filter(conversations::Column::UserId.eq(user_id))
            .order_by_desc(conversations::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(ConversationTurn::from).collect())
    }

    async fn insert_memory(&self, memory: NewMemory) -> Result<String, RepositoryError> {
        let id = new_id();
        let user_id = memory.user_id.clone();

        let model = memories::ActiveModel {
            id: Set(id.clone()),
            user_id: Set(memory.user_id),
            summary: Set(truncate_chars(&memory.summary, 150)),
            tags: Set(serde_json::json!(memory.tags)),
            techniques_worked: Set(serde_json::json!(memory.techniques_worked)),
            next_step: Set(memory.next_step),
            importance: Set(memory.importance.clamp(1, 3)),
            created_at: Set(now()),
        };

        model.insert(&self.db).await?;

        // Retention trim. Not atomic with the insert: two concurrent turns
        // can transiently leave more than the cap, which self-corrects on
        // the next write.
        let keep: Vec<String> = memories::Entity::find()
            .filter(memories::Column::UserId.eq(user_id.as_str()))
            .order_by_desc(memories::Column::CreatedAt)
            .limit(MEMORY_RETENTION_LIMIT)
            .select_only()
            .column(memories::Column::Id)
            .into_tuple::<String>()
            .all(&self.db)
            .await?;

        memories::Entity::delete_many()
            .filter(memories::Column::UserId.eq(user_id.as_str()))
            .filter(memories::Column::Id.is_not_in(keep))
            .exec(&self.db)
            .await?;

        Ok(id)
    }

    async fn find_recent_memories(
        &self,
        user_id: &str,
        limit: u64,
    ) -> Result<Vec<Memory>, RepositoryError> {
        let models = memories::Entity::find()
            .filter(memories::Column::UserId.eq(user_id))
            .order_by_desc(memories::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Memory::from).collect())
    }

    async fn count_memories(&self, user_id: &str) -> Result<u64, RepositoryError> {
        let count = memories::Entity::find()
            .filter(memories::Column::UserId.eq(user_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn record_risk_event(&self, event: NewRiskEvent) -> Result<bool, RepositoryError> {
        if event.level < RISK_EVENT_FLOOR {
            return Ok(false);
        }

        let model = risk_events::ActiveModel {
            id: Set(new_id()),
            user_id: Set(event.user_id.clone()),
            event_type: Set(event.event_type),
            level: Set(event.level),
            matched_terms: Set(serde_json::json!(event.matched_terms)),
            message_preview: Set(truncate_chars(&event.message_preview, 100)),
            created_at: Set(now()),
        };

        model.insert(&self.db).await?;
        tracing::warn!(
            "Risk level {} recorded for user {}",
            event.level,
            event.user_id
        );
        Ok(true)
    }

    async fn find_recent_risk_events(
        &self,
        user_id: &str,
        limit: u64,
    ) -> Result<Vec<RiskEvent>, RepositoryError> {
        let models = risk_events::Entity::find()
            .filter(risk_events::Column::UserId.eq(user_id))
            .order_by_desc(risk_events::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(RiskEvent::from).collect())
    }

    async fn insert_mood_log(&self, log: NewMoodLog) -> Result<String, RepositoryError> {
        if !(1..=5).contains(&log.mood_value) {
            return Err(RepositoryError::InvalidInput(format!(
                "mood_value must be 1-5, got {}",
                log.mood_value
            )));
        }

        let id = new_id();
        let model = mood_logs::ActiveModel {
            id: Set(id.clone()),
            user_id: Set(log.user_id.clone()),
            mood_value: Set(log.mood_value),
            note: Set(log.note),
            created_at: Set(now()),
        };

        model.insert(&self.db).await?;
        tracing::info!("Mood logged: {} = {}/5", log.user_id, log.mood_value);
        Ok(id)
    }

    async fn find_mood_logs_since(
        &self,
        user_id: &str,
        cutoff: NaiveDateTime,
    ) -> Result<Vec<MoodLog>, RepositoryError> {
        let models = mood_logs::Entity::find()
            .filter(mood_logs::Column::UserId.eq(user_id))
            .filter(mood_logs::Column::CreatedAt.gte(cutoff))
            .order_by_desc(mood_logs::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(MoodLog::from).collect())
    }

    async fn insert_technique_usage(
        &self,
        usage: NewTechniqueUsage,
    ) -> Result<String, RepositoryError> {
        if !(1..=5).contains(&usage.effectiveness) {
            return Err(RepositoryError::InvalidInput(format!(
                "effectiveness must be 1-5, got {}",
                usage.effectiveness
            )));
        }

        // Technique names are normalized at the store boundary so grouping
        // sees one key per technique.
        let technique = usage.technique.trim().to_lowercase().replace(' ', "_");
        if technique.is_empty() {
            return Err(RepositoryError::InvalidInput(
                "technique must not be empty".to_string(),
            ));
        }

        let id = new_id();
        let model = techniques_tracking::ActiveModel {
            id: Set(id.clone()),
            user_id: Set(usage.user_id.clone()),
            technique: Set(technique.clone()),
            effectiveness: Set(usage.effectiveness),
            context: Set(usage.context),
            created_at: Set(now()),
        };

        model.insert(&self.db).await?;
        tracing::info!(
            "Technique tracked: {} = {}/5",
            technique,
            usage.effectiveness
        );
        Ok(id)
    }

    async fn find_technique_usage(
        &self,
        user_id: &str,
    ) -> Result<Vec<TechniqueUsage>, RepositoryError> {
        let models = techniques_tracking::Entity::find()
            .filter(techniques_tracking::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(TechniqueUsage::from).collect())
    }

    async fn insert_session(
        &self,
        session: NewSessionCompletion,
    ) -> Result<String, RepositoryError> {
        if session.duration_seconds < 0 {
            return Err(RepositoryError::InvalidInput(
                "duration_seconds must be non-negative".to_string(),
            ));
        }

        let id = new_id();
        let model = sessions_completed::ActiveModel {
            id: Set(id.clone()),
            user_id: Set(session.user_id.clone()),
            session_id: Set(session.session_id.clone()),
            duration_seconds: Set(session.duration_seconds),
            completed: Set(session.completed),
            notes: Set(session.notes),
            created_at: Set(now()),
        };

        model.insert(&self.db).await?;
        tracing::info!(
            "Session logged: {} ({}s)",
            session.session_id,
            session.duration_seconds
        );
        Ok(id)
    }

    async fn find_recent_sessions(
        &self,
        user_id: &str,
        limit: u64,
    ) -> Result<Vec<SessionCompletion>, RepositoryError> {
        let models = sessions_completed::Entity::find()
            .filter(sessions_completed::Column::UserId.eq(user_id))
            .filter(sessions_completed::Column::Completed.eq(true))
            .order_by_desc(sessions_completed::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(SessionCompletion::from).collect())
    }

    async fn session_stats(&self, user_id: &str) -> Result<SessionStats, RepositoryError> {
        let total_sessions = sessions_completed::Entity::find()
            .filter(sessions_completed::Column::UserId.eq(user_id))
            .filter(sessions_completed::Column::Completed.eq(true))
            .count(&self.db)
            .await?;

        let seven_days_ago = now() - chrono::Duration::days(7);
        let sessions_last_7_days = sessions_completed::Entity::find()
            .filter(sessions_completed::Column::UserId.eq(user_id))
            .filter(sessions_completed::Column::Completed.eq(true))
            .filter(sessions_completed::Column::CreatedAt.gte(seven_days_ago))
            .count(&self.db)
            .await?;

        let durations: Vec<i64> = sessions_completed::Entity::find()
            .filter(sessions_completed::Column::UserId.eq(user_id))
            .filter(sessions_completed::Column::Completed.eq(true))
            .select_only()
            .column(sessions_completed::Column::DurationSeconds)
            .into_tuple::<i64>()
            .all(&self.db)
            .await?;

        let total_seconds: i64 = durations.iter().sum();
        let total_minutes = ((total_seconds as f64 / 60.0) * 10.0).round() / 10.0;

        Ok(SessionStats {
            total_sessions,
            sessions_last_7_days,
            total_minutes,
        })
    }

    async fn insert_journal_entry(
        &self,
        entry: NewJournalEntry,
    ) -> Result<String, RepositoryError> {
        if !(1..=5).contains(&entry.mood) {
            return Err(RepositoryError::InvalidInput(format!(
                "mood must be 1-5, got {}",
                entry.mood
            )));
        }

        let id = new_id();
        let ts = now();
        let model = journal_entries::ActiveModel {
            id: Set(id.clone()),
            user_id: Set(entry.user_id),
            title: Set(entry.title.clone()),
            content: Set(entry.content),
            mood: Set(entry.mood),
            tags: Set(serde_json::json!(entry.tags)),
            created_at: Set(ts),
            updated_at: Set(ts),
        };

        model.insert(&self.db).await?;
        tracing::info!("Journal entry created: {}", entry.title);
        Ok(id)
    }

    async fn find_journal_entries(
        &self,
        user_id: &str,
        limit: u64,
        tag: Option<&str>,
    ) -> Result<Vec<JournalEntry>, RepositoryError> {
        let models = journal_entries::Entity::find()
            .filter(journal_entries::Column::UserId.eq(user_id))
            .order_by_desc(journal_entries::Column::CreatedAt)
            .all(&self.db)
            .await?;

        // Tags live in a JSON column, so the tag filter happens here.
        let entries = models
            .into_iter()
            .map(JournalEntry::from)
            .filter(|e| tag.map_or(true, |t| e.tags.iter().any(|et| et == t)))
            .take(limit as usize)
            .collect();

        Ok(entries)
    }

    async fn journal_common_tags(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<TagCount>, RepositoryError> {
        let entries = self.find_journal_entries(user_id, u64::MAX, None).await?;

        let mut counts = std::collections::HashMap::new();
        for entry in &entries {
            for tag in &entry.tags {
                *counts.entry(tag.clone()).or_insert(0u64) += 1;
            }
        }

        let mut ranked: Vec<TagCount> = counts
            .into_iter()
            .map(|(tag, count)| TagCount { tag, count })
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
        ranked.truncate(limit);

        Ok(ranked)
    }

    async fn trigger_sos(&self, event: NewSosEvent) -> Result<String, RepositoryError> {
        let id = new_id();
        let model = sos_events::ActiveModel {
            id: Set(id.clone()),
            user_id: Set(event.user_id.clone()),
            event_type: Set("sos_triggered".to_string()),
            status: Set("active".to_string()),
            location: Set(event.location),
            notes: Set(event.notes),
            created_at: Set(now()),
        };

        model.insert(&self.db).await?;

        // SOS always escalates as a critical risk event
        self.record_risk_event(NewRiskEvent {
            user_id: event.user_id.clone(),
            event_type: "sos_triggered".to_string(),
            level: 4,
            matched_terms: vec!["SOS_BUTTON".to_string()],
            message_preview: "Usuário acionou botão SOS".to_string(),
        })
        .await?;

        tracing::warn!("SOS TRIGGERED: {}", event.user_id);
        Ok(id)
    }

    async fn find_sos_history(
        &self,
        user_id: &str,
        limit: u64,
    ) -> Result<Vec<SosEvent>, RepositoryError> {
        let models = sos_events::Entity::find()
            .filter(sos_events::Column::UserId.eq(user_id))
            .order_by_desc(sos_events::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(SosEvent::from).collect())
    }

    async fn insert_audio_event(&self, event: NewAudioEvent) -> Result<String, RepositoryError> {
        let id = new_id();
        let model = audio_events::ActiveModel {
            id: Set(id.clone()),
            user_id: Set(event.user_id.clone()),
            event_type: Set(event.event_type.clone()),
            track: Set(event.track.clone()),
            context: Set(event.context),
            created_at: Set(now()),
        };

        model.insert(&self.db).await?;
        tracing::debug!(
            "Audio event: {} - {} - {}",
            event.user_id,
            event.event_type,
            event.track
        );
        Ok(id)
    }

    async fn count_users(&self) -> Result<u64, RepositoryError> {
        Ok(users::Entity::find().count(&self.db).await?)
    }

    async fn count_conversations(&self) -> Result<u64, RepositoryError> {
        Ok(conversations::Entity::find().count(&self.db).await?)
    }

    async fn active_user_ids_since(
        &self,
        cutoff: NaiveDateTime,
    ) -> Result<Vec<String>, RepositoryError> {
        let ids = conversations::Entity::find()
            .filter(conversations::Column::CreatedAt.gte(cutoff))
            .select_only()
            .column(conversations::Column::UserId)
            .distinct()
            .into_tuple::<String>()
            .all(&self.db)
            .await?;

        Ok(ids)
    }

    async fn count_completed_sessions(&self) -> Result<u64, RepositoryError> {
        let count = sessions_completed::Entity::find()
            .filter(sessions_completed::Column::Completed.eq(true))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn count_journal_entries(&self) -> Result<u64, RepositoryError> {
        Ok(journal_entries::Entity::find().count(&self.db).await?)
    }

    async fn count_risk_events_since(
        &self,
        cutoff: NaiveDateTime,
    ) -> Result<u64, RepositoryError> {
        let count = risk_events::Entity::find()
            .filter(risk_events::Column::CreatedAt.gte(cutoff))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn all_mood_values(&self) -> Result<Vec<i32>, RepositoryError> {
        let values = mood_logs::Entity::find()
            .select_only()
            .column(mood_logs::Column::MoodValue)
            .into_tuple::<i32>()
            .all(&self.db)
            .await?;

        Ok(values)
    }

    async fn all_completed_sessions(&self) -> Result<Vec<SessionCompletion>, RepositoryError> {
        let models = sessions_completed::Entity::find()
            .filter(sessions_completed::Column::Completed.eq(true))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(SessionCompletion::from).collect())
    }
}

// ============================================
// Conversions
// ============================================

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            user_id: model.user_id,
            display_name: model.display_name,
            language: model.language,
            country: model.country,
            goals: string_vec(&model.goals),
            prefers_voice: model.prefers_voice,
            sos_contacts: serde_json::from_value(model.sos_contacts).unwrap_or_default(),
            created_at: model.created_at,
        }
    }
}

impl From<conversations::Model> for ConversationTurn {
    fn from(model: conversations::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            user_message: model.user_message,
            assistant_response: model.assistant_response,
            risk_level: model.risk_level,
            created_at: model.created_at,
        }
    }
}

impl From<memories::Model> for Memory {
    fn from(model: memories::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            summary: model.summary,
            tags: string_vec(&model.tags),
            techniques_worked: string_vec(&model.techniques_worked),
            next_step: model.next_step,
            importance: model.importance,
            created_at: model.created_at,
        }
    }
}

impl From<risk_events::Model> for RiskEvent {
    fn from(model: risk_events::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            event_type: model.event_type,
            level: model.level,
            matched_terms: string_vec(&model.matched_terms),
            message_preview: model.message_preview,
            created_at: model.created_at,
        }
    }
}

impl From<mood_logs::Model> for MoodLog {
    fn from(model: mood_logs::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            mood_value: model.mood_value,
            note: model.note,
            created_at: model.created_at,
        }
    }
}

impl From<techniques_tracking::Model> for TechniqueUsage {
    fn from(model: techniques_tracking::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            technique: model.technique,
            effectiveness: model.effectiveness,
            context: model.context,
            created_at: model.created_at,
        }
    }
}

impl From<sessions_completed::Model> for SessionCompletion {
    fn from(model: sessions_completed::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            session_id: model.session_id,
            duration_seconds: model.duration_seconds,
            completed: model.completed,
            notes: model.notes,
            created_at: model.created_at,
        }
    }
}

impl From<journal_entries::Model> for JournalEntry {
    fn from(model: journal_entries::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            content: model.content,
            mood: model.mood,
            tags: string_vec(&model.tags),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<sos_events::Model> for SosEvent {
    fn from(model: sos_events::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            event_type: model.event_type,
            status: model.status,
            location: model.location,
            notes: model.notes,
            created_at: model.created_at,
        }
    }
}

