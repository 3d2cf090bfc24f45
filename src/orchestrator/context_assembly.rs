use std::sync::Arc;

use serde::Serialize;

use crate::orchestrator::trend_analyzer::{MoodTrend, TrendAnalyzer};
use crate::storage::repository::{RepositoryError, WellnessRepository};

/// Shown for each of the three memory slots a user has not filled yet.
pub const MEMORY_PLACEHOLDER: &str = "Nenhuma memória";
/// Shown while no technique has at least two recorded uses.
pub const TECHNIQUES_FALLBACK: &str = "Ainda descobrindo";
pub const SESSIONS_FALLBACK: &str = "Nenhuma sessão recente";

const MEMORY_SLOTS: usize = 3;
const BEST_TECHNIQUES_LIMIT: usize = 3;
const RECENT_SESSIONS_LIMIT: u64 = 3;

#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub display_name: String,
    pub language: String,
    pub country: String,
    pub goals: String,
    pub prefers_voice: bool,
}

impl Default for ProfileView {
    fn default() -> Self {
        Self {
            display_name: "Usuário".to_string(),
            language: "pt-BR".to_string(),
            country: "BR".to_string(),
            goals: "Não definidos".to_string(),
            prefers_voice: true,
        }
    }
}

/// Everything the prompt needs to personalize one turn, reconstructed from
/// the store on every request — nothing is cached across turns.
#[derive(Debug, Clone, Serialize)]
pub struct UserContext {
    pub profile: ProfileView,
    /// Exactly three entries, most recent first, padded with
    /// [`MEMORY_PLACEHOLDER`].
    pub memories: Vec<String>,
    pub mood_7d: MoodTrend,
    pub mood_30d: MoodTrend,
    pub best_techniques: String,
    pub recent_sessions: String,
}

impl Default for UserContext {
    fn default() -> Self {
        Self {
            profile: ProfileView::default(),
            memories: vec![MEMORY_PLACEHOLDER.to_string(); MEMORY_SLOTS],
            mood_7d: MoodTrend::empty(7),
            mood_30d: MoodTrend::empty(30),
            best_techniques: TECHNIQUES_FALLBACK.to_string(),
            recent_sessions: SESSIONS_FALLBACK.to_string(),
        }
    }
}

pub struct ContextAssembler {
    repo: Arc<dyn WellnessRepository>,
    trends: TrendAnalyzer,
}

impl ContextAssembler {
    pub fn new(repo: Arc<dyn WellnessRepository>) -> Self {
        let trends = TrendAnalyzer::new(repo.clone());
        Self { repo, trends }
    }

    /// Builds the full context view, creating the user lazily on first
    /// contact.
    pub async fn build_context(&self, user_id: &str) -> Result<UserContext, RepositoryError> {
        let user = self.repo.ensure_user(user_id).await?;

        let profile = ProfileView {
            display_name: user.display_name,
            language: user.language,
            country: user.country,
            goals: if user.goals.is_empty() {
                "Não definidos".to_string()
            } else {
                user.goals.join(", ")
            },
            prefers_voice: user.prefers_voice,
        };

        let mut memories: Vec<String> = self
            .repo
            .find_recent_memories(user_id, MEMORY_SLOTS as u64)
            .await?
            .into_iter()
            .map(|m| m.summary)
            .collect();
        while memories.len() < MEMORY_SLOTS {
            memories.push(MEMORY_PLACEHOLDER.to_string());
        }

        let mood_7d = self.trends.mood_trend(user_id, 7).await?;
        let mood_30d = self.trends.mood_trend(user_id, 30).await?;

        let ranked = self
            .trends
            .best_techniques(user_id, BEST_TECHNIQUES_LIMIT)
            .await?;
        let best_techniques = if ranked.is_empty() {
            TECHNIQUES_FALLBACK.to_string()
        } else {
            ranked
                .iter()
                .map(|t| format!("{} ({}/5)", t.technique, t.effectiveness))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let sessions = self
            .repo
            .find_recent_sessions(user_id, RECENT_SESSIONS_LIMIT)
            .await?;
        let recent_sessions = if sessions.is_empty() {
            SESSIONS_FALLBACK.to_string()
        } else {
            sessions
                .iter()
                .map(|s| s.session_id.clone())
                .collect::<Vec<_>>()
                .join(", ")
        };

        Ok(UserContext {
            profile,
            memories,
            mood_7d,
            mood_30d,
            best_techniques,
            recent_sessions,
        })
    }

    /// A store failure must not abort the turn; the reply simply loses its
    /// personalization.
    pub async fn build_context_or_default(&self, user_id: &str) -> UserContext {
        match self.build_context(user_id).await {
            Ok(context) => context,
            Err(e) => {
                tracing::error!("Context assembly failed for {}: {}", user_id, e);
                UserContext::default()
            }
        }
    }
}

fn mood_line(trend: &MoodTrend) -> String {
    format!(
        "{}/5 ({}, {} registros)",
        trend.average, trend.trend, trend.sample_count
    )
}

/// Pure string templating: appends the fixed-format context block to the
/// base prompt. No conditionals beyond substitution.
pub fn render_prompt(base_prompt: &str, context: &UserContext) -> String {
    let memory = |slot: usize| {
        context
            .memories
            .get(slot)
            .map(String::as_str)
            .unwrap_or(MEMORY_PLACEHOLDER)
    };

    format!(
        "{base_prompt}\n\n\
        [CONTEXTO DO USUÁRIO]\n\
        Perfil: {name}, idioma {language}, país {country}\n\
        Objetivos: {goals}\n\
        Prefere voz: {voice}\n\
        \n\
        Últimas memórias:\n\
        1) {mem1}\n\
        2) {mem2}\n\
        3) {mem3}\n\
        \n\
        Humor médio (7 dias): {mood_7d}\n\
        Humor médio (30 dias): {mood_30d}\n\
        Técnicas mais eficazes: {techniques}\n\
        Sessões recentes: {sessions}\n\
        \n\
        Use esse contexto para personalizar a conversa sem revelar dados diretamente.\n",
        base_prompt = base_prompt,
        name = context.profile.display_name,
        language = context.profile.language,
        country = context.profile.country,
        goals = context.profile.goals,
        voice = if context.profile.prefers_voice {
            "sim"
        } else {
            "não"
        },
        mem1 = memory(0),
        mem2 = memory(1),
        mem3 = memory(2),
        mood_7d = mood_line(&context.mood_7d),
        mood_30d = mood_line(&context.mood_30d),
        techniques = context.best_techniques,
        sessions = context.recent_sessions,
    )
}
