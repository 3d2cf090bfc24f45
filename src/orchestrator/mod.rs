pub mod analytics;
pub mod context_assembly;
pub mod prompts;
pub mod risk_classifier;
pub mod summarizer;
pub mod trend_analyzer;

use std::sync::Arc;

use crate::config::Config;
use crate::models::internal::{NewConversationTurn, NewMemory, NewRiskEvent};
use crate::services::completion_client::{ChatMessage, CompletionClient};
use crate::storage::repository::WellnessRepository;

const CHAT_TEMPERATURE: f32 = 0.7;
const CHAT_MAX_TOKENS: u32 = 600;

/// One inbound chat turn as handed over by the transport layer.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub user_id: String,
    pub message: String,
    pub history: Vec<ChatMessage>,
    pub language: String,
}

#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub response: String,
    pub is_crisis: bool,
    pub risk_level: i32,
}

/// Per-turn coordinator: classify → assemble context → complete → escalate →
/// persist → summarize. The turn always produces a reply; every external
/// failure takes a degraded path instead of surfacing to the caller.
pub struct ConversationOrchestrator {
    repo: Arc<dyn WellnessRepository>,
    llm: Arc<CompletionClient>,
    classifier: risk_classifier::RiskClassifier,
    pub context_assembler: context_assembly::ContextAssembler,
    pub trend_analyzer: trend_analyzer::TrendAnalyzer,
    pub analytics: analytics::AnalyticsService,
    summarizer: summarizer::MemorySummarizer,
    chat_model: String,
    summarization_enabled: bool,
}

impl ConversationOrchestrator {
    pub fn new(
        repo: Arc<dyn WellnessRepository>,
        llm: Arc<CompletionClient>,
        config: &Config,
    ) -> Self {
        Self {
            repo: repo.clone(),
            llm: llm.clone(),
            classifier: risk_classifier::RiskClassifier::default(),
            context_assembler: context_assembly::ContextAssembler::new(repo.clone()),
            trend_analyzer: trend_analyzer::TrendAnalyzer::new(repo.clone()),
            analytics: analytics::AnalyticsService::new(repo.clone()),
            summarizer: summarizer::MemorySummarizer::new(
                llm,
                config.summarization_model.clone(),
            ),
            chat_model: config.chat_model.clone(),
            summarization_enabled: config.summarization_enabled,
        }
    }

    /// Handles one chat turn end to end. Infallible by contract: the chat
    /// path prefers a degraded-but-present response over any error.
    pub async fn handle_turn(&self, turn: ChatTurn) -> TurnOutcome {
        tracing::info!(
            "Chat turn from {} (lang {}, {} history messages)",
            turn.user_id,
            turn.language,
            turn.history.len()
        );

        // 1. Risk detection
        let assessment = self.classifier.classify(&turn.message);
        if assessment.level > risk_classifier::RiskLevel::None {
            tracing::warn!(
                "Risk level {} detected for {}: {:?}",
                assessment.level.as_i32(),
                turn.user_id,
                assessment.matched
            );
        }

        // 2. Context assembly; a store failure degrades to defaults
        let context = self
            .context_assembler
            .build_context_or_default(&turn.user_id)
            .await;
        let system_prompt = context_assembly::render_prompt(prompts::SYSTEM_PROMPT, &context);

        // 3. Main completion
        let completion = self
            .llm
            .complete(
                &self.chat_model,
                &system_prompt,
                &turn.history,
                &turn.message,
                CHAT_TEMPERATURE,
                CHAT_MAX_TOKENS,
            )
            .await;

        let (response, is_crisis) = match completion {
            Ok(mut text) => {
                if assessment.level.is_crisis() {
                    text.push_str(prompts::CRISIS_NOTICE);
                }
                (text, assessment.level.is_crisis())
            }
            Err(e) => {
                tracing::error!("Completion failed for {}: {}", turn.user_id, e);
                (prompts::FALLBACK_RESPONSE.to_string(), false)
            }
        };

        // 4. Risk event persistence (repository enforces the level floor)
        if assessment.level.is_recordable() {
            let event = NewRiskEvent {
                user_id: turn.user_id.clone(),
                event_type: "keyword_flag".to_string(),
                level: assessment.level.as_i32(),
                matched_terms: assessment.matched.clone(),
                message_preview: turn.message.clone(),
            };
            if let Err(e) = self.repo.record_risk_event(event).await {
                tracing::error!("Failed to record risk event: {}", e);
            }
        }

        // 5. Conversation audit record, always written before returning
        let record = NewConversationTurn {
            user_id: turn.user_id.clone(),
            user_message: turn.message.clone(),
            assistant_response: response.clone(),
            risk_level: assessment.level.as_i32(),
        };
        if let Err(e) = self.repo.insert_conversation(record).await {
            tracing::error!("Failed to record conversation: {}", e);
        }

        // 6. Post-hoc memory, detached from the reply path. The caller may
        // observe the response before the memory exists; a crash in between
        // loses only this one recall record.
        if self.summarization_enabled {
            let summarizer = self.summarizer.clone();
            let repo = self.repo.clone();
            let user_id = turn.user_id.clone();
            let message = turn.message.clone();
            let reply = response.clone();

            tokio::spawn(async move {
                let outcome = summarizer.summarize(&message, &reply).await;
                if outcome.is_degraded() {
                    tracing::debug!("Memory for {} stored from degraded summary", user_id);
                }

                let data = outcome.into_inner();
                let memory = NewMemory {
                    user_id: user_id.clone(),
                    summary: data.summary,
                    tags: data.tags,
                    techniques_worked: data.techniques_worked,
                    next_step: data.next_step,
                    importance: data.importance,
                };
                if let Err(e) = repo.insert_memory(memory).await {
                    tracing::error!("Failed to save memory for {}: {}", user_id, e);
                }
            });
        }

        TurnOutcome {
            response,
            is_crisis,
            risk_level: assessment.level.as_i32(),
        }
    }

    /// Synchronous variant of the summary step, used where the caller needs
    /// the memory to exist before proceeding (tests, backfills).
    pub async fn summarize_and_store(&self, user_id: &str, user_message: &str, response: &str) {
        let outcome = self.summarizer.summarize(user_message, response).await;
        let data = outcome.into_inner();

        let memory = NewMemory {
            user_id: user_id.to_string(),
            summary: data.summary,
            tags: data.tags,
            techniques_worked: data.techniques_worked,
            next_step: data.next_step,
            importance: data.importance,
        };
        if let Err(e) = self.repo.insert_memory(memory).await {
            tracing::error!("Failed to save memory for {}: {}", user_id, e);
        }
    }
}
