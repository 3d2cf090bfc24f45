use std::sync::Arc;

use serde::Deserialize;

use crate::services::completion_client::{ChatMessage, CompletionClient};

const SUMMARY_TEMPERATURE: f32 = 0.3;
const SUMMARY_MAX_TOKENS: u32 = 300;
const SUMMARY_CHAR_LIMIT: usize = 150;

/// Structured recall record distilled from one exchange.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StructuredSummary {
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub techniques_worked: Vec<String>,
    #[serde(default)]
    pub next_step: String,
    #[serde(default = "default_importance")]
    pub importance: i32,
}

fn default_importance() -> i32 {
    1
}

/// Both branches carry the same shape so downstream persistence is
/// branch-free; `Degraded` marks that the provider output was unusable.
#[derive(Debug, Clone)]
pub enum SummaryOutcome {
    Parsed(StructuredSummary),
    Degraded(StructuredSummary),
}

impl SummaryOutcome {
    pub fn into_inner(self) -> StructuredSummary {
        match self {
            SummaryOutcome::Parsed(summary) | SummaryOutcome::Degraded(summary) => summary,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, SummaryOutcome::Degraded(_))
    }
}

/// Turns a completed exchange into a compact memory record via the
/// completion provider. Total: any failure degrades to a deterministic
/// summary built from the raw user message, so summary generation can never
/// block saving or responding.
#[derive(Clone)]
pub struct MemorySummarizer {
    llm: Arc<CompletionClient>,
    model: String,
}

impl MemorySummarizer {
    pub fn new(llm: Arc<CompletionClient>, model: String) -> Self {
        Self { llm, model }
    }

    pub async fn summarize(&self, user_message: &str, assistant_response: &str) -> SummaryOutcome {
        let prompt = summary_prompt(user_message, assistant_response);

        let completion = self
            .llm
            .complete(
                &self.model,
                "Você é um assistente que gera resumos éticos e práticos de conversas de apoio emocional.",
                &[],
                &prompt,
                SUMMARY_TEMPERATURE,
                SUMMARY_MAX_TOKENS,
            )
            .await;

        match completion {
            Ok(text) => match parse_summary(&text) {
                Some(summary) => SummaryOutcome::Parsed(summary),
                None => {
                    tracing::warn!("Summary response was not parseable, degrading");
                    SummaryOutcome::Degraded(degraded_summary(user_message))
                }
            },
            Err(e) => {
                tracing::warn!("Summary generation failed: {}", e);
                SummaryOutcome::Degraded(degraded_summary(user_message))
            }
        }
    }
}

fn summary_prompt(user_message: &str, assistant_response: &str) -> String {
    format!(
        "Resuma esta conversa de forma ética e prática em até 150 caracteres:\n\n\
        Usuário: {user_message}\n\
        Assistente: {assistant_response}\n\n\
        Responda somente com um objeto JSON contendo:\n\
        - summary: resumo curto\n\
        - tags: array de 2-3 tags (ex: [\"ansiedade\", \"respiração\"])\n\
        - techniques_worked: técnicas mencionadas que ajudaram (ex: [\"4-7-8\", \"diário\"])\n\
        - next_step: próximo passo sugerido (curto)\n\
        - importance: 1 (baixa), 2 (média) ou 3 (alta)\n\n\
        Sem diagnóstico, sem PII, sem citações diretas."
    )
}

/// Deterministic last line of defense when the provider fails or returns an
/// unusable shape.
pub fn degraded_summary(user_message: &str) -> StructuredSummary {
    StructuredSummary {
        summary: user_message.chars().take(100).collect(),
        tags: vec!["conversa".to_string()],
        techniques_worked: Vec::new(),
        next_step: "Continuar conversando".to_string(),
        importance: 1,
    }
}

/// Extracts the JSON object from the completion text, tolerating code
/// fences and prose around it.
pub fn parse_summary(text: &str) -> Option<StructuredSummary> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }

    let mut summary: StructuredSummary = serde_json::from_str(&text[start..=end]).ok()?;
    if summary.summary.trim().is_empty() {
        return None;
    }

    summary.summary = summary.summary.chars().take(SUMMARY_CHAR_LIMIT).collect();
    summary.importance = summary.importance.clamp(1, 3);
    Some(summary)
}
