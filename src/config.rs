use serde::Deserialize;
use validator::Validate;

/// Main configuration for the Alma backend
#[derive(Debug, Deserialize, Validate, Clone)]
pub struct Config {
    /// HTTP server port
    #[validate(range(min = 1024, max = 65535))]
    pub server_port: u16,

    /// Database URL (SeaORM / SQLite)
    pub database_url: String,

    /// Base URL of the OpenAI-compatible provider
    pub llm_base_url: String,

    /// API key for the provider
    pub llm_api_key: String,

    /// Model used for the main chat reply
    pub chat_model: String,

    /// Model used for post-conversation summaries
    pub summarization_model: String,

    /// Whether the post-conversation memory pipeline is enabled
    pub summarization_enabled: bool,

    /// Speech-to-text model
    pub transcription_model: String,

    /// Text-to-speech model and voice
    pub tts_model: String,
    pub tts_voice: String,

    /// Log level (e.g., info, debug, trace)
    pub log_level: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            // Core defaults
            .set_default("server_port", 8080)?
            .set_default("database_url", "sqlite://alma.db")?
            .set_default("llm_base_url", "https://api.openai.com")?
            .set_default("llm_api_key", "")?
            .set_default("chat_model", "gpt-4o-mini")?
            .set_default("summarization_model", "gpt-4o-mini")?
            .set_default("summarization_enabled", true)?
            .set_default("transcription_model", "whisper-1")?
            .set_default("tts_model", "tts-1")?
            .set_default("tts_voice", "alloy")?
            .set_default("log_level", "info")?
            // Load from ~/.alma/config.toml (if present)
            .add_source(
                config::File::with_name(&format!(
                    "{}/.alma/config",
                    std::env::var("HOME").unwrap_or_else(|_| ".".to_string())
                ))
                .required(false),
            )
            // Environment overrides: ALMA__SERVER_PORT, ALMA__LLM_API_KEY, etc.
            .add_source(config::Environment::with_prefix("ALMA").separator("__"))
            .build()?;

        let cfg: Config = settings.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }
}
