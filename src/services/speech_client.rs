use std::time::Duration;

use serde::{Deserialize, Serialize};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
}

#[derive(Debug, Clone)]
pub struct Transcription {
    pub text: String,
    pub language: String,
}

/// Speech-to-text and text-to-speech against the same OpenAI-compatible
/// provider. Sibling capabilities of the chat path; not used by the
/// orchestration pipeline itself.
#[derive(Clone)]
pub struct SpeechClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    transcription_model: String,
    tts_model: String,
    tts_voice: String,
}

impl SpeechClient {
    pub fn new(
        base_url: String,
        api_key: String,
        transcription_model: String,
        tts_model: String,
        tts_voice: String,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
            transcription_model,
            tts_model,
            tts_voice,
        }
    }

    pub async fn transcribe(
        &self,
        audio: Vec<u8>,
        filename: String,
    ) -> Result<Transcription, SpeechError> {
        let file_part = reqwest::multipart::Part::bytes(audio).file_name(filename);
        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("model", self.transcription_model.clone())
            .text("response_format", "verbose_json");

        let response = self
            .client
            .post(format!("{}/v1/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SpeechError::ApiError {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let body: TranscriptionResponse = response.json().await?;
        Ok(Transcription {
            text: body.text,
            language: body.language.unwrap_or_else(|| "unknown".to_string()),
        })
    }

    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let request = SpeechRequest {
            model: self.tts_model.clone(),
            voice: self.tts_voice.clone(),
            input: text.to_string(),
            response_format: "mp3".to_string(),
        };

        let response = self
            .client
            .post(format!("{}/v1/audio/speech", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SpeechError::ApiError {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

// Request/Response Models
#[derive(Serialize)]
struct SpeechRequest {
    model: String,
    voice: String,
    input: String,
    response_format: String,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
    language: Option<String>,
}
