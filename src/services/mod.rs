pub mod completion_client;
pub mod speech_client;

// Re-export for convenience
pub use completion_client::{ChatMessage, CompletionClient};
pub use speech_client::SpeechClient;
