pub mod audio_events;
pub mod conversations;
pub mod journal_entries;
pub mod memories;
pub mod mood_logs;
pub mod risk_events;
pub mod sessions_completed;
pub mod sos_events;
pub mod techniques_tracking;
pub mod users;
