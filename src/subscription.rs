//! Entitlement stub. Every known user is on a premium trial for now; this
//! is the seam where a billing provider integration will land.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionStatus {
    pub is_premium: bool,
    pub plan: &'static str,
    pub features: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_days_remaining: Option<u32>,
}

pub fn premium_status(user_exists: bool) -> SubscriptionStatus {
    if !user_exists {
        return SubscriptionStatus {
            is_premium: false,
            plan: "free",
            features: vec!["basic_chat", "panic_button"],
            trial_days_remaining: None,
        };
    }

    SubscriptionStatus {
        is_premium: true,
        plan: "premium_trial",
        features: vec![
            "basic_chat",
            "panic_button",
            "guided_sessions",
            "journal",
            "mood_tracking",
            "ai_memory",
            "voice_chat",
        ],
        trial_days_remaining: Some(30),
    }
}
