use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::Duration;
use serde::Serialize;

use crate::orchestrator::trend_analyzer::round1;
use crate::storage::repository::{RepositoryError, WellnessRepository};

#[derive(Debug, Clone, Serialize)]
pub struct UserStats {
    pub total: u64,
    pub active_7d: u64,
    pub retention_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EngagementStats {
    pub total_conversations: u64,
    pub total_sessions: u64,
    pub total_journal_entries: u64,
    pub avg_conversations_per_user: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WellbeingStats {
    pub avg_mood: f64,
    pub risk_events_30d: u64,
}

/// Platform-wide, anonymous aggregates for the admin view.
#[derive(Debug, Clone, Serialize)]
pub struct GlobalStats {
    pub users: UserStats,
    pub engagement: EngagementStats,
    pub wellbeing: WellbeingStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct PopularSession {
    pub session_id: String,
    pub completions: u64,
    pub avg_duration_minutes: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoodDistribution {
    pub distribution: BTreeMap<i32, u64>,
    pub total_logs: u64,
}

pub struct AnalyticsService {
    repo: Arc<dyn WellnessRepository>,
}

impl AnalyticsService {
    pub fn new(repo: Arc<dyn WellnessRepository>) -> Self {
        Self { repo }
    }

    pub async fn global_stats(&self) -> Result<GlobalStats, RepositoryError> {
        let now = chrono::Utc::now().naive_utc();

        let total_users = self.repo.count_users().await?;
        let active_7d = self
            .repo
            .active_user_ids_since(now - Duration::days(7))
            .await?
            .len() as u64;

        let total_conversations = self.repo.count_conversations().await?;
        let total_sessions = self.repo.count_completed_sessions().await?;
        let total_journal_entries = self.repo.count_journal_entries().await?;
        let risk_events_30d = self
            .repo
            .count_risk_events_since(now - Duration::days(30))
            .await?;

        let mood_values = self.repo.all_mood_values().await?;
        let avg_mood = if mood_values.is_empty() {
            0.0
        } else {
            round1(mood_values.iter().sum::<i32>() as f64 / mood_values.len() as f64)
        };

        let retention_rate = if total_users > 0 {
            round1(active_7d as f64 / total_users as f64 * 100.0)
        } else {
            0.0
        };
        let avg_conversations_per_user = if total_users > 0 {
            round1(total_conversations as f64 / total_users as f64)
        } else {
            0.0
        };

        Ok(GlobalStats {
            users: UserStats {
                total: total_users,
                active_7d,
                retention_rate,
            },
            engagement: EngagementStats {
                total_conversations,
                total_sessions,
                total_journal_entries,
                avg_conversations_per_user,
            },
            wellbeing: WellbeingStats {
                avg_mood,
                risk_events_30d,
            },
        })
    }

    pub async fn popular_sessions(&self, limit: usize) -> Result<Vec<PopularSession>, RepositoryError> {
        let sessions = self.repo.all_completed_sessions().await?;

        let mut grouped: HashMap<String, (u64, i64)> = HashMap::new();
        for session in sessions {
            let entry = grouped.entry(session.session_id).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += session.duration_seconds;
        }

        let mut ranked: Vec<PopularSession> = grouped
            .into_iter()
            .map(|(session_id, (completions, total_seconds))| PopularSession {
                session_id,
                completions,
                avg_duration_minutes: round1(total_seconds as f64 / completions as f64 / 60.0),
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.completions
                .cmp(&a.completions)
                .then_with(|| a.session_id.cmp(&b.session_id))
        });
        ranked.truncate(limit);

        Ok(ranked)
    }

    pub async fn mood_distribution(&self) -> Result<MoodDistribution, RepositoryError> {
        let values = self.repo.all_mood_values().await?;

        let mut distribution = BTreeMap::new();
        for value in &values {
            *distribution.entry(*value).or_insert(0u64) += 1;
        }

        Ok(MoodDistribution {
            distribution,
            total_logs: values.len() as u64,
        })
    }
}
