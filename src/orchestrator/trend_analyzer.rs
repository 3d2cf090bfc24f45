use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use serde::Serialize;

use crate::storage::repository::{RepositoryError, WellnessRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoodTrendLabel {
    #[serde(rename = "sem_dados")]
    NoData,
    #[serde(rename = "melhorando")]
    Improving,
    #[serde(rename = "piorando")]
    Worsening,
    #[serde(rename = "estavel")]
    Stable,
    #[serde(rename = "insuficiente")]
    Insufficient,
}

impl std::fmt::Display for MoodTrendLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MoodTrendLabel::NoData => "sem_dados",
            MoodTrendLabel::Improving => "melhorando",
            MoodTrendLabel::Worsening => "piorando",
            MoodTrendLabel::Stable => "estavel",
            MoodTrendLabel::Insufficient => "insuficiente",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MoodTrend {
    pub average: f64,
    pub trend: MoodTrendLabel,
    pub sample_count: usize,
    pub window_days: i64,
}

impl MoodTrend {
    pub fn empty(window_days: i64) -> Self {
        Self {
            average: 0.0,
            trend: MoodTrendLabel::NoData,
            sample_count: 0,
            window_days,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TechniqueScore {
    pub technique: String,
    pub effectiveness: f64,
    pub use_count: u64,
}

/// Derives mood direction and technique rankings from stored event
/// sequences. The math lives in free functions over already-fetched rows.
pub struct TrendAnalyzer {
    repo: Arc<dyn WellnessRepository>,
}

impl TrendAnalyzer {
    pub fn new(repo: Arc<dyn WellnessRepository>) -> Self {
        Self { repo }
    }

    pub async fn mood_trend(
        &self,
        user_id: &str,
        window_days: i64,
    ) -> Result<MoodTrend, RepositoryError> {
        let cutoff = chrono::Utc::now().naive_utc() - Duration::days(window_days);
        let logs = self.repo.find_mood_logs_since(user_id, cutoff).await?;

        let values: Vec<i32> = logs.iter().map(|l| l.mood_value).collect();
        Ok(analyze_mood(&values, window_days))
    }

    pub async fn best_techniques(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<TechniqueScore>, RepositoryError> {
        let usages = self.repo.find_technique_usage(user_id).await?;

        let samples: Vec<(String, i32)> = usages
            .into_iter()
            .map(|u| (u.technique, u.effectiveness))
            .collect();
        Ok(rank_techniques(samples, limit))
    }
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `values` must be newest-first. The list is split at floor(n/2); the first
/// half is the recent half, and a mean shift beyond 0.5 in either direction
/// decides the label.
pub fn analyze_mood(values: &[i32], window_days: i64) -> MoodTrend {
    if values.is_empty() {
        return MoodTrend::empty(window_days);
    }

    let average = round1(values.iter().sum::<i32>() as f64 / values.len() as f64);

    let mid = values.len() / 2;
    let trend = if mid == 0 {
        MoodTrendLabel::Insufficient
    } else {
        let mean = |slice: &[i32]| slice.iter().sum::<i32>() as f64 / slice.len() as f64;
        let recent = mean(&values[..mid]);
        let older = mean(&values[mid..]);

        if recent > older + 0.5 {
            MoodTrendLabel::Improving
        } else if recent < older - 0.5 {
            MoodTrendLabel::Worsening
        } else {
            MoodTrendLabel::Stable
        }
    };

    MoodTrend {
        average,
        trend,
        sample_count: values.len(),
        window_days,
    }
}

/// Groups usage samples by technique, keeps techniques with at least two
/// uses (a single use is not evidence), and ranks by mean effectiveness.
pub fn rank_techniques(samples: Vec<(String, i32)>, limit: usize) -> Vec<TechniqueScore> {
    let mut grouped: HashMap<String, (u64, i64)> = HashMap::new();
    for (technique, effectiveness) in samples {
        let entry = grouped.entry(technique).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += effectiveness as i64;
    }

    let mut ranked: Vec<TechniqueScore> = grouped
        .into_iter()
        .filter(|(_, (count, _))| *count >= 2)
        .map(|(technique, (count, sum))| TechniqueScore {
            technique,
            effectiveness: round1(sum as f64 / count as f64),
            use_count: count,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.effectiveness
            .partial_cmp(&a.effectiveness)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.use_count.cmp(&a.use_count))
            .then_with(|| a.technique.cmp(&b.technique))
    });
    ranked.truncate(limit);

    ranked
}
