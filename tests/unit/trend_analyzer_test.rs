use alma_server::orchestrator::trend_analyzer::{
    analyze_mood, rank_techniques, MoodTrendLabel, TrendAnalyzer,
};
use alma_server::storage::{init_db, SeaOrmWellnessRepository, WellnessRepository};
use alma_server::models::internal::{NewMoodLog, NewTechniqueUsage};
use std::sync::Arc;

async fn test_repo() -> Arc<SeaOrmWellnessRepository> {
    let db = init_db("sqlite::memory:").await.unwrap();
    Arc::new(SeaOrmWellnessRepository::new(db))
}

#[test]
fn test_no_data_shape() {
    let trend = analyze_mood(&[], 7);

    assert_eq!(trend.average, 0.0);
    assert_eq!(trend.trend, MoodTrendLabel::NoData);
    assert_eq!(trend.sample_count, 0);
    assert_eq!(trend.window_days, 7);
}

#[test]
fn test_improving_direction_convention() {
    // Newest-first: recent half [5,5], older half [1,1].
    // Recent mean 5 exceeds older mean 1 by more than 0.5 → improving.
    let trend = analyze_mood(&[5, 5, 1, 1], 7);
    assert_eq!(trend.trend, MoodTrendLabel::Improving);
}

#[test]
fn test_worsening_is_symmetric() {
    let trend = analyze_mood(&[1, 1, 5, 5], 7);
    assert_eq!(trend.trend, MoodTrendLabel::Worsening);
}

#[test]
fn test_shift_at_threshold_is_stable() {
    // Recent mean 3.5, older mean 3.0: delta is exactly 0.5, not beyond it
    let trend = analyze_mood(&[4, 3, 3, 3], 7);
    assert_eq!(trend.trend, MoodTrendLabel::Stable);
}

#[test]
fn test_odd_sample_count_splits_at_floor() {
    // len 5 → mid 2: recent [5,5], older [1,1,1]
    let trend = analyze_mood(&[5, 5, 1, 1, 1], 30);
    assert_eq!(trend.trend, MoodTrendLabel::Improving);
    assert_eq!(trend.average, 2.6);
}

#[test]
fn test_single_sample_is_insufficient() {
    let trend = analyze_mood(&[2], 7);
    assert_eq!(trend.trend, MoodTrendLabel::Insufficient);
    assert_eq!(trend.sample_count, 1);
}

#[test]
fn test_trend_labels_serialize_to_wire_names() {
    assert_eq!(
        serde_json::to_string(&MoodTrendLabel::NoData).unwrap(),
        "\"sem_dados\""
    );
    assert_eq!(
        serde_json::to_string(&MoodTrendLabel::Improving).unwrap(),
        "\"melhorando\""
    );
    assert_eq!(
        serde_json::to_string(&MoodTrendLabel::Worsening).unwrap(),
        "\"piorando\""
    );
}

#[test]
fn test_single_use_excluded_even_with_top_score() {
    let ranked = rank_techniques(
        vec![
            ("meditacao".to_string(), 5),
            ("diario".to_string(), 2),
            ("diario".to_string(), 2),
        ],
        5,
    );

    // meditacao scored 5 but has one use: not evidence
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].technique, "diario");
}

#[test]
fn test_effectiveness_mean_is_rounded() {
    let ranked = rank_techniques(
        vec![
            ("respiracao_4_7_8".to_string(), 5),
            ("respiracao_4_7_8".to_string(), 4),
            ("respiracao_4_7_8".to_string(), 4),
        ],
        5,
    );

    assert_eq!(ranked[0].effectiveness, 4.3);
    assert_eq!(ranked[0].use_count, 3);
}

#[tokio::test]
async fn test_mood_trend_reads_only_recent_window() {
    let repo = test_repo().await;
    let analyzer = TrendAnalyzer::new(repo.clone());

    for value in [2, 3, 2] {
        repo.insert_mood_log(NewMoodLog {
            user_id: "u1".to_string(),
            mood_value: value,
            note: String::new(),
        })
        .await
        .unwrap();
    }

    let trend = analyzer.mood_trend("u1", 7).await.unwrap();
    assert_eq!(trend.sample_count, 3);
    assert_eq!(trend.average, 2.3);

    // Another user's logs must not leak into the window
    let other = analyzer.mood_trend("u2", 7).await.unwrap();
    assert_eq!(other.trend, MoodTrendLabel::NoData);
}

#[tokio::test]
async fn test_best_techniques_end_to_end() {
    let repo = test_repo().await;
    let analyzer = TrendAnalyzer::new(repo.clone());

    for (name, score) in [
        ("Box Breathing", 5),
        ("Box Breathing", 4),
        ("diario", 3),
        ("diario", 3),
        ("gratidao", 5),
    ] {
        repo.insert_technique_usage(NewTechniqueUsage {
            user_id: "u1".to_string(),
            technique: name.to_string(),
            effectiveness: score,
            context: String::new(),
        })
        .await
        .unwrap();
    }

    let ranked = analyzer.best_techniques("u1", 3).await.unwrap();

    // gratidao has a single use and is filtered out
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].technique, "box_breathing");
    assert_eq!(ranked[0].effectiveness, 4.5);
    assert_eq!(ranked[1].technique, "diario");
}
