use crate::{completion_body, json, test_app};

use alma_server::storage::WellnessRepository;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_chat_endpoint_returns_reply_and_correlation_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            "Faz sentido se sentir assim. Vamos respirar juntos?",
        )))
        .mount(&server)
        .await;

    let (_repo, app) = test_app(server.uri()).await;

    let response = app
        .oneshot(post_json(
            "/api/chat",
            json!({"message": "Estou meio cansado hoje", "user_id": "u1", "lang": "pt-BR"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let header = response
        .headers()
        .get("x-correlation-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("correlation header must be present");

    let body = body_json(response).await;
    assert_eq!(body["is_crisis"], false);
    assert_eq!(body["correlation_id"], header);
    assert!(body["response"]
        .as_str()
        .unwrap()
        .contains("Vamos respirar juntos"));
}

#[tokio::test]
async fn test_chat_endpoint_crisis_contract() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            "Sinto muito que você esteja passando por isso.",
        )))
        .mount(&server)
        .await;

    let (repo, app) = test_app(server.uri()).await;

    let response = app
        .oneshot(post_json(
            "/api/chat",
            json!({"message": "quero morrer", "user_id": "u1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["is_crisis"], true);
    assert!(body["response"]
        .as_str()
        .unwrap()
        .contains("🆘 Se estiver em perigo, acione o botão SOS do app"));

    // Risk event visible through the history endpoint data
    let events = repo.find_recent_risk_events("u1", 10).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, 4);
}

#[tokio::test]
async fn test_chat_endpoint_never_fails_when_provider_is_down() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let (_repo, app) = test_app(server.uri()).await;

    let response = app
        .oneshot(post_json(
            "/api/chat",
            json!({"message": "preciso conversar", "user_id": "u1"}),
        ))
        .await
        .unwrap();

    // Degraded but present: HTTP 200 with the fixed calming text
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["is_crisis"], false);
    assert!(body["response"]
        .as_str()
        .unwrap()
        .starts_with("Estou aqui para você."));
}

#[tokio::test]
async fn test_journal_round_trip() {
    let server = MockServer::start().await;
    let (_repo, app) = test_app(server.uri()).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/journal",
            json!({
                "user_id": "u1",
                "title": "Primeiro registro",
                "content": "Dia corrido, mas consegui pausar.",
                "mood": 4,
                "tags": ["trabalho", "pausa"],
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["success"], true);
    assert!(created["entry_id"].as_str().is_some());

    let response = app
        .oneshot(
            Request::get("/api/journal/u1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["entries"].as_array().unwrap().len(), 1);
    assert_eq!(body["entries"][0]["title"], "Primeiro registro");
    assert_eq!(body["common_tags"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_sos_trigger_flows_into_risk_history() {
    let server = MockServer::start().await;
    let (_repo, app) = test_app(server.uri()).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/sos/trigger",
            json!({"user_id": "u1", "notes": "preciso de ajuda"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "SOS protocol activated");

    let response = app
        .clone()
        .oneshot(
            Request::get("/api/risk-events/u1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    let events = body["risk_events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["level"], 4);
    assert_eq!(events[0]["matched_terms"][0], "SOS_BUTTON");

    let response = app
        .oneshot(
            Request::get("/api/sos/history/u1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["history"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_emergency_contact_round_trip() {
    let server = MockServer::start().await;
    let (_repo, app) = test_app(server.uri()).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/sos/contact",
            json!({"user_id": "u1", "name": "Ana", "phone": "+55 11 98888-7777"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::get("/api/sos/contacts/u1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["contacts"][0]["name"], "Ana");
}

#[tokio::test]
async fn test_technique_tracking_feeds_ranking() {
    let server = MockServer::start().await;
    let (_repo, app) = test_app(server.uri()).await;

    for effectiveness in [4, 5] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/technique",
                json!({
                    "user_id": "u1",
                    "technique": "Box Breathing",
                    "effectiveness": effectiveness,
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(
            Request::get("/api/best-techniques/u1?limit=3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_json(response).await;
    let techniques = body["techniques"].as_array().unwrap();
    assert_eq!(techniques.len(), 1);
    assert_eq!(techniques[0]["technique"], "box_breathing");
    assert_eq!(techniques[0]["effectiveness"], 4.5);
    assert_eq!(techniques[0]["use_count"], 2);
}

#[tokio::test]
async fn test_session_logging_and_stats() {
    let server = MockServer::start().await;
    let (_repo, app) = test_app(server.uri()).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/session",
            json!({
                "user_id": "u1",
                "session_id": "quick_calm",
                "duration_seconds": 180,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::get("/api/sessions/u1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["sessions"].as_array().unwrap().len(), 1);
    assert_eq!(body["stats"]["total_sessions"], 1);
    assert_eq!(body["stats"]["total_minutes"], 3.0);
}

#[tokio::test]
async fn test_admin_stats_aggregate_activity() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Estou aqui.")))
        .mount(&server)
        .await;

    let (_repo, app) = test_app(server.uri()).await;

    // One chat turn and two mood logs across two users
    app.clone()
        .oneshot(post_json(
            "/api/chat",
            json!({"message": "oi", "user_id": "u1"}),
        ))
        .await
        .unwrap();
    for (user, mood) in [("u1", 4), ("u2", 2)] {
        app.clone()
            .oneshot(post_json(
                "/api/mood",
                json!({"user_id": user, "mood_value": mood}),
            ))
            .await
            .unwrap();
    }

    let response = app
        .clone()
        .oneshot(Request::get("/api/admin/stats").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_json(response).await;

    assert_eq!(body["stats"]["users"]["total"], 1);
    assert_eq!(body["stats"]["users"]["active_7d"], 1);
    assert_eq!(body["stats"]["engagement"]["total_conversations"], 1);
    assert_eq!(body["stats"]["wellbeing"]["avg_mood"], 3.0);

    let response = app
        .oneshot(
            Request::get("/api/admin/mood-distribution")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["total_logs"], 2);
    assert_eq!(body["distribution"]["2"], 1);
    assert_eq!(body["distribution"]["4"], 1);
}
