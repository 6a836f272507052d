use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tcat_portal_backend::{config::Config, routes, AppState};
use tempfile::TempDir;
use tower::ServiceExt;

fn setup_state(data_dir: &TempDir) -> AppState {
    AppState::new(Config {
        server_address: "127.0.0.1:0".to_string(),
        data_dir: data_dir.path().to_path_buf(),
        admin_user: "admin".to_string(),
        admin_pass: "letmein".to_string(),
        session_secret: "test-secret".to_string(),
        production: false,
    })
}

fn setup_app() -> (Router, TempDir) {
    let data_dir = TempDir::new().expect("temp data dir");
    let state = setup_state(&data_dir);
    (routes::router(state), data_dir)
}

fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn read_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login_cookie(app: &Router) -> String {
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/login",
            None,
            json!({"username": "admin", "password": "letmein"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    resp.headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

/// Seeds a quiz with the given code and one question, returning its id.
async fn seed_quiz(app: &Router, code: &str) -> i64 {
    let cookie = login_cookie(app).await;
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/quizzes",
            Some(&cookie),
            json!({"title": "Networking basics", "quizCode": code}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let quiz = read_json(resp).await;
    let quiz_id = quiz["id"].as_i64().unwrap();

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/admin/quizzes/{quiz_id}/questions"),
            Some(&cookie),
            json!({
                "prompt": "Which layer does a switch operate on?",
                "options": ["1", "2", "3", "4"],
                "correctOption": 1
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    quiz_id
}

async fn post_session(app: &Router, body: Value) -> (StatusCode, Value) {
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/api/quizzes/session", None, body))
        .await
        .unwrap();
    let status = resp.status();
    (status, read_json(resp).await)
}

#[tokio::test]
async fn access_resolves_codes_case_insensitively() {
    let (app, _data_dir) = setup_app();
    seed_quiz(&app, "NET-FUND").await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/quizzes/access",
            None,
            json!({"quizCode": "  net-fund "}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let quiz = read_json(resp).await;
    assert_eq!(quiz["quizCode"], "NET-FUND");

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/quizzes/access",
            None,
            json!({"quizCode": "NOPE"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = read_json(resp).await;
    assert_eq!(body["error"], "Invalid quiz code.");
}

#[tokio::test]
async fn session_flows_from_ready_to_active() {
    let (app, _data_dir) = setup_app();
    seed_quiz(&app, "NET-FUND").await;

    let (status, body) = post_session(
        &app,
        json!({"quizCode": "NET-FUND", "participantName": "Bob"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert!(body.get("attempt").is_none());
    assert!(body["quiz"].get("questions").is_none());

    let (status, body) = post_session(
        &app,
        json!({"quizCode": "NET-FUND", "participantName": "Bob", "start": true}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "active");
    assert_eq!(body["attempt"]["participantName"], "Bob");
    assert_eq!(body["quiz"]["questions"].as_array().unwrap().len(), 1);
    let attempt_id = body["attempt"]["id"].as_i64().unwrap();

    // Re-polling reuses the live attempt rather than creating another.
    let (_, body) = post_session(
        &app,
        json!({"quizCode": "NET-FUND", "participantName": "Bob", "start": true}),
    )
    .await;
    assert_eq!(body["status"], "active");
    assert_eq!(body["attempt"]["id"], attempt_id);
}

#[tokio::test]
async fn participant_names_are_matched_ignoring_case_and_padding() {
    let (app, _data_dir) = setup_app();
    seed_quiz(&app, "NET-FUND").await;

    let (_, body) = post_session(
        &app,
        json!({"quizCode": "NET-FUND", "participantName": "Bob", "start": true}),
    )
    .await;
    let attempt_id = body["attempt"]["id"].as_i64().unwrap();

    let (_, body) = post_session(
        &app,
        json!({"quizCode": "NET-FUND", "participantName": "  bOB ", "start": true}),
    )
    .await;
    assert_eq!(body["attempt"]["id"], attempt_id);
    // The stored display name keeps the original casing, trimmed.
    assert_eq!(body["attempt"]["participantName"], "Bob");
}

#[tokio::test]
async fn completing_an_attempt_is_terminal() {
    let (app, _data_dir) = setup_app();
    seed_quiz(&app, "NET-FUND").await;

    let (_, body) = post_session(
        &app,
        json!({"quizCode": "NET-FUND", "participantName": "Bob", "start": true}),
    )
    .await;
    let attempt_id = body["attempt"]["id"].as_i64().unwrap();

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/quizzes/session/complete",
            None,
            json!({"attemptId": attempt_id, "score": 1, "totalQuestions": 1}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let attempt = read_json(resp).await;
    assert_eq!(attempt["isCompleted"], true);
    assert_eq!(attempt["score"], 1);
    assert!(attempt["completedAt"].is_string());

    // A completed attempt stays completed even when start is requested.
    let (_, body) = post_session(
        &app,
        json!({"quizCode": "NET-FUND", "participantName": "Bob", "start": true}),
    )
    .await;
    assert_eq!(body["status"], "completed");
    assert!(body["quiz"].get("questions").is_none());
}

#[tokio::test]
async fn an_expired_attempt_is_terminal_even_when_start_is_requested() {
    let (app, data_dir) = setup_app();
    let quiz_id = seed_quiz(&app, "NET-FUND").await;

    std::fs::write(
        data_dir.path().join("quiz-session-db.json"),
        json!({
            "counters": {"attemptId": 1},
            "attempts": [
                {
                    "id": 1,
                    "quizId": quiz_id,
                    "quizCode": "NET-FUND",
                    "participantName": "Bob",
                    "participantKey": "bob",
                    "startedAt": "2020-01-01T00:00:00Z",
                    "expiresAt": "2020-01-01T00:30:00Z",
                    "isCompleted": false,
                    "createdAt": "2020-01-01T00:00:00Z",
                    "updatedAt": "2020-01-01T00:00:00Z"
                }
            ]
        })
        .to_string(),
    )
    .unwrap();

    let (status, body) = post_session(
        &app,
        json!({"quizCode": "NET-FUND", "participantName": "Bob", "start": true}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "expired");
    assert_eq!(body["attempt"]["id"], 1);
    assert!(body["quiz"].get("questions").is_none());

    // No replacement attempt is created for the expired row.
    let raw = std::fs::read_to_string(data_dir.path().join("quiz-session-db.json")).unwrap();
    let doc: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["attempts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn complete_validates_score_and_attempt() {
    let (app, _data_dir) = setup_app();
    seed_quiz(&app, "NET-FUND").await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/quizzes/session/complete",
            None,
            json!({"attemptId": 1, "score": 5, "totalQuestions": 3}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = read_json(resp).await;
    assert_eq!(body["error"], "Score cannot exceed total questions.");

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/quizzes/session/complete",
            None,
            json!({"attemptId": 99, "score": 1, "totalQuestions": 3}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = read_json(resp).await;
    assert_eq!(body["error"], "Attempt not found.");
}

#[tokio::test]
async fn completed_attempts_surface_in_admin_grades() {
    let (app, _data_dir) = setup_app();
    let quiz_id = seed_quiz(&app, "NET-FUND").await;

    for (name, score) in [("Bob", 1), ("Alice", 0)] {
        let (_, body) = post_session(
            &app,
            json!({"quizCode": "NET-FUND", "participantName": name, "start": true}),
        )
        .await;
        let attempt_id = body["attempt"]["id"].as_i64().unwrap();
        let resp = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/quizzes/session/complete",
                None,
                json!({"attemptId": attempt_id, "score": score, "totalQuestions": 1}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
    // A live, uncompleted attempt must not show up in the grades.
    post_session(
        &app,
        json!({"quizCode": "NET-FUND", "participantName": "Carol", "start": true}),
    )
    .await;

    let cookie = login_cookie(&app).await;
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/admin/grades/{quiz_id}"))
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let grades = read_json(resp).await;
    let submissions = grades["submissions"].as_array().unwrap();
    assert_eq!(submissions.len(), 2);
    // Most recently completed first.
    assert_eq!(submissions[0]["participantName"], "Alice");
    assert_eq!(submissions[1]["participantName"], "Bob");
}
