use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tcat_portal_backend::{config::Config, routes, AppState};
use tempfile::TempDir;
use tower::ServiceExt;

fn setup_app() -> (Router, TempDir) {
    let data_dir = TempDir::new().expect("temp data dir");
    let state = AppState::new(Config {
        server_address: "127.0.0.1:0".to_string(),
        data_dir: data_dir.path().to_path_buf(),
        admin_user: "admin".to_string(),
        admin_pass: "letmein".to_string(),
        session_secret: "test-secret".to_string(),
        production: false,
    });
    (routes::router(state), data_dir)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
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
            json!({"username": "admin", "password": "letmein"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .expect("login sets a cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let (app, _data_dir) = setup_app();

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/login",
            json!({"username": "admin", "password": "wrong"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());

    let resp = app
        .oneshot(json_request(
            "POST",
            "/api/admin/login",
            json!({"username": "", "password": ""}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_cookie_carries_session_attributes() {
    let (app, _data_dir) = setup_app();

    let resp = app
        .oneshot(json_request(
            "POST",
            "/api/admin/login",
            json!({"username": "admin", "password": "letmein"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("tcat_admin="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));
    assert!(set_cookie.contains("Max-Age=28800"));
}

#[tokio::test]
async fn admin_routes_require_a_valid_session() {
    let (app, _data_dir) = setup_app();

    let unauthenticated = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/admin/quizzes")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);

    let forged = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/admin/quizzes")
                .header(header::COOKIE, "tcat_admin=not-a-real-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(forged.status(), StatusCode::UNAUTHORIZED);

    let cookie = login_cookie(&app).await;
    let authenticated = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/quizzes")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(authenticated.status(), StatusCode::OK);
}

#[tokio::test]
async fn session_endpoint_reports_cookie_state() {
    let (app, _data_dir) = setup_app();

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/admin/session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(read_json(resp).await, json!({"authenticated": false}));

    let cookie = login_cookie(&app).await;
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/session")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(read_json(resp).await, json!({"authenticated": true}));
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let (app, _data_dir) = setup_app();

    let resp = app
        .oneshot(json_request("POST", "/api/admin/logout", json!({})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("tcat_admin=;"));
    assert!(set_cookie.contains("Max-Age=0"));
}
