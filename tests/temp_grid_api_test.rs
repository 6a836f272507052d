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

async fn get_grid(app: &Router) -> Value {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/temp-grid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn put_grid(app: &Router, body: Value) -> Value {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/temp-grid")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn first_read_seeds_forty_one_empty_cells() {
    let (app, data_dir) = setup_app();

    let grid = get_grid(&app).await;
    let blocks = grid["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 41);
    assert!(blocks.iter().all(|block| {
        block["vlan"] == "" && block["switchName"] == "" && block["portNumber"] == ""
    }));

    // The seeded document is persisted on that first read.
    let raw = std::fs::read_to_string(data_dir.path().join("temp-grid-db.json")).unwrap();
    let doc: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["blocks"].as_array().unwrap().len(), 41);
}

#[tokio::test]
async fn saved_cells_come_back_at_their_indices() {
    let (app, _data_dir) = setup_app();

    let mut blocks = vec![json!({}); 41];
    blocks[0] = json!({"vlan": "10", "switchName": "SW-CORE", "portNumber": "Gi0/1"});
    blocks[7] = json!({"vlan": " 20 ", "switchName": "SW-ACCESS-1", "portNumber": "Fa0/7"});
    blocks[40] = json!({"vlan": "99", "switchName": "SW-MGMT", "portNumber": "Gi0/48"});

    let saved = put_grid(&app, json!({"blocks": blocks})).await;
    let saved_blocks = saved["blocks"].as_array().unwrap();
    assert_eq!(saved_blocks.len(), 41);
    assert_eq!(saved_blocks[0]["switchName"], "SW-CORE");
    assert_eq!(saved_blocks[7]["vlan"], "20");
    assert_eq!(saved_blocks[40]["portNumber"], "Gi0/48");
    assert_eq!(saved_blocks[1]["vlan"], "");

    let grid = get_grid(&app).await;
    assert_eq!(grid["blocks"], saved["blocks"]);
}

#[tokio::test]
async fn save_coerces_oversized_and_malformed_input() {
    let (app, _data_dir) = setup_app();

    // 50 items in, only the first 41 kept.
    let mut blocks: Vec<Value> = (0..50)
        .map(|i| json!({"vlan": i.to_string(), "switchName": "SW", "portNumber": "1"}))
        .collect();
    // Non-string and missing fields collapse to empty strings.
    blocks[3] = json!({"vlan": 10, "switchName": null, "portNumber": ["Gi0/1"]});
    blocks[4] = json!("not an object");

    let saved = put_grid(&app, json!({"blocks": blocks})).await;
    let saved_blocks = saved["blocks"].as_array().unwrap();
    assert_eq!(saved_blocks.len(), 41);
    assert_eq!(saved_blocks[40]["vlan"], "40");
    assert_eq!(saved_blocks[3]["vlan"], "");
    assert_eq!(saved_blocks[3]["switchName"], "");
    assert_eq!(saved_blocks[3]["portNumber"], "");
    assert_eq!(saved_blocks[4]["vlan"], "");

    // A body without a usable array resets the grid to empty cells.
    let cleared = put_grid(&app, json!({"blocks": "nonsense"})).await;
    assert!(cleared["blocks"]
        .as_array()
        .unwrap()
        .iter()
        .all(|block| block["vlan"] == ""));
}

#[tokio::test]
async fn short_documents_on_disk_are_padded_on_read() {
    let (app, data_dir) = setup_app();
    std::fs::write(
        data_dir.path().join("temp-grid-db.json"),
        json!({
            "blocks": [
                {"vlan": "10", "switchName": "SW-CORE", "portNumber": "Gi0/1"},
                {"vlan": 99}
            ]
        })
        .to_string(),
    )
    .unwrap();

    let grid = get_grid(&app).await;
    let blocks = grid["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 41);
    assert_eq!(blocks[0]["vlan"], "10");
    assert_eq!(blocks[1]["vlan"], "");
    assert_eq!(blocks[2]["switchName"], "");

    // The padded form is written back.
    let raw = std::fs::read_to_string(data_dir.path().join("temp-grid-db.json")).unwrap();
    let doc: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["blocks"].as_array().unwrap().len(), 41);
}
