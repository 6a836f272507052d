use axum::{
    http::{header, HeaderMap},
    response::{IntoResponse, Json},
};
use axum::extract::State;
use serde_json::json;
use validator::Validate;

use crate::{
    dto::admin_dto::{LoginPayload, SessionStatusResponse},
    error::{Error, Result},
    middleware::auth::session_token,
    AppState,
};

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    if payload.username != state.config.admin_user || payload.password != state.config.admin_pass {
        return Err(Error::Unauthorized("Invalid credentials".to_string()));
    }

    let cookie = state.sessions.issue(&payload.username);
    Ok(([(header::SET_COOKIE, cookie)], Json(json!({ "ok": true }))))
}

#[axum::debug_handler]
pub async fn logout(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let cookie = state.sessions.revoke();
    Ok(([(header::SET_COOKIE, cookie)], Json(json!({ "ok": true }))))
}

#[axum::debug_handler]
pub async fn session_status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let authenticated = session_token(&headers)
        .map(|token| state.sessions.validate(&token))
        .unwrap_or(false);
    Ok(Json(SessionStatusResponse { authenticated }))
}
