use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::session::ADMIN_COOKIE_NAME;
use crate::AppState;

/// Pulls the admin session token out of the Cookie header, if present.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').map(str::trim).find_map(|pair| {
        pair.strip_prefix(ADMIN_COOKIE_NAME)?
            .strip_prefix('=')
            .map(str::to_string)
    })
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let authenticated = session_token(req.headers())
        .map(|token| state.sessions.validate(&token))
        .unwrap_or(false);

    if !authenticated {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"unauthorized"})),
        )
            .into_response();
    }

    next.run(req).await
}
