use axum::{
    extract::State,
    response::{IntoResponse, Json},
};

use crate::{
    dto::temp_grid_dto::{SaveTempGridPayload, TempGridResponse},
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn get_temp_grid(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let blocks = state.temp_grid.blocks().await?;
    Ok(Json(TempGridResponse { blocks }))
}

#[axum::debug_handler]
pub async fn save_temp_grid(
    State(state): State<AppState>,
    Json(payload): Json<SaveTempGridPayload>,
) -> Result<impl IntoResponse> {
    let blocks = state.temp_grid.save(&payload.blocks).await?;
    Ok(Json(TempGridResponse { blocks }))
}
