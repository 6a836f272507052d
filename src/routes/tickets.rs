use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::ticket_dto::{CreateTicketPayload, TicketListResponse, UpdateTicketPayload},
    error::{Error, Result},
    models::ticket::TicketStatus,
    stores::ticket_store::{NewTicket, TicketPatch},
    AppState,
};

#[axum::debug_handler]
pub async fn list_tickets(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let tickets = state.tickets.list_tickets().await?;
    Ok(Json(TicketListResponse { tickets }))
}

#[axum::debug_handler]
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let ticket = state
        .tickets
        .get_ticket(ticket_id)
        .await?
        .ok_or_else(|| Error::NotFound("Ticket not found.".to_string()))?;
    Ok(Json(ticket))
}

#[axum::debug_handler]
pub async fn create_ticket(
    State(state): State<AppState>,
    Json(payload): Json<CreateTicketPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let status = TicketStatus::parse(&payload.status)
        .ok_or_else(|| Error::BadRequest("Status must be open or close.".to_string()))?;

    let ticket = state
        .tickets
        .create_ticket(NewTicket {
            team_leader: payload.team_leader,
            team_members: payload.team_members,
            creation_date_time: payload.creation_date_time,
            status,
            subject: payload.subject,
            break_down: payload.break_down,
            resolution: payload.resolution,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

#[axum::debug_handler]
pub async fn update_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<i64>,
    Json(payload): Json<UpdateTicketPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    // A status that does not normalize to open/close is ignored rather
    // than rejected on update.
    let status = payload
        .status
        .as_deref()
        .and_then(TicketStatus::parse);

    let ticket = state
        .tickets
        .update_ticket(
            ticket_id,
            TicketPatch {
                team_leader: payload.team_leader,
                team_members: payload.team_members,
                creation_date_time: payload.creation_date_time,
                status,
                subject: payload.subject,
                break_down: payload.break_down,
                resolution: payload.resolution,
            },
        )
        .await?
        .ok_or_else(|| Error::NotFound("Ticket not found.".to_string()))?;
    Ok(Json(ticket))
}

#[axum::debug_handler]
pub async fn delete_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<i64>,
) -> Result<impl IntoResponse> {
    if !state.tickets.delete_ticket(ticket_id).await? {
        return Err(Error::NotFound("Ticket not found.".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
