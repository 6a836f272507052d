use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;
use crate::models::ticket::Ticket;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketPayload {
    #[serde(default)]
    pub team_leader: String,
    #[serde(default)]
    pub team_members: String,
    /// Older clients still send this as `completionDateTime`.
    #[serde(alias = "completionDateTime")]
    #[validate(custom(function = not_blank))]
    pub creation_date_time: String,
    pub status: String,
    #[validate(custom(function = not_blank))]
    pub subject: String,
    #[validate(custom(function = not_blank))]
    pub break_down: String,
    #[serde(default)]
    pub resolution: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicketPayload {
    pub team_leader: Option<String>,
    pub team_members: Option<String>,
    #[serde(alias = "completionDateTime")]
    #[validate(custom(function = not_blank))]
    pub creation_date_time: Option<String>,
    pub status: Option<String>,
    #[validate(custom(function = not_blank))]
    pub subject: Option<String>,
    #[validate(custom(function = not_blank))]
    pub break_down: Option<String>,
    pub resolution: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TicketListResponse {
    pub tickets: Vec<Ticket>,
}
