use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Open,
    Close,
}

impl TicketStatus {
    /// Case-insensitive parse; anything other than open/close is rejected
    /// at the boundary.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "open" => Some(Self::Open),
            "close" => Some(Self::Close),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: i64,
    #[serde(default)]
    pub team_leader: String,
    #[serde(default)]
    pub team_members: String,
    #[serde(default)]
    pub creation_date_time: String,
    pub status: TicketStatus,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub break_down: String,
    #[serde(default)]
    pub resolution: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Legacy field migrated into `creation_date_time` on load and never
    /// written back.
    #[serde(default, rename = "completionDateTime", skip_serializing)]
    pub legacy_completion_date_time: Option<String>,
}
