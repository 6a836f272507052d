use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::{load_document, persist_document};
use crate::error::Result;
use crate::models::ticket::{Ticket, TicketStatus};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Counters {
    ticket_id: i64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TicketDocument {
    counters: Counters,
    tickets: Vec<Ticket>,
}

/// Older documents carried `completionDateTime` instead of
/// `creationDateTime`; the value moves over when the new field is absent
/// and the legacy field is dropped from disk either way.
fn repair(doc: &mut TicketDocument) {
    for ticket in &mut doc.tickets {
        if let Some(legacy) = ticket.legacy_completion_date_time.take() {
            if ticket.creation_date_time.is_empty() {
                ticket.creation_date_time = legacy;
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewTicket {
    pub team_leader: String,
    pub team_members: String,
    pub creation_date_time: String,
    pub status: TicketStatus,
    pub subject: String,
    pub break_down: String,
    pub resolution: String,
}

#[derive(Debug, Clone, Default)]
pub struct TicketPatch {
    pub team_leader: Option<String>,
    pub team_members: Option<String>,
    pub creation_date_time: Option<String>,
    pub status: Option<TicketStatus>,
    pub subject: Option<String>,
    pub break_down: Option<String>,
    pub resolution: Option<String>,
}

#[derive(Clone)]
pub struct TicketStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl TicketStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    async fn load(&self) -> Result<TicketDocument> {
        load_document(&self.path, repair).await
    }

    pub async fn list_tickets(&self) -> Result<Vec<Ticket>> {
        let _guard = self.lock.lock().await;
        let mut tickets = self.load().await?.tickets;
        tickets.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(tickets)
    }

    pub async fn get_ticket(&self, ticket_id: i64) -> Result<Option<Ticket>> {
        let _guard = self.lock.lock().await;
        let doc = self.load().await?;
        Ok(doc.tickets.into_iter().find(|t| t.id == ticket_id))
    }

    pub async fn create_ticket(&self, input: NewTicket) -> Result<Ticket> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;

        let now = Utc::now();
        doc.counters.ticket_id += 1;
        let ticket = Ticket {
            id: doc.counters.ticket_id,
            team_leader: input.team_leader.trim().to_string(),
            team_members: input.team_members.trim().to_string(),
            creation_date_time: input.creation_date_time,
            status: input.status,
            subject: input.subject.trim().to_string(),
            break_down: input.break_down.trim().to_string(),
            resolution: input.resolution.trim().to_string(),
            created_at: now,
            updated_at: now,
            legacy_completion_date_time: None,
        };
        doc.tickets.push(ticket.clone());
        persist_document(&self.path, &doc).await?;
        Ok(ticket)
    }

    /// Partial update: omitted fields stay untouched, supplied strings are
    /// trimmed before storage.
    pub async fn update_ticket(
        &self,
        ticket_id: i64,
        patch: TicketPatch,
    ) -> Result<Option<Ticket>> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;

        let Some(ticket) = doc.tickets.iter_mut().find(|t| t.id == ticket_id) else {
            return Ok(None);
        };

        if let Some(team_leader) = &patch.team_leader {
            ticket.team_leader = team_leader.trim().to_string();
        }
        if let Some(team_members) = &patch.team_members {
            ticket.team_members = team_members.trim().to_string();
        }
        if let Some(creation_date_time) = &patch.creation_date_time {
            ticket.creation_date_time = creation_date_time.clone();
        }
        if let Some(status) = patch.status {
            ticket.status = status;
        }
        if let Some(subject) = &patch.subject {
            ticket.subject = subject.trim().to_string();
        }
        if let Some(break_down) = &patch.break_down {
            ticket.break_down = break_down.trim().to_string();
        }
        if let Some(resolution) = &patch.resolution {
            ticket.resolution = resolution.trim().to_string();
        }
        ticket.updated_at = Utc::now();

        let ticket = ticket.clone();
        persist_document(&self.path, &doc).await?;
        Ok(Some(ticket))
    }

    pub async fn delete_ticket(&self, ticket_id: i64) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;

        let before = doc.tickets.len();
        doc.tickets.retain(|t| t.id != ticket_id);
        if doc.tickets.len() == before {
            return Ok(false);
        }

        persist_document(&self.path, &doc).await?;
        Ok(true)
    }
}
