pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod session;
pub mod stores;

use crate::config::Config;
use crate::session::SessionSigner;
use crate::stores::{AttemptStore, QuizStore, TempGridStore, TicketStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionSigner,
    pub quizzes: QuizStore,
    pub tickets: TicketStore,
    pub attempts: AttemptStore,
    pub temp_grid: TempGridStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let sessions = SessionSigner::new(config.session_secret.clone(), config.production);
        let data_dir = config.data_dir.clone();

        Self {
            sessions,
            quizzes: QuizStore::new(data_dir.join("admin-db.json")),
            tickets: TicketStore::new(data_dir.join("tickets-db.json")),
            attempts: AttemptStore::new(data_dir.join("quiz-session-db.json")),
            temp_grid: TempGridStore::new(data_dir.join("temp-grid-db.json")),
            config,
        }
    }
}
