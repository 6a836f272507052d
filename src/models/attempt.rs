use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub id: i64,
    pub quiz_id: i64,
    pub quiz_code: String,
    pub participant_name: String,
    /// Trimmed, lower-cased participant name; the dedup/lookup key.
    pub participant_key: String,
    pub started_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub total_questions: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuizAttempt {
    /// Expiry is computed on read, never stored. The boundary is inclusive:
    /// an attempt is expired the instant `now` reaches `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

pub fn normalize_participant_name(value: &str) -> String {
    value.trim().to_string()
}

pub fn participant_key(value: &str) -> String {
    normalize_participant_name(value).to_lowercase()
}
