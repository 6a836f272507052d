use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::{load_document, persist_document};
use crate::error::Result;
use crate::models::attempt::{normalize_participant_name, participant_key, QuizAttempt};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Counters {
    attempt_id: i64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AttemptDocument {
    counters: Counters,
    attempts: Vec<QuizAttempt>,
}

#[derive(Debug, Clone)]
pub struct NewAttempt {
    pub quiz_id: i64,
    pub quiz_code: String,
    pub participant_name: String,
    pub duration_minutes: i64,
}

#[derive(Clone)]
pub struct AttemptStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl AttemptStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    async fn load(&self) -> Result<AttemptDocument> {
        // Completion fields on older rows default through serde; the
        // shared loader persists the filled-in form.
        load_document(&self.path, |_doc: &mut AttemptDocument| {}).await
    }

    /// The authoritative attempt for `(quiz_id, participant)`: the one with
    /// the greatest `created_at`, ties breaking toward the higher id. The
    /// participant name is matched on its trimmed, lower-cased key.
    pub async fn latest_attempt(
        &self,
        quiz_id: i64,
        participant_name: &str,
    ) -> Result<Option<QuizAttempt>> {
        let key = participant_key(participant_name);
        let _guard = self.lock.lock().await;
        let doc = self.load().await?;
        Ok(doc
            .attempts
            .into_iter()
            .filter(|a| a.quiz_id == quiz_id && a.participant_key == key)
            .max_by_key(|a| (a.created_at, a.id)))
    }

    /// Always inserts a new row. Callers check `latest_attempt` first and
    /// only create when the participant has no prior attempt.
    pub async fn create_attempt(&self, input: NewAttempt) -> Result<QuizAttempt> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;

        let now = Utc::now();
        doc.counters.attempt_id += 1;
        let attempt = QuizAttempt {
            id: doc.counters.attempt_id,
            quiz_id: input.quiz_id,
            quiz_code: input.quiz_code,
            participant_name: normalize_participant_name(&input.participant_name),
            participant_key: participant_key(&input.participant_name),
            started_at: now,
            expires_at: now + Duration::minutes(input.duration_minutes),
            is_completed: false,
            completed_at: None,
            score: None,
            total_questions: None,
            created_at: now,
            updated_at: now,
        };
        doc.attempts.push(attempt.clone());
        persist_document(&self.path, &doc).await?;
        Ok(attempt)
    }

    /// Terminal transition. Unknown ids return `None`; calling twice
    /// simply overwrites the previous score and completion time.
    pub async fn mark_completed(
        &self,
        attempt_id: i64,
        score: i64,
        total_questions: i64,
    ) -> Result<Option<QuizAttempt>> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;

        let Some(attempt) = doc.attempts.iter_mut().find(|a| a.id == attempt_id) else {
            return Ok(None);
        };

        let now = Utc::now();
        attempt.is_completed = true;
        attempt.completed_at = Some(now);
        attempt.score = Some(score);
        attempt.total_questions = Some(total_questions);
        attempt.updated_at = now;

        let attempt = attempt.clone();
        persist_document(&self.path, &doc).await?;
        Ok(Some(attempt))
    }

    pub async fn list_attempts(&self) -> Result<Vec<QuizAttempt>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.attempts)
    }
}
