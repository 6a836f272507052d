use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;
use crate::models::attempt::QuizAttempt;
use crate::models::quiz::{Question, QuizWithQuestions};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuizAccessPayload {
    #[validate(custom(function = not_blank))]
    pub quiz_code: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuizSessionPayload {
    #[validate(custom(function = not_blank))]
    pub quiz_code: String,
    #[validate(custom(function = not_blank))]
    pub participant_name: String,
    #[serde(default)]
    pub start: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompleteAttemptPayload {
    #[validate(range(min = 1))]
    pub attempt_id: i64,
    #[validate(range(min = 0))]
    pub score: i64,
    #[validate(range(min = 1))]
    pub total_questions: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Ready,
    Active,
    Expired,
    Completed,
}

/// Quiz as shown to participants. Questions are included only once an
/// attempt is active.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub quiz_code: String,
    pub duration_minutes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<Question>>,
}

impl QuizSummary {
    pub fn of(quiz: &QuizWithQuestions, include_questions: bool) -> Self {
        Self {
            id: quiz.quiz.id,
            title: quiz.quiz.title.clone(),
            description: quiz.quiz.description.clone(),
            quiz_code: quiz.quiz.quiz_code.clone(),
            duration_minutes: quiz.quiz.duration_minutes,
            questions: include_questions.then(|| quiz.questions.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizSessionResponse {
    pub status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt: Option<QuizAttempt>,
    pub quiz: QuizSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeSubmission {
    pub attempt_id: i64,
    pub participant_name: String,
    pub score: Option<i64>,
    pub total_questions: Option<i64>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl From<&QuizAttempt> for GradeSubmission {
    fn from(attempt: &QuizAttempt) -> Self {
        Self {
            attempt_id: attempt.id,
            participant_name: attempt.participant_name.clone(),
            score: attempt.score,
            total_questions: attempt.total_questions,
            started_at: attempt.started_at,
            completed_at: attempt.completed_at,
            updated_at: attempt.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizGrades {
    pub quiz_id: i64,
    pub title: String,
    pub quiz_code: String,
    pub submission_count: usize,
    pub submissions: Vec<GradeSubmission>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradesResponse {
    pub quizzes: Vec<QuizGrades>,
}
