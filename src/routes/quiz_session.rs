use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::session_dto::{
        CompleteAttemptPayload, QuizAccessPayload, QuizSessionPayload, QuizSessionResponse,
        QuizSummary, SessionStatus,
    },
    error::{Error, Result},
    models::attempt::normalize_participant_name,
    models::quiz::DEFAULT_DURATION_MINUTES,
    stores::attempt_store::NewAttempt,
    AppState,
};

/// Looks a quiz up by its participant-facing code.
#[axum::debug_handler]
pub async fn quiz_access(
    State(state): State<AppState>,
    Json(payload): Json<QuizAccessPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let quiz = state
        .quizzes
        .get_quiz_by_code(&payload.quiz_code)
        .await?
        .ok_or_else(|| Error::NotFound("Invalid quiz code.".to_string()))?;
    Ok(Json(quiz))
}

/// Resolves the participant's session state for a quiz, creating a fresh
/// timed attempt when `start` is set and the participant has no prior
/// attempt. Only the latest attempt per participant is consulted, and a
/// completed or expired one is terminal.
#[axum::debug_handler]
pub async fn quiz_session(
    State(state): State<AppState>,
    Json(payload): Json<QuizSessionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let quiz = state
        .quizzes
        .get_quiz_by_code(&payload.quiz_code)
        .await?
        .ok_or_else(|| Error::NotFound("Invalid quiz code.".to_string()))?;
    let participant = normalize_participant_name(&payload.participant_name);
    let latest = state.attempts.latest_attempt(quiz.quiz.id, &participant).await?;

    if let Some(attempt) = latest {
        let (status, include_questions) = if attempt.is_completed {
            (SessionStatus::Completed, false)
        } else if attempt.is_expired() {
            (SessionStatus::Expired, false)
        } else {
            (SessionStatus::Active, true)
        };
        return Ok(Json(QuizSessionResponse {
            status,
            quiz: QuizSummary::of(&quiz, include_questions),
            attempt: Some(attempt),
        }));
    }

    if !payload.start {
        return Ok(Json(QuizSessionResponse {
            status: SessionStatus::Ready,
            attempt: None,
            quiz: QuizSummary::of(&quiz, false),
        }));
    }

    let duration_minutes = if quiz.quiz.duration_minutes > 0 {
        quiz.quiz.duration_minutes
    } else {
        DEFAULT_DURATION_MINUTES
    };
    let attempt = state
        .attempts
        .create_attempt(NewAttempt {
            quiz_id: quiz.quiz.id,
            quiz_code: quiz.quiz.quiz_code.clone(),
            participant_name: participant,
            duration_minutes,
        })
        .await?;

    Ok(Json(QuizSessionResponse {
        status: SessionStatus::Active,
        quiz: QuizSummary::of(&quiz, true),
        attempt: Some(attempt),
    }))
}

#[axum::debug_handler]
pub async fn complete_attempt(
    State(state): State<AppState>,
    Json(payload): Json<CompleteAttemptPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    if payload.score > payload.total_questions {
        return Err(Error::BadRequest(
            "Score cannot exceed total questions.".to_string(),
        ));
    }

    let attempt = state
        .attempts
        .mark_completed(payload.attempt_id, payload.score, payload.total_questions)
        .await?
        .ok_or_else(|| Error::NotFound("Attempt not found.".to_string()))?;
    Ok(Json(attempt))
}
