use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};

use crate::{
    dto::session_dto::{GradeSubmission, GradesResponse, QuizGrades},
    error::{Error, Result},
    models::attempt::QuizAttempt,
    models::quiz::QuizWithQuestions,
    AppState,
};

fn submissions_for(quiz_id: i64, attempts: &[QuizAttempt]) -> Vec<GradeSubmission> {
    let mut submissions: Vec<GradeSubmission> = attempts
        .iter()
        .filter(|attempt| attempt.quiz_id == quiz_id && attempt.is_completed)
        .map(GradeSubmission::from)
        .collect();
    submissions.sort_by(|a, b| {
        b.completed_at
            .unwrap_or(b.updated_at)
            .cmp(&a.completed_at.unwrap_or(a.updated_at))
    });
    submissions
}

fn grades_for(quiz: &QuizWithQuestions, attempts: &[QuizAttempt]) -> QuizGrades {
    let submissions = submissions_for(quiz.quiz.id, attempts);
    QuizGrades {
        quiz_id: quiz.quiz.id,
        title: quiz.quiz.title.clone(),
        quiz_code: quiz.quiz.quiz_code.clone(),
        submission_count: submissions.len(),
        submissions,
    }
}

/// Completed-attempt summaries for every quiz, newest submissions first.
#[axum::debug_handler]
pub async fn list_grades(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let quizzes = state.quizzes.list_quizzes().await?;
    let attempts = state.attempts.list_attempts().await?;

    Ok(Json(GradesResponse {
        quizzes: quizzes
            .iter()
            .map(|quiz| grades_for(quiz, &attempts))
            .collect(),
    }))
}

#[axum::debug_handler]
pub async fn quiz_grades(
    State(state): State<AppState>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let quiz = state
        .quizzes
        .get_quiz(quiz_id)
        .await?
        .ok_or_else(|| Error::NotFound("Quiz not found.".to_string()))?;
    let attempts = state.attempts.list_attempts().await?;
    Ok(Json(grades_for(&quiz, &attempts)))
}
