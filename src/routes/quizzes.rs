use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::quiz_dto::{
        CreateQuestionPayload, CreateQuizPayload, ImportQuestionPayload, QuestionListResponse,
        QuizListResponse, UpdateQuestionPayload, UpdateQuizPayload,
    },
    error::{Error, Result},
    stores::quiz_store::{NewQuestion, NewQuiz, QuestionPatch, QuizPatch},
    AppState,
};

pub(crate) fn options_array(options: Vec<String>) -> Result<[String; 4]> {
    options
        .try_into()
        .map_err(|_| Error::BadRequest("Exactly 4 non-empty options are required.".to_string()))
}

#[axum::debug_handler]
pub async fn list_quizzes(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let quizzes = state.quizzes.list_quizzes().await?;
    Ok(Json(QuizListResponse { quizzes }))
}

#[axum::debug_handler]
pub async fn create_quiz(
    State(state): State<AppState>,
    Json(payload): Json<CreateQuizPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let quiz = state
        .quizzes
        .create_quiz(NewQuiz {
            title: payload.title,
            description: payload.description,
            quiz_code: payload.quiz_code,
            duration_minutes: payload.duration_minutes,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(quiz)))
}

#[axum::debug_handler]
pub async fn get_quiz(
    State(state): State<AppState>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let quiz = state
        .quizzes
        .get_quiz(quiz_id)
        .await?
        .ok_or_else(|| Error::NotFound("Quiz not found.".to_string()))?;
    Ok(Json(quiz))
}

#[axum::debug_handler]
pub async fn update_quiz(
    State(state): State<AppState>,
    Path(quiz_id): Path<i64>,
    Json(payload): Json<UpdateQuizPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let quiz = state
        .quizzes
        .update_quiz(
            quiz_id,
            QuizPatch {
                title: payload.title,
                description: payload.description,
                quiz_code: payload.quiz_code,
                duration_minutes: payload.duration_minutes,
            },
        )
        .await?
        .ok_or_else(|| Error::NotFound("Quiz not found.".to_string()))?;
    Ok(Json(quiz))
}

#[axum::debug_handler]
pub async fn delete_quiz(
    State(state): State<AppState>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse> {
    if !state.quizzes.delete_quiz(quiz_id).await? {
        return Err(Error::NotFound("Quiz not found.".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn list_questions(
    State(state): State<AppState>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let quiz = state
        .quizzes
        .get_quiz(quiz_id)
        .await?
        .ok_or_else(|| Error::NotFound("Quiz not found.".to_string()))?;
    Ok(Json(QuestionListResponse {
        questions: quiz.questions,
    }))
}

#[axum::debug_handler]
pub async fn create_question(
    State(state): State<AppState>,
    Path(quiz_id): Path<i64>,
    Json(payload): Json<CreateQuestionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let question = state
        .quizzes
        .create_question(
            quiz_id,
            NewQuestion {
                prompt: payload.prompt,
                options: options_array(payload.options)?,
                correct_option: payload.correct_option,
            },
        )
        .await?
        .ok_or_else(|| Error::NotFound("Quiz not found.".to_string()))?;
    Ok((StatusCode::CREATED, Json(question)))
}

/// Copies a bank question into the quiz; the new question keeps no link
/// back to the bank entry.
#[axum::debug_handler]
pub async fn import_question(
    State(state): State<AppState>,
    Path(quiz_id): Path<i64>,
    Json(payload): Json<ImportQuestionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let bank_question = state
        .quizzes
        .get_bank_question(payload.bank_question_id)
        .await?
        .ok_or_else(|| Error::NotFound("Question bank entry not found.".to_string()))?;

    let question = state
        .quizzes
        .create_question(
            quiz_id,
            NewQuestion {
                prompt: bank_question.prompt,
                options: bank_question.options,
                correct_option: bank_question.correct_option,
            },
        )
        .await?
        .ok_or_else(|| Error::NotFound("Quiz not found.".to_string()))?;
    Ok((StatusCode::CREATED, Json(question)))
}

#[axum::debug_handler]
pub async fn update_question(
    State(state): State<AppState>,
    Path((quiz_id, question_id)): Path<(i64, i64)>,
    Json(payload): Json<UpdateQuestionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    if payload.is_empty() {
        return Err(Error::BadRequest(
            "No fields provided for update.".to_string(),
        ));
    }

    let options = payload.options.map(options_array).transpose()?;
    let question = state
        .quizzes
        .update_question(
            quiz_id,
            question_id,
            QuestionPatch {
                prompt: payload.prompt,
                options,
                correct_option: payload.correct_option,
            },
        )
        .await?
        .ok_or_else(|| Error::NotFound("Question not found.".to_string()))?;
    Ok(Json(question))
}

#[axum::debug_handler]
pub async fn delete_question(
    State(state): State<AppState>,
    Path((quiz_id, question_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse> {
    if !state.quizzes.delete_question(quiz_id, question_id).await? {
        return Err(Error::NotFound("Question not found.".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
