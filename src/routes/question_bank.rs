use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::quiz_dto::{CreateQuestionPayload, QuestionBankResponse, UpdateQuestionPayload},
    error::{Error, Result},
    stores::quiz_store::{NewQuestion, QuestionPatch},
    AppState,
};

use super::quizzes::options_array;

#[axum::debug_handler]
pub async fn list_bank_questions(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let questions = state.quizzes.list_question_bank().await?;
    Ok(Json(QuestionBankResponse { questions }))
}

#[axum::debug_handler]
pub async fn create_bank_question(
    State(state): State<AppState>,
    Json(payload): Json<CreateQuestionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let question = state
        .quizzes
        .create_bank_question(NewQuestion {
            prompt: payload.prompt,
            options: options_array(payload.options)?,
            correct_option: payload.correct_option,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(question)))
}

#[axum::debug_handler]
pub async fn update_bank_question(
    State(state): State<AppState>,
    Path(question_id): Path<i64>,
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
        .update_bank_question(
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
pub async fn delete_bank_question(
    State(state): State<AppState>,
    Path(question_id): Path<i64>,
) -> Result<impl IntoResponse> {
    if !state.quizzes.delete_bank_question(question_id).await? {
        return Err(Error::NotFound("Question not found.".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
