use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{four_options, not_blank, valid_quiz_code};
use crate::models::quiz::{BankQuestion, Question, QuizWithQuestions};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizPayload {
    #[validate(custom(function = not_blank))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(custom(function = valid_quiz_code))]
    pub quiz_code: Option<String>,
    #[validate(range(min = 1))]
    pub duration_minutes: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuizPayload {
    #[validate(custom(function = not_blank))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = valid_quiz_code))]
    pub quiz_code: Option<String>,
    #[validate(range(min = 1))]
    pub duration_minutes: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionPayload {
    #[validate(custom(function = not_blank))]
    pub prompt: String,
    #[validate(custom(function = four_options))]
    pub options: Vec<String>,
    #[validate(range(min = 0, max = 3))]
    pub correct_option: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionPayload {
    #[validate(custom(function = not_blank))]
    pub prompt: Option<String>,
    #[validate(custom(function = four_options))]
    pub options: Option<Vec<String>>,
    #[validate(range(min = 0, max = 3))]
    pub correct_option: Option<i64>,
}

impl UpdateQuestionPayload {
    pub fn is_empty(&self) -> bool {
        self.prompt.is_none() && self.options.is_none() && self.correct_option.is_none()
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImportQuestionPayload {
    #[validate(range(min = 1))]
    pub bank_question_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizListResponse {
    pub quizzes: Vec<QuizWithQuestions>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionListResponse {
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionBankResponse {
    pub questions: Vec<BankQuestion>,
}
