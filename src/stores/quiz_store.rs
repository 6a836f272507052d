use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::{load_document, persist_document};
use crate::error::{Error, Result};
use crate::models::quiz::{
    BankQuestion, Question, Quiz, QuizWithQuestions, DEFAULT_DURATION_MINUTES,
};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Counters {
    quiz_id: i64,
    question_id: i64,
    bank_question_id: i64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct QuizDocument {
    counters: Counters,
    quizzes: Vec<Quiz>,
    questions: Vec<Question>,
    question_bank: Vec<BankQuestion>,
}

/// Migration applied on every load. Quiz codes are normalized to upper-case
/// and de-duplicated: a colliding or empty code falls back to `QUIZ-<id>`,
/// with `-A` appended until unique. Non-positive durations clamp to the
/// default. Idempotent, so a repaired document passes through unchanged.
fn repair(doc: &mut QuizDocument) {
    let mut used: HashSet<String> = HashSet::new();
    for quiz in &mut doc.quizzes {
        let mut code = quiz.quiz_code.trim().to_uppercase();
        if code.is_empty() || used.contains(&code) {
            code = format!("QUIZ-{}", quiz.id);
            while used.contains(&code) {
                code.push_str("-A");
            }
        }
        quiz.quiz_code = code.clone();
        used.insert(code);

        if quiz.duration_minutes <= 0 {
            quiz.duration_minutes = DEFAULT_DURATION_MINUTES;
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub title: String,
    pub description: String,
    pub quiz_code: Option<String>,
    pub duration_minutes: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct QuizPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub quiz_code: Option<String>,
    pub duration_minutes: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub prompt: String,
    pub options: [String; 4],
    pub correct_option: i64,
}

#[derive(Debug, Clone, Default)]
pub struct QuestionPatch {
    pub prompt: Option<String>,
    pub options: Option<[String; 4]>,
    pub correct_option: Option<i64>,
}

#[derive(Clone)]
pub struct QuizStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl QuizStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    async fn load(&self) -> Result<QuizDocument> {
        load_document(&self.path, repair).await
    }

    async fn persist(&self, doc: &QuizDocument) -> Result<()> {
        persist_document(&self.path, doc).await
    }

    fn with_questions(doc: &QuizDocument, quiz: Quiz) -> QuizWithQuestions {
        let mut questions: Vec<Question> = doc
            .questions
            .iter()
            .filter(|q| q.quiz_id == quiz.id)
            .cloned()
            .collect();
        questions.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        QuizWithQuestions { quiz, questions }
    }

    /// Quizzes sorted by `updated_at` descending, questions ascending by
    /// creation time within each quiz.
    pub async fn list_quizzes(&self) -> Result<Vec<QuizWithQuestions>> {
        let _guard = self.lock.lock().await;
        let doc = self.load().await?;
        let mut quizzes = doc.quizzes.clone();
        quizzes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(quizzes
            .into_iter()
            .map(|quiz| Self::with_questions(&doc, quiz))
            .collect())
    }

    pub async fn get_quiz(&self, quiz_id: i64) -> Result<Option<QuizWithQuestions>> {
        let _guard = self.lock.lock().await;
        let doc = self.load().await?;
        Ok(doc
            .quizzes
            .iter()
            .find(|q| q.id == quiz_id)
            .cloned()
            .map(|quiz| Self::with_questions(&doc, quiz)))
    }

    pub async fn get_quiz_by_code(&self, code: &str) -> Result<Option<QuizWithQuestions>> {
        let code = code.trim().to_uppercase();
        let _guard = self.lock.lock().await;
        let doc = self.load().await?;
        Ok(doc
            .quizzes
            .iter()
            .find(|q| q.quiz_code == code)
            .cloned()
            .map(|quiz| Self::with_questions(&doc, quiz)))
    }

    /// Fails with `Error::Conflict` when the code is already taken by any
    /// quiz, ignoring case. An absent code auto-generates `QUIZ-<id>`.
    pub async fn create_quiz(&self, input: NewQuiz) -> Result<QuizWithQuestions> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;

        let id = doc.counters.quiz_id + 1;
        let quiz_code = match input
            .quiz_code
            .as_deref()
            .map(|code| code.trim().to_uppercase())
            .filter(|code| !code.is_empty())
        {
            Some(code) => {
                if doc.quizzes.iter().any(|q| q.quiz_code == code) {
                    return Err(Error::Conflict("Quiz code already exists.".to_string()));
                }
                code
            }
            None => {
                let mut code = format!("QUIZ-{}", id);
                while doc.quizzes.iter().any(|q| q.quiz_code == code) {
                    code.push_str("-A");
                }
                code
            }
        };

        doc.counters.quiz_id = id;
        let now = Utc::now();
        let quiz = Quiz {
            id,
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            quiz_code,
            duration_minutes: match input.duration_minutes {
                Some(minutes) if minutes > 0 => minutes,
                _ => DEFAULT_DURATION_MINUTES,
            },
            created_at: now,
            updated_at: now,
        };
        doc.quizzes.push(quiz.clone());
        self.persist(&doc).await?;

        Ok(QuizWithQuestions {
            quiz,
            questions: Vec::new(),
        })
    }

    /// Partial update; a changed code re-checks uniqueness against all
    /// other quizzes.
    pub async fn update_quiz(
        &self,
        quiz_id: i64,
        patch: QuizPatch,
    ) -> Result<Option<QuizWithQuestions>> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;

        let new_code = patch
            .quiz_code
            .as_deref()
            .map(|code| code.trim().to_uppercase())
            .filter(|code| !code.is_empty());
        if let Some(code) = &new_code {
            if doc
                .quizzes
                .iter()
                .any(|q| q.id != quiz_id && &q.quiz_code == code)
            {
                return Err(Error::Conflict("Quiz code already exists.".to_string()));
            }
        }

        let Some(quiz) = doc.quizzes.iter_mut().find(|q| q.id == quiz_id) else {
            return Ok(None);
        };

        if let Some(title) = &patch.title {
            quiz.title = title.trim().to_string();
        }
        if let Some(description) = &patch.description {
            quiz.description = description.trim().to_string();
        }
        if let Some(code) = new_code {
            quiz.quiz_code = code;
        }
        if let Some(minutes) = patch.duration_minutes {
            quiz.duration_minutes = if minutes > 0 {
                minutes
            } else {
                DEFAULT_DURATION_MINUTES
            };
        }
        quiz.updated_at = Utc::now();

        let quiz = quiz.clone();
        self.persist(&doc).await?;
        Ok(Some(Self::with_questions(&doc, quiz)))
    }

    /// Removes the quiz and every question owned by it in one document
    /// cycle. Returns whether a quiz was found.
    pub async fn delete_quiz(&self, quiz_id: i64) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;

        let before = doc.quizzes.len();
        doc.quizzes.retain(|q| q.id != quiz_id);
        if doc.quizzes.len() == before {
            return Ok(false);
        }

        doc.questions.retain(|q| q.quiz_id != quiz_id);
        self.persist(&doc).await?;
        Ok(true)
    }

    pub async fn create_question(
        &self,
        quiz_id: i64,
        input: NewQuestion,
    ) -> Result<Option<Question>> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;

        let Some(quiz) = doc.quizzes.iter_mut().find(|q| q.id == quiz_id) else {
            return Ok(None);
        };

        let now = Utc::now();
        quiz.updated_at = now;
        doc.counters.question_id += 1;
        let question = Question {
            id: doc.counters.question_id,
            quiz_id,
            prompt: input.prompt.trim().to_string(),
            options: input.options.map(|option| option.trim().to_string()),
            correct_option: input.correct_option,
            created_at: now,
            updated_at: now,
        };
        doc.questions.push(question.clone());
        self.persist(&doc).await?;
        Ok(Some(question))
    }

    pub async fn update_question(
        &self,
        quiz_id: i64,
        question_id: i64,
        patch: QuestionPatch,
    ) -> Result<Option<Question>> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;

        let Some(question) = doc
            .questions
            .iter_mut()
            .find(|q| q.id == question_id && q.quiz_id == quiz_id)
        else {
            return Ok(None);
        };

        if let Some(prompt) = &patch.prompt {
            question.prompt = prompt.trim().to_string();
        }
        if let Some(options) = patch.options {
            question.options = options.map(|option| option.trim().to_string());
        }
        if let Some(correct_option) = patch.correct_option {
            question.correct_option = correct_option;
        }

        let now = Utc::now();
        question.updated_at = now;
        let question = question.clone();
        if let Some(quiz) = doc.quizzes.iter_mut().find(|q| q.id == quiz_id) {
            quiz.updated_at = now;
        }

        self.persist(&doc).await?;
        Ok(Some(question))
    }

    pub async fn delete_question(&self, quiz_id: i64, question_id: i64) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;

        let before = doc.questions.len();
        doc.questions
            .retain(|q| !(q.id == question_id && q.quiz_id == quiz_id));
        if doc.questions.len() == before {
            return Ok(false);
        }

        if let Some(quiz) = doc.quizzes.iter_mut().find(|q| q.id == quiz_id) {
            quiz.updated_at = Utc::now();
        }
        self.persist(&doc).await?;
        Ok(true)
    }

    pub async fn list_question_bank(&self) -> Result<Vec<BankQuestion>> {
        let _guard = self.lock.lock().await;
        let doc = self.load().await?;
        let mut bank = doc.question_bank;
        bank.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(bank)
    }

    pub async fn get_bank_question(&self, question_id: i64) -> Result<Option<BankQuestion>> {
        let _guard = self.lock.lock().await;
        let doc = self.load().await?;
        Ok(doc
            .question_bank
            .into_iter()
            .find(|q| q.id == question_id))
    }

    pub async fn create_bank_question(&self, input: NewQuestion) -> Result<BankQuestion> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;

        let now = Utc::now();
        doc.counters.bank_question_id += 1;
        let question = BankQuestion {
            id: doc.counters.bank_question_id,
            prompt: input.prompt.trim().to_string(),
            options: input.options.map(|option| option.trim().to_string()),
            correct_option: input.correct_option,
            created_at: now,
            updated_at: now,
        };
        doc.question_bank.push(question.clone());
        self.persist(&doc).await?;
        Ok(question)
    }

    pub async fn update_bank_question(
        &self,
        question_id: i64,
        patch: QuestionPatch,
    ) -> Result<Option<BankQuestion>> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;

        let Some(question) = doc.question_bank.iter_mut().find(|q| q.id == question_id) else {
            return Ok(None);
        };

        if let Some(prompt) = &patch.prompt {
            question.prompt = prompt.trim().to_string();
        }
        if let Some(options) = patch.options {
            question.options = options.map(|option| option.trim().to_string());
        }
        if let Some(correct_option) = patch.correct_option {
            question.correct_option = correct_option;
        }
        question.updated_at = Utc::now();

        let question = question.clone();
        self.persist(&doc).await?;
        Ok(Some(question))
    }

    pub async fn delete_bank_question(&self, question_id: i64) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;

        let before = doc.question_bank.len();
        doc.question_bank.retain(|q| q.id != question_id);
        if doc.question_bank.len() == before {
            return Ok(false);
        }

        self.persist(&doc).await?;
        Ok(true)
    }
}
