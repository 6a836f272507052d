pub mod admin_auth;
pub mod grades;
pub mod health;
pub mod question_bank;
pub mod quiz_session;
pub mod quizzes;
pub mod temp_grid;
pub mod tickets;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::AppState;

pub fn router(state: AppState) -> Router {
    let admin_api = Router::new()
        .route(
            "/api/admin/quizzes",
            get(quizzes::list_quizzes).post(quizzes::create_quiz),
        )
        .route(
            "/api/admin/quizzes/:quiz_id",
            get(quizzes::get_quiz)
                .put(quizzes::update_quiz)
                .delete(quizzes::delete_quiz),
        )
        .route(
            "/api/admin/quizzes/:quiz_id/questions",
            get(quizzes::list_questions).post(quizzes::create_question),
        )
        .route(
            "/api/admin/quizzes/:quiz_id/questions/import",
            post(quizzes::import_question),
        )
        .route(
            "/api/admin/quizzes/:quiz_id/questions/:question_id",
            put(quizzes::update_question).delete(quizzes::delete_question),
        )
        .route(
            "/api/admin/question-bank",
            get(question_bank::list_bank_questions).post(question_bank::create_bank_question),
        )
        .route(
            "/api/admin/question-bank/:question_id",
            put(question_bank::update_bank_question).delete(question_bank::delete_bank_question),
        )
        .route("/api/admin/grades", get(grades::list_grades))
        .route("/api/admin/grades/:quiz_id", get(grades::quiz_grades))
        .route(
            "/api/admin/tickets/:ticket_id",
            get(tickets::get_ticket)
                .put(tickets::update_ticket)
                .delete(tickets::delete_ticket),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::require_admin,
        ));

    let public_api = Router::new()
        .route("/health", get(health::health))
        .route("/api/admin/login", post(admin_auth::login))
        .route("/api/admin/logout", post(admin_auth::logout))
        .route("/api/admin/session", get(admin_auth::session_status))
        .route("/api/quizzes/access", post(quiz_session::quiz_access))
        .route("/api/quizzes/session", post(quiz_session::quiz_session))
        .route(
            "/api/quizzes/session/complete",
            post(quiz_session::complete_attempt),
        )
        .route(
            "/api/tickets",
            get(tickets::list_tickets).post(tickets::create_ticket),
        )
        .route(
            "/api/tickets/:ticket_id",
            get(tickets::get_ticket).put(tickets::update_ticket),
        )
        .route(
            "/api/temp-grid",
            get(temp_grid::get_temp_grid).put(temp_grid::save_temp_grid),
        );

    public_api.merge(admin_api).with_state(state)
}
