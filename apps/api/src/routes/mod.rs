pub mod health;
pub mod interview;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        .route(
            "/api/generate-question",
            post(interview::handle_generate_question),
        )
        .route(
            "/api/evaluate-answer",
            post(interview::handle_evaluate_answer),
        )
        .route(
            "/api/process-document",
            post(interview::handle_process_document),
        )
        .route(
            "/api/holistic-feedback",
            post(interview::handle_holistic_feedback),
        )
        .with_state(state)
}
