#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::document::ExtractError;
use crate::llm_client::LlmError;
use crate::report::ReportError;
use crate::search::SearchError;
use crate::stt::SttError;
use crate::tts::TtsError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every external failure kind maps to a stable client-facing code; internal
/// error text is logged, never leaked to clients.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Document extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Transcription error: {0}")]
    Transcription(#[from] SttError),

    #[error("Speech synthesis error: {0}")]
    Synthesis(#[from] TtsError),

    #[error("Report generation error: {0}")]
    Report(#[from] ReportError),

    #[error("Web search error: {0}")]
    Search(#[from] SearchError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            // Extraction failures are about the uploaded file, so the reason
            // is safe (and useful) to return to the client.
            AppError::Extraction(e) => (StatusCode::BAD_REQUEST, "EXTRACTION_ERROR", e.to_string()),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Transcription(e) => {
                tracing::error!("Transcription error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "TRANSCRIPTION_ERROR",
                    "A transcription error occurred".to_string(),
                )
            }
            AppError::Synthesis(e) => {
                tracing::error!("Speech synthesis error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SYNTHESIS_ERROR",
                    "A speech synthesis error occurred".to_string(),
                )
            }
            AppError::Report(e) => {
                tracing::error!("Report generation error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "REPORT_ERROR",
                    "A report generation error occurred".to_string(),
                )
            }
            AppError::Search(e) => {
                tracing::error!("Web search error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SEARCH_ERROR",
                    "A web search error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
