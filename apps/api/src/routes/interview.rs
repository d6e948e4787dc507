use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config;
use crate::document::{self, sanitize_file_name};
use crate::errors::AppError;
use crate::scores::{self, ScoreSet};
use crate::state::AppState;

fn default_interview_type() -> String {
    config::DEFAULT_INTERVIEW_TYPE.to_string()
}

/// Rejects a missing or blank request field with a 400 naming the field.
fn required(field: Option<String>, name: &str) -> Result<String, AppError> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::Validation(format!(
            "{name} is required and must not be empty"
        ))),
    }
}

#[derive(Deserialize)]
pub struct GenerateQuestionRequest {
    #[serde(default = "default_interview_type")]
    pub interview_type: String,
    pub document_text: Option<String>,
}

#[derive(Serialize)]
pub struct GenerateQuestionResponse {
    pub question: String,
    pub interview_type: String,
}

#[derive(Deserialize)]
pub struct EvaluateAnswerRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
}

#[derive(Serialize)]
pub struct EvaluateAnswerResponse {
    pub evaluation: String,
    pub question: String,
    pub answer: String,
    pub scores: ScoreSet,
}

#[derive(Deserialize)]
pub struct HolisticFeedbackRequest {
    pub interview_log: Option<String>,
}

#[derive(Serialize)]
pub struct HolisticFeedbackResponse {
    pub feedback: String,
}

#[derive(Serialize)]
pub struct ProcessDocumentResponse {
    pub document_text: String,
    pub filename: String,
}

/// POST /api/generate-question
pub async fn handle_generate_question(
    State(state): State<AppState>,
    Json(req): Json<GenerateQuestionRequest>,
) -> Result<Json<GenerateQuestionResponse>, AppError> {
    let document_text = required(req.document_text, "document_text")?;

    let question = state
        .llm
        .generate_question(&req.interview_type, &document_text)
        .await?;
    Ok(Json(GenerateQuestionResponse {
        question,
        interview_type: req.interview_type,
    }))
}

/// POST /api/evaluate-answer
pub async fn handle_evaluate_answer(
    State(state): State<AppState>,
    Json(req): Json<EvaluateAnswerRequest>,
) -> Result<Json<EvaluateAnswerResponse>, AppError> {
    let question = required(req.question, "question")?;
    let answer = required(req.answer, "answer")?;

    let evaluation = state.llm.evaluate_answer(&question, &answer).await?;
    let scores = scores::parse_scores(&evaluation);
    Ok(Json(EvaluateAnswerResponse {
        evaluation,
        question,
        answer,
        scores,
    }))
}

/// POST /api/holistic-feedback
pub async fn handle_holistic_feedback(
    State(state): State<AppState>,
    Json(req): Json<HolisticFeedbackRequest>,
) -> Result<Json<HolisticFeedbackResponse>, AppError> {
    let interview_log = required(req.interview_log, "interview_log")?;

    let feedback = state.llm.holistic_feedback(&interview_log).await?;
    Ok(Json(HolisticFeedbackResponse { feedback }))
}

/// POST /api/process-document
///
/// Accepts a multipart upload under the `file` field, extracts the text, and
/// returns it. The upload is written under a per-request unique name so
/// concurrent uploads of identically-named files never collide, and is
/// removed again once extraction finishes.
pub async fn handle_process_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProcessDocumentResponse>, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field
                .file_name()
                .map(sanitize_file_name)
                .unwrap_or_else(|| "upload".to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
            upload = Some((filename, data.to_vec()));
        }
    }

    let (filename, data) = upload.ok_or_else(|| {
        AppError::Validation("multipart field 'file' is required".to_string())
    })?;
    if data.is_empty() {
        return Err(AppError::Validation("uploaded file is empty".to_string()));
    }

    tokio::fs::create_dir_all(&state.config.upload_dir)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;
    let path = state
        .config
        .upload_dir
        .join(format!("{}_{}", Uuid::new_v4().simple(), filename));
    tokio::fs::write(&path, &data)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    let extracted = {
        let path = path.clone();
        tokio::task::spawn_blocking(move || document::extract_text(&path))
            .await
            .map_err(|e| AppError::Internal(e.into()))?
    };

    // The stored copy is scratch space either way; clean it up before
    // reporting the extraction outcome.
    if let Err(e) = tokio::fs::remove_file(&path).await {
        warn!("failed to remove upload {}: {e}", path.display());
    }

    let document_text = extracted?;
    info!("processed document upload: {filename}");
    Ok(Json(ProcessDocumentResponse {
        document_text,
        filename,
    }))
}
