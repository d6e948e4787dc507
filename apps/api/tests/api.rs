//! Router-level tests that exercise request validation and error shapes
//! without a live LLM. Handlers that would reach the network are only
//! driven through their reject-early paths.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use parley::config::Config;
use parley::llm_client::LlmClient;
use parley::routes::build_router;
use parley::state::AppState;

fn test_app(upload_dir: &std::path::Path) -> Router {
    let config = Config {
        gemini_api_key: "test-key".to_string(),
        piper_voice_model: "voice.onnx".into(),
        whisper_model: None,
        search_endpoint: None,
        upload_dir: upload_dir.to_path_buf(),
        report_dir: upload_dir.join("reports"),
        port: 0,
        rust_log: "warn".to_string(),
    };
    let llm = LlmClient::new(config.gemini_api_key.clone());
    build_router(AppState { llm, config })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_healthy() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let response = app
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn generate_question_rejects_empty_document_text() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let response = app
        .oneshot(json_request(
            "/api/generate-question",
            r#"{"document_text": "   "}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn generate_question_rejects_missing_document_text() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let response = app
        .oneshot(json_request("/api/generate-question", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn evaluate_answer_rejects_empty_answer() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let response = app
        .oneshot(json_request(
            "/api/evaluate-answer",
            r#"{"question": "Tell me about a launch.", "answer": ""}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn holistic_feedback_rejects_empty_log() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let response = app
        .oneshot(json_request(
            "/api/holistic-feedback",
            r#"{"interview_log": ""}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn process_document_rejects_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let boundary = "----parley-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"notes.txt\"\r\n\
         Content-Type: text/plain\r\n\r\n\
         just some plain text\r\n\
         --{boundary}--\r\n"
    );
    let request = Request::builder()
        .method("POST")
        .uri("/api/process-document")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "EXTRACTION_ERROR");
    // The scratch copy must not outlive the request
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .collect();
    assert!(leftovers.is_empty(), "upload scratch file was not removed");
}

#[tokio::test]
async fn process_document_requires_the_file_field() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let boundary = "----parley-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"other\"\r\n\r\n\
         value\r\n\
         --{boundary}--\r\n"
    );
    let request = Request::builder()
        .method("POST")
        .uri("/api/process-document")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}
