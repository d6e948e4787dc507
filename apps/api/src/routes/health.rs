use axum::Json;
use serde_json::{json, Value};

/// GET /api/health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "Interview coach API is running",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
