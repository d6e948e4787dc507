use std::path::PathBuf;

use anyhow::{Context, Result};

/// The interview formats the coach knows how to run. Free-text types are
/// still accepted over HTTP; this list drives the `coach` CLI choices.
pub const INTERVIEW_TYPES: [&str; 5] = [
    "Product Sense",
    "Technical",
    "General Product Interview",
    "Group Discussion (GD)",
    "Root cause analysis",
];

pub const DEFAULT_INTERVIEW_TYPE: &str = "Technical";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    /// Piper voice model (.onnx) used for speech synthesis.
    pub piper_voice_model: PathBuf,
    /// Whisper model (ggml .bin) for local transcription. Optional: when
    /// unset, the `coach` CLI only accepts typed answers.
    pub whisper_model: Option<PathBuf>,
    /// SearxNG-compatible search endpoint for the example-answer lookup.
    pub search_endpoint: Option<String>,
    pub upload_dir: PathBuf,
    pub report_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            piper_voice_model: env_or("PIPER_VOICE_MODEL", "voice_model/en_US-lessac-medium.onnx")
                .into(),
            whisper_model: std::env::var("WHISPER_MODEL").ok().map(PathBuf::from),
            search_endpoint: std::env::var("SEARCH_ENDPOINT").ok(),
            upload_dir: env_or("UPLOAD_DIR", "uploads").into(),
            report_dir: env_or("REPORT_DIR", "reports").into(),
            port: env_or("PORT", "5000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
