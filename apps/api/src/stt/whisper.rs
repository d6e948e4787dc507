//! Whisper implementation of the `Transcriber` trait.
//!
//! Requires the `whisper` feature (and cmake to build whisper.cpp):
//!
//! ```bash
//! cargo build --features whisper
//! ```
//!
//! Without the feature this module compiles to a stub that errors on use,
//! so the rest of the crate (and the HTTP API, which never transcribes)
//! builds without the native toolchain.

use std::path::PathBuf;

use crate::stt::transcriber::Transcriber;
use crate::stt::SttError;

#[cfg(feature = "whisper")]
use std::sync::Mutex;
#[cfg(feature = "whisper")]
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

#[derive(Debug, Clone)]
pub struct WhisperConfig {
    /// Path to the ggml model file.
    pub model_path: PathBuf,
    /// Language code, e.g. "en".
    pub language: String,
    /// Inference threads (None = whisper.cpp default).
    pub threads: Option<usize>,
}

impl WhisperConfig {
    pub fn new(model_path: PathBuf) -> Self {
        Self {
            model_path,
            language: "en".to_string(),
            threads: None,
        }
    }
}

#[cfg(feature = "whisper")]
pub struct WhisperTranscriber {
    context: Mutex<WhisperContext>,
    config: WhisperConfig,
    model_name: String,
}

#[cfg(not(feature = "whisper"))]
#[derive(Debug)]
pub struct WhisperTranscriber {
    #[allow(dead_code)]
    config: WhisperConfig,
    model_name: String,
}

fn model_name_of(config: &WhisperConfig) -> String {
    config
        .model_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(feature = "whisper")]
impl WhisperTranscriber {
    pub fn new(config: WhisperConfig) -> Result<Self, SttError> {
        if !config.model_path.exists() {
            return Err(SttError::Engine {
                message: format!(
                    "whisper model not found: {}",
                    config.model_path.display()
                ),
            });
        }

        let model_name = model_name_of(&config);
        let path = config.model_path.to_str().ok_or_else(|| SttError::Engine {
            message: "invalid UTF-8 in whisper model path".to_string(),
        })?;

        let context = WhisperContext::new_with_params(path, WhisperContextParameters::default())
            .map_err(|e| SttError::Engine {
                message: format!("failed to load whisper model: {e}"),
            })?;

        Ok(Self {
            context: Mutex::new(context),
            config,
            model_name,
        })
    }
}

#[cfg(not(feature = "whisper"))]
impl WhisperTranscriber {
    pub fn new(config: WhisperConfig) -> Result<Self, SttError> {
        let model_name = model_name_of(&config);
        Ok(Self { config, model_name })
    }
}

#[cfg(feature = "whisper")]
impl Transcriber for WhisperTranscriber {
    fn transcribe(&self, audio: &[i16]) -> Result<String, SttError> {
        // Whisper expects f32 samples normalized to [-1.0, 1.0].
        let audio_f32: Vec<f32> = audio.iter().map(|&s| s as f32 / 32768.0).collect();

        let context = self.context.lock().map_err(|e| SttError::Engine {
            message: format!("failed to acquire whisper context lock: {e}"),
        })?;

        let mut state = context.create_state().map_err(|e| SttError::Engine {
            message: format!("failed to create whisper state: {e}"),
        })?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_language(Some(&self.config.language));
        if let Some(threads) = self.config.threads {
            params.set_n_threads(threads as i32);
        }
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);

        state.full(params, &audio_f32).map_err(|e| SttError::Engine {
            message: format!("whisper inference failed: {e}"),
        })?;

        let mut transcription = String::new();
        for segment in state.as_iter() {
            transcription.push_str(&segment.to_string());
        }

        Ok(transcription.trim().to_string())
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn is_ready(&self) -> bool {
        true
    }
}

#[cfg(not(feature = "whisper"))]
impl Transcriber for WhisperTranscriber {
    fn transcribe(&self, _audio: &[i16]) -> Result<String, SttError> {
        Err(SttError::Engine {
            message: "built without the `whisper` feature; rebuild with \
                      `cargo build --features whisper` for spoken answers"
                .to_string(),
        })
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn is_ready(&self) -> bool {
        false
    }
}
