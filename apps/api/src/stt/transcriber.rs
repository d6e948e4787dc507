use crate::stt::SttError;

/// Speech-to-text engine abstraction.
///
/// Implementations receive 16-bit PCM at 16 kHz mono and return the
/// transcribed text. Swappable so tests run against a mock instead of a
/// real Whisper model.
pub trait Transcriber: Send + Sync {
    fn transcribe(&self, audio: &[i16]) -> Result<String, SttError>;

    /// Name of the loaded model, for logging.
    fn model_name(&self) -> &str;

    fn is_ready(&self) -> bool;
}

/// Mock transcriber for tests.
#[derive(Debug, Clone)]
pub struct MockTranscriber {
    response: String,
    should_fail: bool,
}

impl MockTranscriber {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            should_fail: false,
        }
    }

    /// Configure the mock to fail on transcribe.
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

impl Transcriber for MockTranscriber {
    fn transcribe(&self, _audio: &[i16]) -> Result<String, SttError> {
        if self.should_fail {
            Err(SttError::Engine {
                message: "mock transcription failure".to_string(),
            })
        } else {
            Ok(self.response.clone())
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }

    fn is_ready(&self) -> bool {
        !self.should_fail
    }
}
