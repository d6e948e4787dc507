//! Speech-to-text: recorded answer file in, transcribed text out.
//!
//! The answer recording is single-use: `transcribe_audio_file` removes the
//! input file on every exit path, success or failure.

pub mod transcriber;
pub mod whisper;

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

pub use transcriber::{MockTranscriber, Transcriber};
pub use whisper::{WhisperConfig, WhisperTranscriber};

/// Sample rate every engine input is normalized to.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

#[derive(Debug, Error)]
pub enum SttError {
    #[error("could not understand the audio")]
    Unintelligible,

    #[error("transcription engine error: {message}")]
    Engine { message: String },

    #[error("invalid audio input: {message}")]
    BadInput { message: String },

    #[error("audio file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Transcribes a recorded WAV answer and deletes the recording.
///
/// Loading and inference both run on the blocking pool; the caller's turn
/// loop stays on the async runtime.
pub async fn transcribe_audio_file(
    transcriber: Arc<dyn Transcriber>,
    path: &Path,
) -> Result<String, SttError> {
    let owned_path = path.to_path_buf();
    let result = tokio::task::spawn_blocking(move || -> Result<String, SttError> {
        let samples = load_wav_mono_16k(&owned_path)?;
        transcriber.transcribe(&samples)
    })
    .await
    .map_err(|e| SttError::Engine {
        message: format!("transcription task panicked: {e}"),
    });

    // The recording is consumed either way.
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("failed to remove answer recording {}: {e}", path.display());
        }
    }

    let text = result??;
    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(SttError::Unintelligible);
    }
    Ok(text)
}

/// Loads a whole WAV file as 16-bit PCM, downmixed to mono and resampled
/// to 16 kHz.
fn load_wav_mono_16k(path: &Path) -> Result<Vec<i16>, SttError> {
    let mut reader = hound::WavReader::open(path).map_err(|e| match e {
        hound::Error::IoError(io) => SttError::Io(io),
        other => SttError::BadInput {
            message: other.to_string(),
        },
    })?;

    let spec = reader.spec();
    if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(SttError::BadInput {
            message: format!(
                "expected 16-bit PCM, got {}-bit {:?}",
                spec.bits_per_sample, spec.sample_format
            ),
        });
    }

    let raw: Vec<i16> = reader
        .samples::<i16>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| SttError::BadInput {
            message: format!("failed to read WAV samples: {e}"),
        })?;

    let mono = match spec.channels {
        1 => raw,
        2 => raw
            .chunks_exact(2)
            .map(|frame| ((frame[0] as i32 + frame[1] as i32) / 2) as i16)
            .collect(),
        n => {
            return Err(SttError::BadInput {
                message: format!("unsupported channel count: {n}"),
            })
        }
    };

    Ok(resample(&mono, spec.sample_rate, TARGET_SAMPLE_RATE))
}

/// Linear-interpolation resampler. Good enough for speech input.
fn resample(samples: &[i16], from_rate: u32, to_rate: u32) -> Vec<i16> {
    if from_rate == to_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let output_len = (samples.len() as f64 / ratio).ceil() as usize;

    (0..output_len)
        .map(|i| {
            let source_pos = i as f64 * ratio;
            let source_idx = source_pos.floor() as usize;
            let fraction = source_pos - source_idx as f64;

            if source_idx + 1 >= samples.len() {
                samples[samples.len() - 1]
            } else {
                let left = samples[source_idx] as f64;
                let right = samples[source_idx + 1] as f64;
                (left + (right - left) * fraction) as i16
            }
        })
        .collect()
}
