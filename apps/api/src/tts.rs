//! Text-to-speech via the `piper` synthesis binary.
//!
//! Piper is fed the prompt text on stdin and streams raw s16le samples at
//! 22.05 kHz mono on stdout (`--output-raw`); the samples are repackaged
//! into a playable WAV at a unique path. The whole subprocess interaction
//! is bounded by a timeout: expiry kills the child and fails the call with
//! `TtsError::Timeout` instead of blocking the interview turn.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;
use uuid::Uuid;

/// Piper's fixed output format: s16le, mono.
pub const PIPER_SAMPLE_RATE: u32 = 22_050;
const SYNTHESIS_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum TtsError {
    #[error("failed to launch synthesis process: {0}")]
    Spawn(std::io::Error),

    #[error("synthesis process I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("synthesis timed out after {0:?}")]
    Timeout(Duration),

    #[error("synthesis process exited with {status}")]
    Failed { status: std::process::ExitStatus },

    #[error("synthesis produced no audio")]
    EmptyOutput,

    #[error("failed to encode audio: {0}")]
    Encode(String),
}

pub struct SpeechSynthesizer {
    executable: String,
    voice_model: PathBuf,
    out_dir: PathBuf,
}

impl SpeechSynthesizer {
    pub fn new(voice_model: PathBuf, out_dir: PathBuf) -> Self {
        Self {
            executable: "piper".to_string(),
            voice_model,
            out_dir,
        }
    }

    /// Overrides the synthesis executable (tests point this at something
    /// that does not exist).
    pub fn with_executable(mut self, executable: &str) -> Self {
        self.executable = executable.to_string();
        self
    }

    /// Synthesizes `text` and returns the path of the playable WAV.
    pub async fn synthesize(&self, text: &str) -> Result<PathBuf, TtsError> {
        debug!("synthesizing {} chars of prompt audio", text.len());

        let mut child = Command::new(&self.executable)
            .arg("--model")
            .arg(&self.voice_model)
            .arg("--output-raw")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            // Dropping the future on timeout must not leave a piper around.
            .kill_on_drop(true)
            .spawn()
            .map_err(TtsError::Spawn)?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            TtsError::Spawn(std::io::Error::other("child stdin unavailable"))
        })?;
        let text_owned = text.to_string();

        let run = async move {
            stdin.write_all(text_owned.as_bytes()).await?;
            drop(stdin); // close stdin so piper finishes
            child.wait_with_output().await
        };

        let output = match tokio::time::timeout(SYNTHESIS_TIMEOUT, run).await {
            Ok(result) => result?,
            Err(_) => return Err(TtsError::Timeout(SYNTHESIS_TIMEOUT)),
        };

        if !output.status.success() {
            return Err(TtsError::Failed {
                status: output.status,
            });
        }
        if output.stdout.is_empty() {
            return Err(TtsError::EmptyOutput);
        }

        tokio::fs::create_dir_all(&self.out_dir).await?;
        let wav_path = self.out_dir.join(format!("prompt_{}.wav", Uuid::new_v4()));
        write_wav(&output.stdout, &wav_path)?;
        Ok(wav_path)
    }
}

/// Packs raw s16le mono samples into a WAV container.
fn write_wav(raw: &[u8], path: &Path) -> Result<(), TtsError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: PIPER_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer =
        hound::WavWriter::create(path, spec).map_err(|e| TtsError::Encode(e.to_string()))?;
    // chunks_exact drops a trailing odd byte, which can only come from a
    // truncated piper write.
    for frame in raw.chunks_exact(2) {
        let sample = i16::from_le_bytes([frame[0], frame[1]]);
        writer
            .write_sample(sample)
            .map_err(|e| TtsError::Encode(e.to_string()))?;
    }
    writer
        .finalize()
        .map_err(|e| TtsError::Encode(e.to_string()))?;
    Ok(())
}
