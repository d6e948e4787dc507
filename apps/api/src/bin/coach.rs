//! Turn-based interview practice at the terminal.
//!
//! Runs the same question/evaluation loop as the HTTP API, but drives it
//! interactively: answers are typed, or transcribed from a WAV recording
//! when a line starts with `@`. With `--speak`, each question is also
//! synthesized to a WAV file via piper.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use parley::config::{Config, INTERVIEW_TYPES};
use parley::llm_client::LlmClient;
use parley::report::generate_report;
use parley::scores::ScoreSet;
use parley::session::{InterviewSession, TurnOutcome};
use parley::stt::{self, Transcriber, WhisperConfig, WhisperTranscriber};
use parley::tts::SpeechSynthesizer;

#[derive(Parser, Debug)]
#[command(name = "coach", about = "Practice an interview against an AI coach")]
struct Args {
    /// Resume or CV to ground the questions in (.pdf or .docx).
    #[arg(long)]
    document: PathBuf,

    /// Candidate name, used on the report.
    #[arg(long, default_value = "User")]
    name: String,

    /// Interview format to simulate.
    #[arg(long, default_value = "Technical")]
    interview_type: String,

    /// How many questions to ask.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=10))]
    questions: u8,

    /// Synthesize each question to a WAV file via piper.
    #[arg(long)]
    speak: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if !INTERVIEW_TYPES.contains(&args.interview_type.as_str()) {
        bail!(
            "unknown interview type '{}'; expected one of: {}",
            args.interview_type,
            INTERVIEW_TYPES.join(", ")
        );
    }

    let llm = LlmClient::new(config.gemini_api_key.clone());
    let synthesizer = args
        .speak
        .then(|| SpeechSynthesizer::new(config.piper_voice_model.clone(), "tts_out".into()));
    let transcriber: Option<Arc<dyn Transcriber>> = match &config.whisper_model {
        Some(model) => Some(Arc::new(WhisperTranscriber::new(WhisperConfig::new(
            model.clone(),
        ))?)),
        None => None,
    };

    println!(
        "Starting a {} interview for {} ({} questions).\n",
        args.interview_type, args.name, args.questions
    );

    let mut session = InterviewSession::begin(
        &llm,
        &args.interview_type,
        &args.document,
        &args.name,
        args.questions as usize,
    )
    .await?;

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();

    while let Some(question) = session.next_question(&llm).await? {
        println!("Q{}: {question}\n", session.turns.len() + 1);
        if let Some(synth) = &synthesizer {
            match synth.synthesize(&question).await {
                Ok(path) => println!("  [audio: {}]", path.display()),
                Err(e) => eprintln!("  [speech synthesis failed: {e}]"),
            }
        }

        let answer = loop {
            println!("Your answer (or @path/to/recording.wav; the recording is removed after transcription):");
            let line = stdin
                .next_line()
                .await?
                .context("stdin closed before the interview finished")?;
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }

            if let Some(audio_path) = line.strip_prefix('@') {
                let Some(transcriber) = &transcriber else {
                    eprintln!("  [set WHISPER_MODEL to answer by recording]");
                    continue;
                };
                match stt::transcribe_audio_file(Arc::clone(transcriber), audio_path.as_ref())
                    .await
                {
                    Ok(text) => {
                        println!("  [transcribed: {text}]");
                        break text;
                    }
                    Err(e) => {
                        eprintln!("  [transcription failed: {e}]");
                        continue;
                    }
                }
            }
            break line;
        };

        let outcome = session.record_answer(&llm, &answer).await?;
        let turn = session
            .turns
            .last()
            .context("recorded answer left no turn")?;
        println!("\n--- Evaluation ---\n{}\n", turn.evaluation);
        print_scores(&turn.scores);

        if matches!(outcome, TurnOutcome::Finished) {
            break;
        }
    }

    println!("\nInterview complete. Generating holistic feedback...\n");
    let feedback = llm.holistic_feedback(&session.interview_log()).await?;
    println!("{feedback}\n");

    let report_dir = config.report_dir.clone();
    let path = tokio::task::spawn_blocking(move || -> Result<PathBuf> {
        // session moved in; report assembly is pure file work
        Ok(generate_report(&session, &feedback, &report_dir)?)
    })
    .await??;
    println!("Report saved to {}", path.display());

    Ok(())
}

fn print_scores(scores: &ScoreSet) {
    for (label, value) in ScoreSet::AXIS_LABELS.iter().zip(scores.as_array()) {
        println!("  {label}: {value}/10");
    }
    println!();
}
