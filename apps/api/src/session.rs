//! Interview session state and turn orchestration.
//!
//! A session is owned by exactly one orchestrator (HTTP caller or the
//! `coach` CLI), mutated in place per turn, and dropped after the report.
//! There is no persistence and no shared global state.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::document::{self, ExtractError};
use crate::llm_client::{LlmClient, LlmError};
use crate::scores::{self, ScoreSet};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Extraction(#[from] ExtractError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("no active question; the interview is already finished")]
    NoActiveQuestion,
}

/// One question/answer/evaluation exchange. Immutable once appended.
#[derive(Debug, Clone)]
pub struct Turn {
    pub question: String,
    pub answer: String,
    pub evaluation: String,
    pub scores: ScoreSet,
}

/// What the orchestrator should do after a recorded answer.
#[derive(Debug)]
pub enum TurnOutcome {
    NextQuestion(String),
    Finished,
}

#[derive(Debug)]
pub struct InterviewSession {
    pub id: Uuid,
    pub interview_type: String,
    pub document_text: String,
    pub candidate_name: String,
    pub question_count: usize,
    /// The question currently awaiting an answer. `None` once the
    /// configured count has been reached.
    pub current_question: Option<String>,
    pub turns: Vec<Turn>,
    pub started_at: DateTime<Utc>,
}

impl InterviewSession {
    pub fn new(
        interview_type: &str,
        document_text: String,
        candidate_name: &str,
        question_count: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            interview_type: interview_type.to_string(),
            document_text,
            candidate_name: candidate_name.to_string(),
            question_count,
            current_question: None,
            turns: Vec::new(),
            started_at: Utc::now(),
        }
    }

    /// Starts a session from a resume/CV on disk: extracts the document
    /// text and generates the first question.
    pub async fn begin(
        llm: &LlmClient,
        interview_type: &str,
        document_path: &std::path::Path,
        candidate_name: &str,
        question_count: usize,
    ) -> Result<Self, SessionError> {
        let document_text = document::extract_text(document_path)?;
        let mut session = Self::new(interview_type, document_text, candidate_name, question_count);
        let first_question = llm
            .generate_question(&session.interview_type, &session.document_text)
            .await?;
        session.current_question = Some(first_question);
        Ok(session)
    }

    /// Evaluates the answer to the current question, records the turn, and
    /// either generates the next question or finishes the interview.
    ///
    /// Invariant: never generates a question past `question_count`; once
    /// `turns.len() == question_count` every further call fails with
    /// `NoActiveQuestion`.
    pub async fn record_answer(
        &mut self,
        llm: &LlmClient,
        answer: &str,
    ) -> Result<TurnOutcome, SessionError> {
        let question = self
            .current_question
            .clone()
            .ok_or(SessionError::NoActiveQuestion)?;

        let evaluation = llm.evaluate_answer(&question, answer).await?;
        if self.push_turn(question, answer, evaluation) {
            // The turn is already recorded; a generation failure here
            // leaves the session owing a question, and a later
            // `next_question` call regenerates it.
            match self.next_question(llm).await? {
                Some(next) => Ok(TurnOutcome::NextQuestion(next)),
                None => Ok(TurnOutcome::Finished),
            }
        } else {
            Ok(TurnOutcome::Finished)
        }
    }

    /// Returns the question awaiting an answer, generating one if the
    /// session owes a question but has none pending (for example after a
    /// transient LLM failure mid-interview). `None` once the interview is
    /// finished.
    pub async fn next_question(
        &mut self,
        llm: &LlmClient,
    ) -> Result<Option<String>, SessionError> {
        if self.is_finished() {
            return Ok(None);
        }
        if let Some(question) = &self.current_question {
            return Ok(Some(question.clone()));
        }
        let question = llm
            .generate_question(&self.interview_type, &self.document_text)
            .await?;
        self.current_question = Some(question.clone());
        Ok(Some(question))
    }

    /// Appends a finished exchange. Returns whether another question is
    /// still owed.
    fn push_turn(&mut self, question: String, answer: &str, evaluation: String) -> bool {
        let parsed = scores::parse_scores(&evaluation);
        self.turns.push(Turn {
            question,
            answer: answer.to_string(),
            evaluation,
            scores: parsed,
        });
        self.current_question = None;
        self.turns.len() < self.question_count
    }

    pub fn is_finished(&self) -> bool {
        self.turns.len() >= self.question_count
    }

    /// The concatenated Q&A log fed to holistic feedback.
    pub fn interview_log(&self) -> String {
        self.turns
            .iter()
            .enumerate()
            .map(|(i, turn)| format!("Q{}: {}\nA: {}\n---\n", i + 1, turn.question, turn.answer))
            .collect()
    }

    pub fn duration_minutes(&self) -> f64 {
        (Utc::now() - self.started_at).num_seconds() as f64 / 60.0
    }

    pub fn score_averages(&self) -> [f64; 3] {
        let sets: Vec<ScoreSet> = self.turns.iter().map(|t| t.scores).collect();
        ScoreSet::average(&sets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(count: usize) -> InterviewSession {
        InterviewSession::new("Technical", "5 years PM experience...".to_string(), "Ada", count)
    }

    #[test]
    fn push_turn_parses_scores_and_tracks_remaining_questions() {
        let mut session = session_with(2);
        session.current_question = Some("Q1".to_string());

        let more = session.push_turn(
            "Q1".to_string(),
            "my answer",
            "Factual Accuracy: 7/10\nRelevance & Directness: [9]/10\n\
             Structure & Clarity (STAR Method): 5/10"
                .to_string(),
        );

        assert!(more, "one of two questions answered; another is owed");
        assert_eq!(session.turns.len(), 1);
        assert_eq!(session.turns[0].scores.as_array(), [7, 9, 5]);
        assert!(session.current_question.is_none());
    }

    #[test]
    fn session_finishes_after_the_configured_count() {
        let mut session = session_with(2);
        for i in 0..2 {
            assert!(!session.is_finished());
            let more = session.push_turn(format!("Q{i}"), "answer", "eval".to_string());
            assert_eq!(more, i == 0);
        }
        assert!(session.is_finished());
        assert_eq!(session.turns.len(), session.question_count);
    }

    #[test]
    fn interview_log_numbers_each_exchange() {
        let mut session = session_with(2);
        session.push_turn("What is your biggest launch?".to_string(), "The payments redesign", "eval".to_string());
        session.push_turn("How did you measure it?".to_string(), "Conversion lift", "eval".to_string());

        let log = session.interview_log();
        assert_eq!(
            log,
            "Q1: What is your biggest launch?\nA: The payments redesign\n---\n\
             Q2: How did you measure it?\nA: Conversion lift\n---\n"
        );
    }

    #[test]
    fn score_averages_cover_all_turns() {
        let mut session = session_with(2);
        session.push_turn(
            "Q1".to_string(),
            "a",
            "Factual Accuracy: 6/10\nRelevance & Directness: 8/10\n\
             Structure & Clarity (STAR Method): 4/10"
                .to_string(),
        );
        session.push_turn(
            "Q2".to_string(),
            "b",
            "Factual Accuracy: 8/10\nRelevance & Directness: 6/10\n\
             Structure & Clarity (STAR Method): 6/10"
                .to_string(),
        );
        assert_eq!(session.score_averages(), [7.0, 7.0, 5.0]);
    }

    #[test]
    fn zero_turn_session_averages_to_zero() {
        assert_eq!(session_with(1).score_averages(), [0.0, 0.0, 0.0]);
    }

    #[tokio::test]
    async fn next_question_returns_the_pending_question_without_a_call() {
        // Never dialed: a pending question short-circuits the LLM.
        let llm = LlmClient::new("unused-key".to_string());
        let mut session = session_with(2);
        session.current_question = Some("Pending?".to_string());

        let question = session.next_question(&llm).await.unwrap();
        assert_eq!(question.as_deref(), Some("Pending?"));
    }

    #[tokio::test]
    async fn next_question_is_none_once_finished() {
        let llm = LlmClient::new("unused-key".to_string());
        let mut session = session_with(1);
        session.push_turn("Q1".to_string(), "answer", "eval".to_string());

        assert!(session.is_finished());
        assert!(session.next_question(&llm).await.unwrap().is_none());
    }
}
