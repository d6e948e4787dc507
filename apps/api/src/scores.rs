//! Extraction of the numeric sub-scores from free-text answer evaluations.
//!
//! The evaluation prompt demands three labeled lines of the form
//! `Category: [SCORE]/10`. This module turns that free text into a
//! `ScoreSet`, defaulting unparsed categories to 0. Values are deliberately
//! not clamped; a model that writes `99/10` is reported as 99.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// The three fixed evaluation categories, scored 0-10 each.
/// Missing categories stay at the default of 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScoreSet {
    pub accuracy: u32,
    pub relevance: u32,
    pub structure: u32,
}

impl ScoreSet {
    /// Radar-chart axis labels, in the fixed category order.
    pub const AXIS_LABELS: [&'static str; 3] = [
        "Factual Accuracy",
        "Relevance & Directness",
        "Structure & Clarity",
    ];

    pub fn as_array(&self) -> [u32; 3] {
        [self.accuracy, self.relevance, self.structure]
    }

    /// Per-category averages across a list of turns. Empty input averages
    /// to all zeros.
    pub fn average(sets: &[ScoreSet]) -> [f64; 3] {
        if sets.is_empty() {
            return [0.0; 3];
        }
        let mut sums = [0.0f64; 3];
        for set in sets {
            for (sum, value) in sums.iter_mut().zip(set.as_array()) {
                *sum += value as f64;
            }
        }
        sums.map(|s| s / sets.len() as f64)
    }
}

/// Case-insensitive match on `<label>: [<1-2 digits>]/10` with optional
/// brackets. The trailing `/10` is required.
fn score_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)(Factual Accuracy|Relevance & Directness|Structure & Clarity \(STAR Method\)):\s*\[?(\d{1,2})\]?/10",
        )
        .expect("score pattern is valid")
    })
}

/// Scans evaluation text for the three category scores.
///
/// When a category label appears more than once, the last occurrence wins.
/// That mirrors the documented behavior of the evaluation format and is
/// relied on by tests; do not change it to first-match-wins.
pub fn parse_scores(evaluation_text: &str) -> ScoreSet {
    let mut scores = ScoreSet::default();

    for caps in score_pattern().captures_iter(evaluation_text) {
        // Two digits at most, so this always fits in u32.
        let value: u32 = caps[2].parse().unwrap_or(0);
        let label = caps[1].to_ascii_lowercase();
        if label.starts_with("factual") {
            scores.accuracy = value;
        } else if label.starts_with("relevance") {
            scores.relevance = value;
        } else {
            scores.structure = value;
        }
    }

    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_three_categories() {
        let text = "**1. Score Breakdown**\n\
                    - Factual Accuracy: 7/10\n\
                    - Relevance & Directness: [9]/10\n\
                    - Structure & Clarity (STAR Method): 5/10\n\
                    **2. Strengths** ...";
        let scores = parse_scores(text);
        assert_eq!(scores.as_array(), [7, 9, 5]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let text = "factual accuracy: 6/10\nRELEVANCE & DIRECTNESS: 8/10";
        let scores = parse_scores(text);
        assert_eq!(scores.accuracy, 6);
        assert_eq!(scores.relevance, 8);
    }

    #[test]
    fn missing_categories_default_to_zero() {
        let scores = parse_scores("Factual Accuracy: 4/10\nno other scores here");
        assert_eq!(scores.as_array(), [4, 0, 0]);
    }

    #[test]
    fn absent_scores_do_not_fail() {
        assert_eq!(parse_scores("no scores at all"), ScoreSet::default());
        assert_eq!(parse_scores(""), ScoreSet::default());
    }

    #[test]
    fn duplicate_labels_keep_the_last_match() {
        let text = "Factual Accuracy: 3/10\nFactual Accuracy: 8/10";
        assert_eq!(parse_scores(text).accuracy, 8);
    }

    #[test]
    fn values_are_not_clamped() {
        let scores = parse_scores("Factual Accuracy: 99/10");
        assert_eq!(scores.accuracy, 99);
    }

    #[test]
    fn trailing_slash_ten_is_required() {
        let scores = parse_scores("Factual Accuracy: 7");
        assert_eq!(scores.accuracy, 0);
    }

    #[test]
    fn brackets_around_digits_are_optional_on_any_category() {
        let scores = parse_scores("Structure & Clarity (STAR Method): [10]/10");
        assert_eq!(scores.structure, 10);
    }

    #[test]
    fn averages_across_turns() {
        let turns = [
            ScoreSet { accuracy: 6, relevance: 8, structure: 4 },
            ScoreSet { accuracy: 8, relevance: 6, structure: 6 },
        ];
        assert_eq!(ScoreSet::average(&turns), [7.0, 7.0, 5.0]);
        assert_eq!(ScoreSet::average(&[]), [0.0, 0.0, 0.0]);
    }
}
