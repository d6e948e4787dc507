//! Web search for expert example answers.
//!
//! Auxiliary capability: not wired into the interview flow. Queries a
//! SearxNG-compatible JSON endpoint and formats the top hits as labeled
//! snippets an LLM prompt can quote.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);
pub const NO_RESULTS_TEXT: &str = "No example answers found on the web.";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search provider returned status {status}")]
    Api { status: u16 },
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

pub struct SearchClient {
    client: Client,
    endpoint: String,
}

impl SearchClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(SEARCH_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
        }
    }

    /// Searches for expert sample answers to an interview question and
    /// formats up to `max_results` of them. Zero results is not an error;
    /// the caller gets a fixed "no results" text it can embed as-is.
    pub async fn example_answers(
        &self,
        question: &str,
        max_results: usize,
    ) -> Result<String, SearchError> {
        let query = format!("expert sample answer for interview question: \"{question}\"");
        debug!("searching for example answers: {query}");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query.as_str()), ("format", "json")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Api {
                status: status.as_u16(),
            });
        }

        let parsed: SearchResponse = response.json().await?;
        Ok(format_results(&parsed.results, max_results))
    }
}

fn format_results(results: &[SearchResult], max_results: usize) -> String {
    if results.is_empty() {
        return NO_RESULTS_TEXT.to_string();
    }

    results
        .iter()
        .take(max_results)
        .enumerate()
        .map(|(i, result)| {
            let title = if result.title.is_empty() { "N/A" } else { &result.title };
            let snippet = if result.content.is_empty() { "N/A" } else { &result.content };
            format!(
                "Example Answer Source {}:\nTitle: {}\nSnippet: {}\n",
                i + 1,
                title,
                snippet
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(title: &str, content: &str) -> SearchResult {
        SearchResult {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn formats_labeled_snippets_in_order() {
        let results = vec![
            result("STAR method guide", "Situation, Task, Action, Result..."),
            result("PM interview answers", "Start with the user problem..."),
        ];
        let formatted = format_results(&results, 2);

        assert!(formatted.starts_with("Example Answer Source 1:\nTitle: STAR method guide"));
        assert!(formatted.contains("Example Answer Source 2:\nTitle: PM interview answers"));
    }

    #[test]
    fn caps_at_max_results() {
        let results = vec![result("a", "1"), result("b", "2"), result("c", "3")];
        let formatted = format_results(&results, 2);
        assert!(!formatted.contains("Example Answer Source 3"));
    }

    #[test]
    fn empty_results_yield_the_no_results_text() {
        assert_eq!(format_results(&[], 2), NO_RESULTS_TEXT);
    }

    #[test]
    fn blank_fields_become_na() {
        let formatted = format_results(&[SearchResult::default()], 1);
        assert!(formatted.contains("Title: N/A"));
        assert!(formatted.contains("Snippet: N/A"));
    }
}
