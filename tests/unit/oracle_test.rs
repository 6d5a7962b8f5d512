//! Tests for the oracle-backed ranking adapter

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use trackr::ranking::{
    heuristic_rate, GenerativeClient, LlmRanker, OracleResponse, TaskRanker, HEURISTIC_SUMMARY,
};

use super::common::rankable;

/// Client that replies with canned text
struct CannedClient {
    text: String,
    calls: Arc<AtomicUsize>,
}

impl CannedClient {
    fn new(text: &str) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                text: text.to_string(),
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

impl GenerativeClient for CannedClient {
    fn generate(&self, _prompt: &str, _temperature: f64) -> anyhow::Result<OracleResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(OracleResponse::from_text(self.text.clone()))
    }
}

/// Client that always fails
struct DownClient;

impl GenerativeClient for DownClient {
    fn generate(&self, _prompt: &str, _temperature: f64) -> anyhow::Result<OracleResponse> {
        anyhow::bail!("connection refused")
    }
}

/// Client that replies with no text at all
struct SilentClient;

impl GenerativeClient for SilentClient {
    fn generate(&self, _prompt: &str, _temperature: f64) -> anyhow::Result<OracleResponse> {
        Ok(OracleResponse::default())
    }
}

fn ranker(client: Box<dyn GenerativeClient>) -> LlmRanker {
    LlmRanker::new("gemini", "gemini-2.0-flash", client)
}

// Undated tasks make heuristic output independent of the wall clock.
fn sample_tasks() -> Vec<trackr::models::RankableTask> {
    vec![
        rankable("task-1", "Math Coursework", None, 40, 5),
        rankable("task-2", "Business Essay", None, 30, 2),
    ]
}

#[test]
fn live_reply_is_normalized_without_fallback() {
    let reply = r#"{"summary": "Math first", "rated_tasks": [
        {"id": "task-1", "priority_score": 90, "reason": "exam weight"},
        {"id": "task-2", "priority_score": 40}
    ]}"#;
    let (client, _) = CannedClient::new(reply);
    let result = ranker(Box::new(client)).rate_tasks(&sample_tasks(), "", 0.2);

    assert!(!result.fallback);
    assert!(result.fallback_reason.is_none());
    assert_eq!(result.summary, "Math first");
    assert_eq!(result.rated_tasks.len(), 2);
    assert_eq!(result.rated_tasks[0].id, "task-1");
    assert_eq!(result.rated_tasks[0].priority_score, 90);
}

#[test]
fn fenced_reply_is_accepted() {
    let reply = "```json\n{\"rated_tasks\": [{\"id\": \"task-1\", \"priority_score\": 77}]}\n```";
    let (client, _) = CannedClient::new(reply);
    let result = ranker(Box::new(client)).rate_tasks(&sample_tasks(), "", 0.2);

    assert!(!result.fallback);
    let first = result
        .rated_tasks
        .iter()
        .find(|r| r.id == "task-1")
        .expect("task-1 present");
    assert_eq!(first.priority_score, 77);
}

#[test]
fn chatty_reply_with_embedded_json_is_accepted() {
    let reply = "Sure! Here are the rankings:\n\
                 {\"rated_tasks\": [{\"id\": \"task-2\", \"priority_score\": 61}]}\n\
                 Let me know if you need anything else.";
    let (client, _) = CannedClient::new(reply);
    let result = ranker(Box::new(client)).rate_tasks(&sample_tasks(), "", 0.2);

    assert!(!result.fallback);
    let second = result
        .rated_tasks
        .iter()
        .find(|r| r.id == "task-2")
        .expect("task-2 present");
    assert_eq!(second.priority_score, 61);
}

#[test]
fn partial_reply_still_counts_as_live() {
    // One id missing: normalization heals it, fallback stays false
    let reply = r#"{"rated_tasks": [{"id": "task-1", "priority_score": 85}]}"#;
    let (client, _) = CannedClient::new(reply);
    let result = ranker(Box::new(client)).rate_tasks(&sample_tasks(), "", 0.2);

    assert!(!result.fallback);
    assert_eq!(result.rated_tasks.len(), 2);
    assert!(result.rated_tasks.iter().any(|r| r.id == "task-2"));
}

#[test]
fn client_error_falls_back_to_heuristic_scores() {
    let tasks = sample_tasks();
    let result = ranker(Box::new(DownClient)).rate_tasks(&tasks, "", 0.2);

    assert!(result.fallback);
    assert_eq!(result.summary, HEURISTIC_SUMMARY);
    assert_eq!(result.fallback_reason.as_deref(), Some("connection refused"));

    let expected = heuristic_rate(&tasks);
    assert_eq!(result.rated_tasks.len(), expected.len());
    for (got, want) in result.rated_tasks.iter().zip(&expected) {
        assert_eq!(got.id, want.id);
        assert_eq!(got.priority_score, want.priority_score);
    }
}

#[test]
fn textless_reply_falls_back() {
    let result = ranker(Box::new(SilentClient)).rate_tasks(&sample_tasks(), "", 0.2);

    assert!(result.fallback);
    assert_eq!(
        result.fallback_reason.as_deref(),
        Some("oracle response did not contain text output")
    );
    assert_eq!(result.rated_tasks.len(), 2);
}

#[test]
fn unparseable_reply_falls_back() {
    let (client, _) = CannedClient::new("I cannot rank these tasks, sorry.");
    let result = ranker(Box::new(client)).rate_tasks(&sample_tasks(), "", 0.2);

    assert!(result.fallback);
    assert_eq!(
        result.fallback_reason.as_deref(),
        Some("oracle output is not valid JSON")
    );
    assert_eq!(result.rated_tasks.len(), 2);
}

#[test]
fn empty_input_never_invokes_the_client() {
    let (client, calls) = CannedClient::new("{}");
    let result = ranker(Box::new(client)).rate_tasks(&[], "prompt", 0.7);

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(result.fallback);
    assert_eq!(result.fallback_reason.as_deref(), Some("NO_TASKS"));
    assert!(result.rated_tasks.is_empty());
    assert_eq!(result.temperature, 0.7);
}

#[test]
fn echoes_prompt_and_temperature() {
    let reply = r#"{"rated_tasks": []}"#;
    let (client, calls) = CannedClient::new(reply);
    let result = ranker(Box::new(client)).rate_tasks(&sample_tasks(), "exams first", 0.9);

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(result.prompt_used, "exams first");
    assert_eq!(result.temperature, 0.9);
}
