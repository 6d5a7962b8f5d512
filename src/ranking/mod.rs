//! Task ranking
//!
//! Two interchangeable implementations of the same capability sit behind
//! [`TaskRanker`]: an oracle-backed ranker that calls a generative model and
//! heals its output, and a deterministic heuristic ranker. Which one a
//! deployment gets is decided once, at construction, from config.

mod client;
mod heuristic;
mod normalize;
mod oracle;
mod prompt;

pub use client::{
    CandidateContent, ContentPart, GeminiClient, GenerativeClient, OracleCandidate, OracleResponse,
};
pub use heuristic::{heuristic_rate, heuristic_rate_at, HeuristicRanker};
pub use normalize::{normalize_rated, normalize_rated_at, NormalizedRanking};
pub use oracle::LlmRanker;
pub use prompt::build_priority_prompt;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::models::{RankableTask, RatedTask};

/// Fallback reason reported when the input task list is empty
pub const NO_TASKS_REASON: &str = "NO_TASKS";

/// Summary reported whenever the heuristic produced the scores
pub const HEURISTIC_SUMMARY: &str = "Heuristic fallback mode used";

/// Outcome of one ranking call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingResult {
    /// Which ranking backend produced this ("gemini" or "heuristic")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// True when the heuristic produced the scores instead of the oracle
    pub fallback: bool,

    /// Short human-readable summary
    pub summary: String,

    /// Why fallback was used, when it was
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,

    /// Exactly one rated task per input task, score-descending
    pub rated_tasks: Vec<RatedTask>,

    /// Custom instruction the caller supplied (may be empty)
    #[serde(default)]
    pub prompt_used: String,

    /// Sampling temperature requested
    #[serde(default)]
    pub temperature: f64,
}

impl RankingResult {
    /// Result for an empty input list: no oracle call is ever attempted
    #[must_use]
    pub fn no_tasks(provider: &str, model: &str, custom_prompt: &str, temperature: f64) -> Self {
        Self {
            provider: provider.to_string(),
            model: model.to_string(),
            fallback: true,
            summary: "No tasks were provided".to_string(),
            fallback_reason: Some(NO_TASKS_REASON.to_string()),
            rated_tasks: Vec::new(),
            prompt_used: custom_prompt.to_string(),
            temperature,
        }
    }
}

/// A ranking backend
///
/// Implementations never fail and never panic: any internal problem is
/// absorbed and surfaced through the `fallback`/`fallback_reason` fields of
/// the result. The output always contains exactly one rated task per input
/// task.
pub trait TaskRanker: Send + Sync {
    /// Rate the given tasks
    fn rate_tasks(
        &self,
        tasks: &[RankableTask],
        custom_prompt: &str,
        temperature: f64,
    ) -> RankingResult;
}

/// Pick the ranking backend for this deployment
///
/// Live ranking requires both the live flag and a non-blank API key;
/// anything less gets the heuristic-only ranker.
#[must_use]
pub fn select_ranker(config: &Config) -> Box<dyn TaskRanker> {
    if config.enable_live_llm && !config.gemini_api_key.trim().is_empty() {
        Box::new(LlmRanker::gemini(&config.llm_model, &config.gemini_api_key))
    } else {
        log::info!("live LLM disabled or unconfigured; using heuristic ranker");
        Box::new(HeuristicRanker::default())
    }
}
