//! Oracle-backed ranking adapter
//!
//! Wraps one generative call per ranking request. Anything that goes wrong
//! below this type's surface (network, missing text, unparseable JSON) is
//! caught here and converted into a heuristic-scored fallback result; the
//! caller never sees an error. Partial oracle output is not a failure: the
//! normalizer heals it and the result still counts as oracle-ranked.

use serde_json::Value;

use crate::models::RankableTask;

use super::client::{GeminiClient, GenerativeClient, OracleResponse};
use super::heuristic::heuristic_rate;
use super::normalize::normalize_rated;
use super::prompt::build_priority_prompt;
use super::{RankingResult, TaskRanker, HEURISTIC_SUMMARY};

/// Ranking backend that consults a live generative model
pub struct LlmRanker {
    client: Box<dyn GenerativeClient>,
    provider: String,
    model: String,
}

impl std::fmt::Debug for LlmRanker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmRanker")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl LlmRanker {
    /// Create a ranker over any generative client
    #[must_use]
    pub fn new(provider: &str, model: &str, client: Box<dyn GenerativeClient>) -> Self {
        Self {
            client,
            provider: provider.to_string(),
            model: model.to_string(),
        }
    }

    /// Create a Gemini-backed ranker
    #[must_use]
    pub fn gemini(model: &str, api_key: &str) -> Self {
        Self::new("gemini", model, Box::new(GeminiClient::new(model, api_key)))
    }

    /// One live invocation: call, extract text, recover JSON, normalize
    fn try_live(
        &self,
        prompt: &str,
        temperature: f64,
        tasks: &[RankableTask],
    ) -> anyhow::Result<super::NormalizedRanking> {
        let response = self.client.generate(prompt, temperature)?;
        let text = extract_text(&response)?;
        let payload = parse_json_from_text(&text)?;
        Ok(normalize_rated(&payload, tasks))
    }
}

impl TaskRanker for LlmRanker {
    fn rate_tasks(
        &self,
        tasks: &[RankableTask],
        custom_prompt: &str,
        temperature: f64,
    ) -> RankingResult {
        if tasks.is_empty() {
            return RankingResult::no_tasks(
                &self.provider,
                &self.model,
                custom_prompt,
                temperature,
            );
        }

        let prompt = build_priority_prompt(tasks, custom_prompt);

        match self.try_live(&prompt, temperature, tasks) {
            Ok(normalized) => RankingResult {
                provider: self.provider.clone(),
                model: self.model.clone(),
                fallback: false,
                summary: normalized.summary,
                fallback_reason: None,
                rated_tasks: normalized.rated_tasks,
                prompt_used: custom_prompt.to_string(),
                temperature,
            },
            Err(err) => {
                log::warn!("oracle ranking failed, using heuristic fallback: {err:#}");
                RankingResult {
                    provider: self.provider.clone(),
                    model: self.model.clone(),
                    fallback: true,
                    summary: HEURISTIC_SUMMARY.to_string(),
                    fallback_reason: Some(err.to_string()),
                    rated_tasks: heuristic_rate(tasks),
                    prompt_used: custom_prompt.to_string(),
                    temperature,
                }
            },
        }
    }
}

/// Locate text content anywhere in the reply
///
/// Absence of text counts as an oracle failure.
fn extract_text(response: &OracleResponse) -> anyhow::Result<String> {
    if let Some(text) = &response.text {
        if !text.trim().is_empty() {
            return Ok(text.trim().to_string());
        }
    }

    for candidate in &response.candidates {
        let Some(content) = &candidate.content else {
            continue;
        };
        for part in &content.parts {
            if let Some(text) = &part.text {
                if !text.trim().is_empty() {
                    return Ok(text.trim().to_string());
                }
            }
        }
    }

    anyhow::bail!("oracle response did not contain text output")
}

/// Recover a JSON value from oracle text
///
/// Strips a fenced code block if present, tries a direct parse, then falls
/// back to the first balanced `{...}` or `[...]` span.
fn parse_json_from_text(text: &str) -> anyhow::Result<Value> {
    let cleaned = strip_code_fence(text);

    if let Ok(value) = serde_json::from_str::<Value>(&cleaned) {
        return Ok(value);
    }

    let span = balanced_span(&cleaned)
        .ok_or_else(|| anyhow::anyhow!("oracle output is not valid JSON"))?;
    Ok(serde_json::from_str(span)?)
}

/// Remove a ``` fence wrapper, with or without a `json` language tag
fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    let inner = trimmed.trim_start_matches('`');
    let inner = match inner.split_once('\n') {
        Some((first, rest))
            if first.trim().eq_ignore_ascii_case("json") || first.trim().is_empty() =>
        {
            rest
        },
        _ => inner,
    };

    inner.trim_end().trim_end_matches('`').trim().to_string()
}

/// First balanced `{...}` or `[...]` span in `text`
///
/// Tracks nesting with a bracket stack and skips over JSON string literals
/// so braces inside strings don't end the span early.
fn balanced_span(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let start = bytes.iter().position(|&b| b == b'{' || b == b'[')?;

    let mut stack: Vec<u8> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => stack.push(b'}'),
            b'[' => stack.push(b']'),
            b'}' | b']' => {
                if stack.pop() != Some(byte) {
                    return None;
                }
                if stack.is_empty() {
                    return Some(&text[start..=start + offset]);
                }
            },
            _ => {},
        }
    }
    None
}
