//! Generative model client
//!
//! The narrow boundary between the ranking adapter and the outside world:
//! one prompt in, one reply out. The adapter owns all interpretation of the
//! reply; the client may fail freely.

use std::time::Duration;

use serde::Deserialize;

/// A remote generative model
pub trait GenerativeClient: Send + Sync {
    /// Send one prompt and return the raw reply
    fn generate(&self, prompt: &str, temperature: f64) -> anyhow::Result<OracleResponse>;
}

/// Raw reply from the generative model
///
/// Mirrors the Gemini `generateContent` wire shape; text may live either at
/// the top level or nested inside candidate parts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OracleResponse {
    /// Convenience top-level text, when the backend provides one
    #[serde(default)]
    pub text: Option<String>,

    /// Generation candidates
    #[serde(default)]
    pub candidates: Vec<OracleCandidate>,
}

/// One generation candidate
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OracleCandidate {
    /// Candidate content
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

/// Content of a candidate
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    /// Content parts
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

/// One part of candidate content
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentPart {
    /// Text payload of this part
    #[serde(default)]
    pub text: Option<String>,
}

impl OracleResponse {
    /// Build a reply carrying plain text (handy for tests and stubs)
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            candidates: Vec::new(),
        }
    }
}

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Single request timeout; a timeout is treated like any other failure
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking HTTP client for the Gemini `generateContent` API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client for the given model and API key
    #[must_use]
    pub fn new(model: &str, api_key: &str) -> Self {
        Self {
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

impl GenerativeClient for GeminiClient {
    fn generate(&self, prompt: &str, temperature: f64) -> anyhow::Result<OracleResponse> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let url = format!("{GEMINI_ENDPOINT}/{}:generateContent", self.model);
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "temperature": temperature },
        });

        let response = http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()?
            .error_for_status()?;

        Ok(response.json::<OracleResponse>()?)
    }
}
