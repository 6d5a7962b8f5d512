//! API request and response types

use serde::{Deserialize, Serialize};

use crate::models::RankableTask;
use crate::storage::{JobRecord, TaskRecord};
use crate::workflow::DEFAULT_TEMPERATURE;

use super::error::{ApiError, ApiErrorData};

fn default_mode() -> String {
    "http".to_string()
}

const fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

/// Request body for `POST /api/scrape`
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeRequest {
    /// Source URL to fetch (may be blank)
    #[serde(default)]
    pub source_url: String,

    /// Retrieval mode: `http` or `browser`
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Inline markup; when set, no fetch happens
    #[serde(default)]
    pub raw_html: String,
}

/// Request body for `POST /api/rate`
#[derive(Debug, Clone, Deserialize)]
pub struct RateRequest {
    /// Tasks to rank
    pub tasks: Vec<RankableTask>,

    /// Custom instruction for the oracle (blank uses the default)
    #[serde(default)]
    pub custom_prompt: String,

    /// Sampling temperature, must be in [0, 1]
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

/// Request body for `POST /api/workflow`
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowRequest {
    /// Source URL to fetch (may be blank)
    #[serde(default)]
    pub source_url: String,

    /// Inline markup; when set, no fetch happens
    #[serde(default)]
    pub raw_html: String,

    /// Retrieval mode: `http` or `browser`
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Custom instruction for the oracle
    #[serde(default)]
    pub custom_prompt: String,
}

/// Health endpoint payload
#[derive(Debug, Serialize)]
pub struct HealthData {
    /// Always "ok" when the handler answers
    pub status: String,
    /// Crate version
    pub version: String,
    /// Jobs currently stored
    pub jobs_stored: usize,
    /// Tasks currently stored
    pub tasks_stored: usize,
}

/// Job list payload
#[derive(Debug, Serialize)]
pub struct JobsData {
    /// Stored jobs, creation time descending
    pub jobs: Vec<JobRecord>,
}

/// Task list payload
#[derive(Debug, Serialize)]
pub struct TasksData {
    /// Stored tasks, priority descending
    pub tasks: Vec<TaskRecord>,
}

/// Uniform JSON envelope: `{ok, data}` on success, `{ok, error}` on failure
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request succeeded
    pub ok: bool,

    /// Payload, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Error details, present on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorData>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Success envelope
    #[must_use]
    pub fn success(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failure envelope
    #[must_use]
    pub fn failure(err: &ApiError) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(ApiErrorData::from(err)),
        }
    }
}
