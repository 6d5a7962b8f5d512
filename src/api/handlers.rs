//! Pure API handlers
//!
//! HTTP-agnostic: typed input in, `Result<T, ApiError>` out. Caller input
//! is validated here, before any pipeline stage executes; a validation
//! failure performs no partial work.

use crate::ranking::RankingResult;
use crate::storage::{JobStore, TaskStore};
use crate::workflow::{Pipeline, ScrapeResult, WorkflowResult};

use super::error::ApiError;
use super::types::{
    HealthData, JobsData, RateRequest, ScrapeRequest, TasksData, WorkflowRequest,
};

/// Parse and validate a scrape mode string
fn parse_mode(raw: &str) -> Result<crate::fetch::ScrapeMode, ApiError> {
    raw.parse().map_err(ApiError::bad_request)
}

/// Validate a sampling temperature
fn validate_temperature(temperature: f64) -> Result<(), ApiError> {
    if (0.0..=1.0).contains(&temperature) {
        Ok(())
    } else {
        Err(ApiError::bad_request(format!(
            "Temperature must be in [0, 1], got {temperature}"
        )))
    }
}

/// Validate caller-supplied tasks
fn validate_tasks(tasks: &[crate::models::RankableTask]) -> Result<(), ApiError> {
    for task in tasks {
        if task.id.trim().is_empty() {
            return Err(ApiError::bad_request("Task id cannot be empty"));
        }
        if task.title.trim().is_empty() {
            return Err(ApiError::bad_request(format!(
                "Task '{}' has an empty title",
                task.id
            )));
        }
        if !(0..=100).contains(&task.module_weight_percent) {
            return Err(ApiError::bad_request(format!(
                "Task '{}': module_weight_percent must be in [0, 100]",
                task.id
            )));
        }
        if task.estimated_hours < 0 {
            return Err(ApiError::bad_request(format!(
                "Task '{}': estimated_hours must be >= 0",
                task.id
            )));
        }
    }
    Ok(())
}

/// Scrape a source (or inline markup) into assignments
pub fn scrape(pipeline: &Pipeline, req: &ScrapeRequest) -> Result<ScrapeResult, ApiError> {
    let mode = parse_mode(&req.mode)?;
    Ok(pipeline.scrape(&req.source_url, &req.raw_html, mode))
}

/// Rank caller-supplied tasks
pub fn rate(pipeline: &Pipeline, req: &RateRequest) -> Result<RankingResult, ApiError> {
    validate_temperature(req.temperature)?;
    validate_tasks(&req.tasks)?;
    Ok(pipeline.rate(&req.tasks, &req.custom_prompt, req.temperature))
}

/// Run the full parse -> rank -> persist pipeline
pub fn run_workflow(pipeline: &Pipeline, req: &WorkflowRequest) -> Result<WorkflowResult, ApiError> {
    let mode = parse_mode(&req.mode)?;
    Ok(pipeline.run(&req.source_url, &req.raw_html, mode, &req.custom_prompt)?)
}

/// List stored jobs
pub fn list_jobs(store: &dyn JobStore, limit: usize) -> Result<JobsData, ApiError> {
    Ok(JobsData {
        jobs: store.list(limit)?,
    })
}

/// List stored tasks
pub fn list_tasks(store: &dyn TaskStore, limit: usize) -> Result<TasksData, ApiError> {
    Ok(TasksData {
        tasks: store.list(limit)?,
    })
}

/// Report service health and store counts
pub fn health(job_store: &dyn JobStore, task_store: &dyn TaskStore) -> Result<HealthData, ApiError> {
    Ok(HealthData {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        jobs_stored: job_store.list(usize::MAX)?.len(),
        tasks_stored: task_store.list(usize::MAX)?.len(),
    })
}
