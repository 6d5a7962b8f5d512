//! HTTP-agnostic API layer
//!
//! Typed request/response structs and pure handlers. Handlers validate
//! caller input before any pipeline stage runs, then delegate to the
//! workflow; the `server` module adapts them to actual HTTP.

mod error;
mod handlers;
mod types;

pub use error::{ApiError, ApiErrorData};
pub use handlers::{health, list_jobs, list_tasks, rate, run_workflow, scrape};
pub use types::{
    ApiResponse, HealthData, JobsData, RateRequest, ScrapeRequest, TasksData, WorkflowRequest,
};
