//! `trackr rate` - rank tasks from a JSON file

use std::fs;
use std::path::Path;

use trackr::api::{self, RateRequest};
use trackr::config::Config;
use trackr::models::RankableTask;
use trackr::output::{render_ranking, OutputMode};
use trackr::workflow::Pipeline;

/// Rank a caller-supplied task list without persisting
pub fn rate(
    tasks_file: &Path,
    prompt: &str,
    temperature: f64,
    output: OutputMode,
) -> anyhow::Result<()> {
    let content = fs::read_to_string(tasks_file)?;
    let tasks: Vec<RankableTask> = serde_json::from_str(&content)?;

    let pipeline = Pipeline::from_config(&Config::load());
    let request = RateRequest {
        tasks,
        custom_prompt: prompt.to_string(),
        temperature,
    };

    let result = api::rate(&pipeline, &request)?;
    render_ranking(&result, output);
    Ok(())
}
