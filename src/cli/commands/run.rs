//! `trackr run` - full pipeline

use std::path::Path;

use trackr::api::{self, WorkflowRequest};
use trackr::config::Config;
use trackr::output::{render_workflow, OutputMode};
use trackr::workflow::Pipeline;

use super::read_markup;

/// Scrape, rank and persist in one go
pub fn run(
    source: &str,
    html_file: Option<&Path>,
    mode: &str,
    prompt: &str,
    output: OutputMode,
) -> anyhow::Result<()> {
    let raw_html = read_markup(html_file)?;
    let pipeline = Pipeline::from_config(&Config::load());

    let request = WorkflowRequest {
        source_url: source.to_string(),
        raw_html,
        mode: mode.to_string(),
        custom_prompt: prompt.to_string(),
    };

    let result = api::run_workflow(&pipeline, &request)?;
    render_workflow(&result, output);
    Ok(())
}
