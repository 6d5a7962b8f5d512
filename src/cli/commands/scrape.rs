//! `trackr scrape` - extraction only

use std::path::Path;

use trackr::api::{self, ScrapeRequest};
use trackr::config::Config;
use trackr::output::{render_scrape, OutputMode};
use trackr::workflow::Pipeline;

use super::read_markup;

/// Extract assignments without ranking or persisting
pub fn scrape(
    source: &str,
    html_file: Option<&Path>,
    mode: &str,
    output: OutputMode,
) -> anyhow::Result<()> {
    let raw_html = read_markup(html_file)?;
    let pipeline = Pipeline::from_config(&Config::load());

    let request = ScrapeRequest {
        source_url: source.to_string(),
        mode: mode.to_string(),
        raw_html,
    };

    let result = api::scrape(&pipeline, &request)?;
    render_scrape(&result, output);
    Ok(())
}
