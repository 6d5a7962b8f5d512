//! Command implementations

mod list;
mod rate;
mod run;
mod scrape;
mod serve;

pub use list::{jobs, tasks};
pub use rate::rate;
pub use run::run;
pub use scrape::scrape;
pub use serve::serve;

use std::fs;
use std::path::Path;

/// Resolve inline markup: read it from a file when one was given
pub(crate) fn read_markup(html_file: Option<&Path>) -> anyhow::Result<String> {
    match html_file {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => Ok(String::new()),
    }
}
