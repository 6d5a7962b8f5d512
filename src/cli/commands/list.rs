//! `trackr jobs` / `trackr tasks` - list stored records

use trackr::api;
use trackr::config::Config;
use trackr::output::{render_jobs, render_tasks, OutputMode};
use trackr::storage::{FileJobStore, FileTaskStore};

/// List stored jobs, newest first
pub fn jobs(limit: usize, output: OutputMode) -> anyhow::Result<()> {
    let config = Config::load();
    let store = FileJobStore::new(&config.data_dir);
    let data = api::list_jobs(&store, limit)?;
    render_jobs(&data.jobs, output);
    Ok(())
}

/// List stored tasks, highest priority first
pub fn tasks(limit: usize, output: OutputMode) -> anyhow::Result<()> {
    let config = Config::load();
    let store = FileTaskStore::new(&config.data_dir);
    let data = api::list_tasks(&store, limit)?;
    render_tasks(&data.tasks, output);
    Ok(())
}
