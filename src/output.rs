//! Output formatting for human and JSON modes
//!
//! CLI commands render through here so every command supports both
//! human-readable text and machine-parseable JSON.

use colored::Colorize as _;
use serde::Serialize;

use crate::ranking::RankingResult;
use crate::storage::{JobRecord, TaskRecord};
use crate::workflow::{ScrapeResult, WorkflowResult};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("failed to serialize output: {err}"),
    }
}

/// Render a scrape result
pub fn render_scrape(result: &ScrapeResult, mode: OutputMode) {
    if mode == OutputMode::Json {
        print_json(result);
        return;
    }

    println!(
        "{} {} assignment(s) from {} ({})",
        "Scraped".green().bold(),
        result.assignment_count,
        result.source,
        result.mode
    );
    for assignment in &result.assignments {
        let due = assignment.due_at.as_deref().unwrap_or("-");
        println!(
            "  {} [{}] due {} weight {}% effort {}h",
            assignment.title.bold(),
            assignment.module,
            due,
            assignment.module_weight_percent,
            assignment.estimated_hours
        );
    }
}

/// Render a ranking result
pub fn render_ranking(result: &RankingResult, mode: OutputMode) {
    if mode == OutputMode::Json {
        print_json(result);
        return;
    }

    let source = if result.fallback {
        "heuristic".yellow()
    } else {
        result.provider.as_str().green()
    };
    println!("{} ({}): {}", "Ranked".bold(), source, result.summary);
    if let Some(reason) = &result.fallback_reason {
        println!("  {} {}", "fallback:".yellow(), reason);
    }
    for task in &result.rated_tasks {
        println!(
            "  {:>3}  {}  {} - {}",
            task.priority_score,
            format!("[{}]", task.priority_band).bold(),
            task.title,
            task.reason.dimmed()
        );
    }
}

/// Render a full workflow result
pub fn render_workflow(result: &WorkflowResult, mode: OutputMode) {
    if mode == OutputMode::Json {
        print_json(result);
        return;
    }

    render_scrape(&result.scrape, mode);
    render_ranking(&result.ranking, mode);
    println!(
        "{} {} job(s), {} task(s)",
        "Persisted".green().bold(),
        result.persisted_job_count,
        result.persisted_task_count
    );
}

/// Render stored jobs
pub fn render_jobs(jobs: &[JobRecord], mode: OutputMode) {
    if mode == OutputMode::Json {
        print_json(&jobs);
        return;
    }

    if jobs.is_empty() {
        println!("No jobs stored");
        return;
    }
    for job in jobs {
        let due = job.due_at.as_deref().unwrap_or("-");
        println!(
            "{}  {} [{}] due {} (updated {})",
            job.id.bold(),
            job.title,
            job.module,
            due,
            job.updated_at.dimmed()
        );
    }
}

/// Render stored tasks
pub fn render_tasks(tasks: &[TaskRecord], mode: OutputMode) {
    if mode == OutputMode::Json {
        print_json(&tasks);
        return;
    }

    if tasks.is_empty() {
        println!("No tasks stored");
        return;
    }
    for task in tasks {
        let deadline = if task.deadline.is_empty() { "-" } else { task.deadline.as_str() };
        println!(
            "{:>3}  {}  {} [{}] due {}",
            task.priority,
            task.id.bold(),
            task.title,
            task.subject,
            deadline
        );
    }
}
