//! Tests for the pipeline orchestrator

use tempfile::TempDir;

use trackr::fetch::{ContentFetcher, ScrapeMode};
use trackr::parser::ModuleTable;
use trackr::ranking::HeuristicRanker;
use trackr::storage::{FileJobStore, FileTaskStore, JobStore, TaskStore};
use trackr::workflow::Pipeline;

const MARKUP: &str = "<ul><li>Math Coursework</li><li>Business Essay</li></ul>";

fn pipeline(data_dir: &std::path::Path) -> Pipeline {
    Pipeline::new(
        ContentFetcher::default(),
        ModuleTable::default(),
        Box::new(HeuristicRanker),
        Box::new(FileJobStore::new(data_dir)),
        Box::new(FileTaskStore::new(data_dir)),
    )
}

#[test]
fn scrape_stage_reports_source_and_fingerprint() {
    let dir = TempDir::new().expect("tempdir");
    let result = pipeline(dir.path()).scrape("", MARKUP, ScrapeMode::Http);

    assert_eq!(result.source, "inline");
    assert_eq!(result.assignment_count, 2);
    assert_eq!(result.assignments.len(), 2);
    assert_eq!(result.hash.len(), 64);
    assert!(result.hash.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn scrape_without_source_degrades_to_mock_page() {
    let dir = TempDir::new().expect("tempdir");
    let result = pipeline(dir.path()).scrape("", "", ScrapeMode::Http);

    assert_eq!(result.source, "mock");
    assert!(result.assignment_count >= 1);
}

#[test]
fn run_persists_jobs_and_tasks() {
    let dir = TempDir::new().expect("tempdir");
    let result = pipeline(dir.path())
        .run("", MARKUP, ScrapeMode::Http, "")
        .expect("run");

    assert_eq!(result.persisted_job_count, 2);
    assert_eq!(result.persisted_task_count, 2);
    assert!(result.ranking.fallback);
    assert_eq!(result.ranking.rated_tasks.len(), 2);

    let jobs = FileJobStore::new(dir.path()).list(10).expect("list jobs");
    assert_eq!(jobs.len(), 2);
    let mut job_ids: Vec<&str> = jobs.iter().map(|j| j.id.as_str()).collect();
    job_ids.sort_unstable();
    assert_eq!(job_ids, vec!["job-1", "job-2"]);

    let tasks = FileTaskStore::new(dir.path()).list(10).expect("list tasks");
    assert_eq!(tasks.len(), 2);
    let mut task_ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    task_ids.sort_unstable();
    assert_eq!(task_ids, vec!["task-1", "task-2"]);
}

#[test]
fn persisted_tasks_carry_merged_assignment_fields() {
    let dir = TempDir::new().expect("tempdir");
    let result = pipeline(dir.path())
        .run("", MARKUP, ScrapeMode::Http, "")
        .expect("run");

    let tasks = FileTaskStore::new(dir.path()).list(10).expect("list tasks");
    let math = tasks.iter().find(|t| t.title == "Math Coursework").expect("math task");

    assert_eq!(math.subject, "Math");
    let source = result
        .scrape
        .assignments
        .iter()
        .find(|a| a.title == "Math Coursework")
        .expect("math assignment");
    assert_eq!(Some(math.deadline.as_str()), source.due_at.as_deref());
}

#[test]
fn persisted_priority_never_drops_below_one() {
    let dir = TempDir::new().expect("tempdir");
    pipeline(dir.path())
        .run("", MARKUP, ScrapeMode::Http, "")
        .expect("run");

    let tasks = FileTaskStore::new(dir.path()).list(10).expect("list tasks");
    assert!(tasks.iter().all(|t| (1..=100).contains(&t.priority)));
}

#[test]
fn rerun_is_idempotent() {
    let dir = TempDir::new().expect("tempdir");
    let pipe = pipeline(dir.path());

    pipe.run("", MARKUP, ScrapeMode::Http, "").expect("first run");
    let first_jobs = FileJobStore::new(dir.path()).list(10).expect("list jobs");

    pipe.run("", MARKUP, ScrapeMode::Http, "").expect("second run");
    let second_jobs = FileJobStore::new(dir.path()).list(10).expect("list jobs");
    let second_tasks = FileTaskStore::new(dir.path()).list(10).expect("list tasks");

    assert_eq!(second_jobs.len(), first_jobs.len());
    assert_eq!(second_tasks.len(), 2);
    for job in &second_jobs {
        let original = first_jobs.iter().find(|j| j.id == job.id).expect("same ids");
        assert_eq!(job.created_at, original.created_at);
    }
}

#[test]
fn custom_prompt_is_echoed_through_the_ranking() {
    let dir = TempDir::new().expect("tempdir");
    let result = pipeline(dir.path())
        .run("", MARKUP, ScrapeMode::Http, "exams before essays")
        .expect("run");

    assert_eq!(result.ranking.prompt_used, "exams before essays");
}
