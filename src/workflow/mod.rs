//! Workflow orchestration
//!
//! Sequences one pipeline run: resolve markup, parse, persist jobs, rank,
//! merge, persist tasks. Fetch and ranking degrade gracefully and never
//! abort a run; store failures are fatal and propagate with no rollback of
//! jobs already written.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::Config;
use crate::fetch::{ContentFetcher, ScrapeMode};
use crate::models::{build_rankable_tasks, Assignment, Job, RankableTask, Task};
use crate::parser::{parse_assignments, ModuleTable};
use crate::ranking::{select_ranker, RankingResult, TaskRanker};
use crate::storage::{FileJobStore, FileTaskStore, JobStore, StoreError, TaskStore};

/// Temperature used when the caller does not choose one
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Output of the scrape stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeResult {
    /// Resolved source label (url, "inline" or "mock")
    pub source: String,
    /// Retrieval mode used
    pub mode: ScrapeMode,
    /// SHA-256 fingerprint of the markup, for traceability
    pub hash: String,
    /// Number of extracted assignments
    pub assignment_count: usize,
    /// The assignments themselves
    pub assignments: Vec<Assignment>,
}

/// Output of a full pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowResult {
    /// Scrape stage output
    pub scrape: ScrapeResult,
    /// Ranking stage output
    pub ranking: RankingResult,
    /// Jobs written by the run
    pub persisted_job_count: usize,
    /// Tasks written by the run
    pub persisted_task_count: usize,
}

/// The parse -> rank -> persist pipeline
pub struct Pipeline {
    fetcher: ContentFetcher,
    table: ModuleTable,
    ranker: Box<dyn TaskRanker>,
    job_store: Box<dyn JobStore>,
    task_store: Box<dyn TaskStore>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline").finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Assemble a pipeline from explicit collaborators
    #[must_use]
    pub fn new(
        fetcher: ContentFetcher,
        table: ModuleTable,
        ranker: Box<dyn TaskRanker>,
        job_store: Box<dyn JobStore>,
        task_store: Box<dyn TaskStore>,
    ) -> Self {
        Self {
            fetcher,
            table,
            ranker,
            job_store,
            task_store,
        }
    }

    /// Assemble the default deployment from config
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ContentFetcher::new(Duration::from_secs(config.fetch_timeout_secs)),
            ModuleTable::default(),
            select_ranker(config),
            Box::new(FileJobStore::new(&config.data_dir)),
            Box::new(FileTaskStore::new(&config.data_dir)),
        )
    }

    /// Resolve markup and extract assignments; no persistence
    ///
    /// Never fails: fetch degrades to a mock page and the parser always
    /// yields at least one record.
    #[must_use]
    pub fn scrape(&self, source_url: &str, raw_markup: &str, mode: ScrapeMode) -> ScrapeResult {
        let (source, markup) = self.fetcher.fetch(source_url, raw_markup, mode);
        let assignments = parse_assignments(&markup, &self.table);

        ScrapeResult {
            source,
            mode,
            hash: fingerprint(&markup),
            assignment_count: assignments.len(),
            assignments,
        }
    }

    /// Rank tasks without touching the stores
    #[must_use]
    pub fn rate(
        &self,
        tasks: &[RankableTask],
        custom_prompt: &str,
        temperature: f64,
    ) -> RankingResult {
        self.ranker.rate_tasks(tasks, custom_prompt, temperature)
    }

    /// Run the full pipeline
    ///
    /// Store failures propagate; jobs already persisted are not rolled back
    /// if task persistence fails afterwards.
    pub fn run(
        &self,
        source_url: &str,
        raw_markup: &str,
        mode: ScrapeMode,
        custom_prompt: &str,
    ) -> Result<WorkflowResult, StoreError> {
        let scrape = self.scrape(source_url, raw_markup, mode);

        let jobs: Vec<Job> = scrape
            .assignments
            .iter()
            .enumerate()
            .map(|(idx, a)| Job::from_assignment(format!("job-{}", idx + 1), a))
            .collect();
        let persisted_job_count = self.job_store.upsert(&jobs)?;

        let tasks = build_rankable_tasks(&scrape.assignments);
        let ranking = self.rate(&tasks, custom_prompt, DEFAULT_TEMPERATURE);

        let persisted = merge_ranked(&ranking, &tasks);
        let persisted_task_count = self.task_store.upsert(&persisted)?;

        log::info!(
            "pipeline run: {} assignment(s), {} job(s), {} task(s), fallback={}",
            scrape.assignment_count,
            persisted_job_count,
            persisted_task_count,
            ranking.fallback
        );

        Ok(WorkflowResult {
            scrape,
            ranking,
            persisted_job_count,
            persisted_task_count,
        })
    }
}

/// Merge rated tasks with their source tasks into persistable form
///
/// Module and due date are recovered from the source task by id. Priority
/// is clamped into [1, 100]; the floor of 1 distinguishes "ranked but low"
/// from "unranked".
fn merge_ranked(ranking: &RankingResult, source_tasks: &[RankableTask]) -> Vec<Task> {
    ranking
        .rated_tasks
        .iter()
        .map(|rated| {
            let source = source_tasks.iter().find(|t| t.id == rated.id);
            Task {
                id: rated.id.clone(),
                title: rated.title.clone(),
                subject: source.map_or_else(|| "General".to_string(), |t| t.module.clone()),
                deadline: source
                    .and_then(|t| t.due_at.clone())
                    .unwrap_or_default(),
                priority: rated.priority_score.clamp(1, 100),
            }
        })
        .collect()
}

/// Stable SHA-256 fingerprint of the page content
fn fingerprint(markup: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(markup.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}
