//! Domain models
//!
//! Transient pipeline records (assignments, rankable/rated tasks) and the
//! persisted forms (jobs, tasks) that the stores own.

mod assignment;
mod job;
mod task;

pub use assignment::Assignment;
pub use job::{Job, Task};
pub use task::{build_rankable_tasks, PriorityBand, RankableTask, RatedTask};
