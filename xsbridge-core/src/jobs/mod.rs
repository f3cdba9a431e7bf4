//! Scheduled job support.
//!
//! Scheduling itself is delegated to an external [`JobManager`]. This module
//! owns the job table, routes start requests to the manager and fans job
//! lifecycle events out to listeners.

mod error;
mod listener;
mod notifier;
mod runtime;
#[cfg(test)]
mod tests;

pub use error::*;
pub use listener::*;
pub use notifier::*;
pub use runtime::*;

use crate::ctx::NormalizedRequest;
use serde::Deserialize;

/// A job declared in configuration, addressed by its script path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobDefinition {
    pub url_path: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl JobDefinition {
    pub fn new(url_path: impl Into<String>, active: bool) -> Self {
        Self {
            url_path: url_path.into(),
            active,
        }
    }
}

/// Identifies one execution of a job on the scheduler side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRunDetails {
    pub job_id: String,
    pub schedule_id: String,
    pub run_id: String,
}

impl JobRunDetails {
    /// `url_path/job_id/schedule_id/run_id`
    pub fn run_name(&self, job: &JobDefinition) -> String {
        format!(
            "{}/{}/{}/{}",
            job.url_path, self.job_id, self.schedule_id, self.run_id
        )
    }
}

/// Binding to the external scheduler service.
///
/// Implementations report lifecycle outcomes through the notifier they are
/// handed; they never log on their own.
pub trait JobManager: Send + Sync {
    fn register_all(&self, jobs: &[JobDefinition], notifier: &JobNotifier);

    fn start_job(
        &self,
        job: &JobDefinition,
        request: &NormalizedRequest,
        notifier: &JobNotifier,
    ) -> Result<JobRunDetails, JobError>;
}
