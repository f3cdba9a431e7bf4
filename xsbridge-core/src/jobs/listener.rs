use crate::jobs::{JobDefinition, JobError, JobRunDetails};
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobEventKind {
    Registered,
    Finished,
    StatusUpdated,
}

/// A job lifecycle outcome reported by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobEvent {
    pub kind: JobEventKind,
    pub job: JobDefinition,
    /// Absent for registration events.
    pub run: Option<JobRunDetails>,
    pub error: Option<JobError>,
}

impl JobEvent {
    pub fn registered(job: &JobDefinition, error: Option<JobError>) -> Self {
        Self {
            kind: JobEventKind::Registered,
            job: job.clone(),
            run: None,
            error,
        }
    }

    pub fn finished(job: &JobDefinition, run: JobRunDetails, error: Option<JobError>) -> Self {
        Self {
            kind: JobEventKind::Finished,
            job: job.clone(),
            run: Some(run),
            error,
        }
    }

    pub fn status_updated(
        job: &JobDefinition,
        run: JobRunDetails,
        error: Option<JobError>,
    ) -> Self {
        Self {
            kind: JobEventKind::StatusUpdated,
            job: job.clone(),
            run: Some(run),
            error,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    /// Run name when run details are known, the job path otherwise.
    pub fn run_name(&self) -> String {
        match &self.run {
            Some(run) => run.run_name(&self.job),
            None => self.job.url_path.clone(),
        }
    }
}

/// Receives job lifecycle events, in registration order.
pub trait JobListener: Send + Sync {
    fn on_event(&self, event: &JobEvent);
}

impl<F> JobListener for F
where
    F: Fn(&JobEvent) + Send + Sync,
{
    fn on_event(&self, event: &JobEvent) {
        self(event)
    }
}

/// Built-in listener: ERROR for failures, INFO for successes.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingJobListener;

impl JobListener for LoggingJobListener {
    fn on_event(&self, event: &JobEvent) {
        let job = event.job.url_path.as_str();

        match (event.kind, &event.error) {
            (JobEventKind::Registered, Some(err)) => {
                error!(job, error = %err, "failed to register job");
            }
            (JobEventKind::Registered, None) => {
                info!(job, "job registered");
            }
            (JobEventKind::Finished, Some(err)) => {
                error!(job, run = %event.run_name(), error = %err, "job execution failed");
            }
            (JobEventKind::Finished, None) => {
                info!(job, run = %event.run_name(), "job finished");
            }
            (JobEventKind::StatusUpdated, Some(err)) => {
                error!(job, run = %event.run_name(), error = %err, "failed to update job status");
            }
            (JobEventKind::StatusUpdated, None) => {
                info!(job, run = %event.run_name(), "job status updated");
            }
        }
    }
}
