use crate::config::JobsConfig;
use crate::ctx::NormalizedRequest;
use crate::jobs::{JobDefinition, JobListener, JobManager, JobNotifier, JobRunDetails, JobsError};
use std::sync::Arc;
use tracing::debug;

/// Jobs support of one application.
///
/// Without a `[jobs]` configuration the runtime is disabled: it knows no
/// jobs, registers nothing and refuses to start anything.
pub struct JobsRuntime {
    jobs: Vec<JobDefinition>,
    manager: Option<Arc<dyn JobManager>>,
    notifier: JobNotifier,
}

impl JobsRuntime {
    pub fn new(config: Option<&JobsConfig>, manager: Arc<dyn JobManager>) -> Self {
        match config {
            Some(config) => Self {
                jobs: config.jobs.clone(),
                manager: Some(manager),
                notifier: JobNotifier::new(),
            },
            None => Self::disabled(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            jobs: Vec::new(),
            manager: None,
            notifier: JobNotifier::new(),
        }
    }

    /// Adds a listener after the built-in logging listener.
    pub fn with_listener(mut self, listener: Arc<dyn JobListener>) -> Self {
        self.notifier.add_listener(listener);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.manager.is_some()
    }

    pub fn notifier(&self) -> &JobNotifier {
        &self.notifier
    }

    /// Active jobs, in configuration order.
    pub fn valid_jobs(&self) -> Vec<JobDefinition> {
        self.jobs.iter().filter(|job| job.active).cloned().collect()
    }

    pub fn register_all_jobs(&self) {
        let Some(manager) = &self.manager else {
            debug!("jobs disabled, nothing to register");
            return;
        };
        manager.register_all(&self.valid_jobs(), &self.notifier);
    }

    /// Starts the job addressed by `request.path()`.
    pub fn start_job(&self, request: &NormalizedRequest) -> Result<JobRunDetails, JobsError> {
        let manager = self.manager.as_ref().ok_or(JobsError::NotInitialized)?;

        let job = self
            .jobs
            .iter()
            .find(|job| job.url_path == request.path())
            .ok_or_else(|| JobsError::NotFound {
                path: request.path().to_string(),
            })?;

        debug!(job = %job.url_path, request_id = %request.request_id(), "starting job");
        manager
            .start_job(job, request, &self.notifier)
            .map_err(JobsError::Failed)
    }
}
