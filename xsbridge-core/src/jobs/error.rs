use http::StatusCode;
use thiserror::Error;

/// Failure reported by the scheduler for a single job operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct JobError {
    pub message: String,
}

impl JobError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum JobsError {
    #[error(
        "cannot start job, job manager not initialized; check that a scheduler service is bound to this application"
    )]
    NotInitialized,

    #[error("Job not found")]
    NotFound { path: String },

    #[error("job start failed: {0}")]
    Failed(#[from] JobError),
}

impl JobsError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::NotInitialized | Self::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
