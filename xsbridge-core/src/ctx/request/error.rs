use crate::ctx::request::normalization::MultipartError;
use http::StatusCode;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// Failures that abort request assembly. No partial request is produced.
#[derive(Debug, ThisError)]
pub enum RequestError {
    /// The request encoding could not be parsed as multipart.
    #[error("{message}")]
    MalformedRequest { message: String },

    /// A temporary upload handed over by the host could not be read.
    #[error("failed to read uploaded file {path}: {source}")]
    UploadUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RequestError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRequest {
            message: message.into(),
        }
    }

    pub fn missing_boundary(content_type: &str) -> Self {
        Self::malformed(format!(
            "Multipart request error. No boundary parameter found on header Content-Type (\"{content_type}\")"
        ))
    }

    /// HTTP status the host layer should answer with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedRequest { .. } => StatusCode::BAD_REQUEST,
            Self::UploadUnreadable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedRequest { .. })
    }
}

impl From<MultipartError> for RequestError {
    fn from(err: MultipartError) -> Self {
        match err {
            MultipartError::MissingBoundary { content_type } => {
                Self::missing_boundary(&content_type)
            }
            other => Self::malformed(other.to_string()),
        }
    }
}

/// A temporary upload could not be removed after its content was consumed.
///
/// Never fails the request; surfaced for operational visibility only.
#[derive(Debug, ThisError)]
#[error("failed to remove uploaded file {path}: {source}")]
pub struct CleanupError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}
