use crate::ctx::request::{CleanupError, Entity};
use bytes::Bytes;

/// What a request carries once its encoding has been reconciled.
///
/// A request has either a raw body or entities, never both.
#[derive(Debug)]
pub enum RequestContent {
    Body(Option<Bytes>),
    Entities(Vec<Entity>),
}

impl RequestContent {
    pub fn entity_count(&self) -> usize {
        match self {
            Self::Body(_) => 0,
            Self::Entities(entities) => entities.len(),
        }
    }
}

/// Outcome of the body reconciliation step.
#[derive(Debug)]
pub struct BodyResolution {
    pub content: RequestContent,
    /// Temporary uploads that could not be removed.
    pub cleanup_failures: Vec<CleanupError>,
}

impl From<RequestContent> for BodyResolution {
    fn from(content: RequestContent) -> Self {
        Self {
            content,
            cleanup_failures: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptPath {
    pub path: String,
    pub query_path: String,
}
