use crate::jobs::{JobEvent, JobListener, LoggingJobListener};
use std::sync::Arc;

/// Ordered fan-out of job events.
///
/// The logging listener always comes first; additional listeners are called
/// after it, synchronously, in the order they were added.
pub struct JobNotifier {
    listeners: Vec<Arc<dyn JobListener>>,
}

impl Default for JobNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl JobNotifier {
    pub fn new() -> Self {
        Self {
            listeners: vec![Arc::new(LoggingJobListener)],
        }
    }

    pub fn add_listener(&mut self, listener: Arc<dyn JobListener>) {
        self.listeners.push(listener);
    }

    pub fn notify(&self, event: &JobEvent) {
        for listener in &self.listeners {
            listener.on_event(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
