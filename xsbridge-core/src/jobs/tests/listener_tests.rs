use crate::jobs::tests::test_helpers::{RecordingListener, run_details};
use crate::jobs::{
    JobDefinition, JobError, JobEvent, JobEventKind, JobListener, JobNotifier,
};
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

#[test]
fn run_name_joins_path_and_ids() {
    // Arrange
    let job = JobDefinition::new("/jobs/cleanup.xsjob", true);

    // Act
    let name = run_details("r9").run_name(&job);

    // Assert
    assert_eq!(name, "/jobs/cleanup.xsjob/j1/s1/r9");
}

#[test]
fn registration_event_is_named_after_job() {
    // Arrange
    let job = JobDefinition::new("/jobs/a.xsjob", true);

    // Act
    let event = JobEvent::registered(&job, None);

    // Assert
    assert_eq!(event.kind, JobEventKind::Registered);
    assert_eq!(event.run_name(), "/jobs/a.xsjob");
    assert!(!event.is_failure());
}

#[test]
fn failed_event_carries_error() {
    // Arrange
    let job = JobDefinition::new("/jobs/a.xsjob", true);

    // Act
    let event = JobEvent::finished(&job, run_details("r1"), Some(JobError::new("boom")));

    // Assert
    assert!(event.is_failure());
    assert_eq!(event.run_name(), "/jobs/a.xsjob/j1/s1/r1");
    assert_eq!(event.error.unwrap().to_string(), "boom");
}

#[test]
fn notifier_starts_with_logging_listener() {
    // Act
    let notifier = JobNotifier::new();

    // Assert
    assert_eq!(notifier.len(), 1);
}

#[test]
fn notifier_calls_listeners_in_order() {
    // Arrange
    let order = Arc::new(Mutex::new(Vec::new()));
    let mut notifier = JobNotifier::new();
    for id in 0..3 {
        let order = Arc::clone(&order);
        notifier.add_listener(Arc::new(move |_: &JobEvent| order.lock().unwrap().push(id)));
    }
    let job = JobDefinition::new("/jobs/a.xsjob", true);

    // Act
    notifier.notify(&JobEvent::registered(&job, None));

    // Assert
    assert_eq!(notifier.len(), 4);
    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
}

#[test]
fn listener_receives_event_unchanged() {
    // Arrange
    let recorder = Arc::new(RecordingListener::default());
    let mut notifier = JobNotifier::new();
    notifier.add_listener(recorder.clone());
    let job = JobDefinition::new("/jobs/a.xsjob", false);
    let event = JobEvent::status_updated(&job, run_details("r2"), Some(JobError::new("x")));

    // Act
    notifier.notify(&event);
    recorder.on_event(&event);

    // Assert
    assert_eq!(recorder.events(), vec![event.clone(), event]);
}
