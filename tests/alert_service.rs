//! Integration tests for the intake service and the thread-count poller.

use std::{num::NonZeroUsize, sync::Arc};

use chrono::{Duration, Utc};
use quell::{
    config::{AlertSettingsOverride, AppConfig},
    models::{AlertHistory, Severity, SpanObservation},
    poller::ThreadCountPoller,
    service::AlertService,
    store::HistoryStore,
    test_helpers::{
        armed_config, armed_settings, test_agent, FixedThreadCountSource, RecordingDispatcher,
        StaticAgentDirectory,
    },
};

fn span(object_hash: i64, error_code: i64, elapsed_ms: i64) -> SpanObservation {
    SpanObservation {
        object_hash,
        service_id: 7,
        service_name: "/orders/{id}".to_owned(),
        elapsed_ms,
        error_code,
        error_message: (error_code != 0).then(|| "NullPointerException".to_owned()),
        end_time: Utc::now(),
    }
}

struct Harness {
    service: AlertService,
    store: Arc<HistoryStore>,
    dispatcher: Arc<RecordingDispatcher>,
}

fn harness(config: Arc<AppConfig>) -> Harness {
    let store = Arc::new(HistoryStore::new(NonZeroUsize::new(64).unwrap()));
    let dispatcher = Arc::new(RecordingDispatcher::new());
    let directory = Arc::new(StaticAgentDirectory::new([test_agent(42)]));
    let service = AlertService::new(config, store.clone(), directory, dispatcher.clone());
    Harness { service, store, dispatcher }
}

#[tokio::test]
async fn sustained_slowdown_surfaces_after_one_interval() {
    let h = harness(armed_config());

    // Breaches inside the suppression window stay silent.
    h.service.process_span(&span(42, 0, 9000)).await;
    h.service.process_span(&span(42, 0, 9000)).await;
    assert!(h.dispatcher.sent().is_empty());

    // One interval later the accumulated condition surfaces.
    let mut history = h.store.get("42_elapsed_7").unwrap();
    history.last_modified = Utc::now() - Duration::minutes(6);
    h.store.put("42_elapsed_7", history);
    h.service.process_span(&span(42, 0, 9000)).await;

    let sent = h.dispatcher.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].severity, Severity::Warn);
    assert_eq!(sent[0].object_name, "agent-42");
    assert!(sent[0].message.contains("elapsed time(9,000 ms)"));
}

#[tokio::test]
async fn error_spans_notify_on_repeat_and_carry_the_error_text() {
    let h = harness(armed_config());

    h.service.process_span(&span(42, 1003, 100)).await;
    h.service.process_span(&span(42, 1003, 100)).await;

    let sent = h.dispatcher.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].severity, Severity::Error);
    assert_eq!(sent[0].title, "NullPointerException");
    assert_eq!(sent[0].message, "/orders/{id} - NullPointerException (+1)");
}

#[tokio::test]
async fn distinct_services_are_tracked_as_distinct_conditions() {
    let h = harness(armed_config());

    let mut other_service = span(42, 0, 9000);
    other_service.service_id = 8;

    h.service.process_span(&span(42, 0, 9000)).await;
    h.service.process_span(&other_service).await;

    assert!(h.store.contains_key("42_elapsed_7"));
    assert!(h.store.contains_key("42_elapsed_8"));
    assert_eq!(h.store.get("42_elapsed_7").unwrap().occurrence_count, 0);
}

#[tokio::test]
async fn per_type_override_gates_delivery() {
    let mut config = AppConfig { alerts: armed_settings(), ..AppConfig::default() };
    config.overrides.insert(
        "tomcat".to_owned(),
        AlertSettingsOverride { enabled: Some(false), ..AlertSettingsOverride::default() },
    );
    let h = harness(Arc::new(config));

    h.service.process_span(&span(42, 1003, 100)).await;
    h.service.process_span(&span(42, 1003, 100)).await;

    // The override disabled delivery for this type, but tracking continued.
    assert!(h.dispatcher.sent().is_empty());
    assert_eq!(h.store.get("42_error_7").unwrap().occurrence_count, 1);
}

#[tokio::test]
async fn poller_feeds_breaches_through_the_same_windows() {
    let config = armed_config();
    let store = Arc::new(HistoryStore::new(NonZeroUsize::new(64).unwrap()));
    let dispatcher = Arc::new(RecordingDispatcher::new());
    let directory = Arc::new(StaticAgentDirectory::new([test_agent(1), test_agent(2)]));
    let service = Arc::new(AlertService::new(
        config.clone(),
        store.clone(),
        directory.clone(),
        dispatcher.clone(),
    ));
    // Agent 1 breaches the 300-thread threshold, agent 2 does not.
    let source = Arc::new(FixedThreadCountSource::new([(1, 450), (2, 120)]));
    let poller = ThreadCountPoller::new(config, service, directory, source);

    // First sweep arms the window; a sweep inside it is suppressed.
    poller.poll_once().await;
    poller.poll_once().await;
    assert!(dispatcher.sent().is_empty());
    assert_eq!(store.get("1_thread_count").unwrap().occurrence_count, 1);
    assert!(!store.contains_key("2_thread_count"));

    // One interval later the sustained breach escalates to FATAL
    // (two suppressed repeats).
    store.put(
        "1_thread_count",
        AlertHistory {
            last_modified: Utc::now() - Duration::minutes(6),
            occurrence_count: 2,
        },
    );
    poller.poll_once().await;

    let sent = dispatcher.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].severity, Severity::Fatal);
    assert_eq!(sent[0].object_name, "agent-1");
    assert!(sent[0].message.contains("Thread count(450)"));
}
