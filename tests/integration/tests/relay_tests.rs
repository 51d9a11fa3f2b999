//! Relay integration tests
//!
//! Drive the relay through a real dispatcher, the way server notifications
//! arrive at runtime.
//!
//! Run with: cargo test -p integration-tests --test relay_tests

use integration_tests::{fixtures::*, RelayHarness};
use reconcile_client::PomReconcileUpdateOperation;
use reconcile_core::{EndpointId, Problem, ProblemSeverity, ReconcileResult};
use serde_json::json;

// ============================================================================
// State changed
// ============================================================================

#[test]
fn test_state_changed_publishes_one_event() {
    let harness = RelayHarness::new();
    let pom = unique_pom();

    let responses = harness
        .dispatcher
        .dispatch_text(&EndpointId::new("ws-agent"), &state_changed(reconcile_result_json(&pom)));

    assert!(responses.is_empty());
    let results = harness.bus.results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].file_location, pom);
    assert_eq!(results[0].count(ProblemSeverity::Error), 1);
    assert_eq!(results[0].count(ProblemSeverity::Warning), 1);
    assert_eq!(results[0].modification_stamp, Some(42));
    assert!(harness.sink.entries().is_empty());
}

#[test]
fn test_state_changed_with_empty_diagnostics() {
    let harness = RelayHarness::new();

    harness.dispatcher.dispatch_text(
        &EndpointId::new("ws-agent"),
        &state_changed(json!({ "diagnostics": [] })),
    );

    assert_eq!(harness.bus.results(), vec![ReconcileResult::default()]);
    assert!(harness.sink.entries().is_empty());
}

#[test]
fn test_unknown_fields_are_forwarded() {
    let harness = RelayHarness::new();

    harness.dispatcher.dispatch_text(
        &EndpointId::default(),
        &state_changed(json!({ "fileLocation": "/p/pom.xml", "projectId": "p" })),
    );

    let results = harness.bus.results();
    assert_eq!(results[0].extra.get("projectId"), Some(&json!("p")));
}

#[test]
fn test_events_follow_delivery_order() {
    let harness = RelayHarness::new();
    let first = unique_pom();
    let second = unique_pom();

    let batch = format!(
        "[{},{}]",
        state_changed(json!({ "fileLocation": first })),
        state_changed(json!({ "fileLocation": second }))
    );
    harness.dispatcher.dispatch_text(&EndpointId::default(), &batch);

    let locations: Vec<String> = harness
        .bus
        .results()
        .into_iter()
        .map(|r| r.file_location)
        .collect();
    assert_eq!(locations, vec![first, second]);
}

// ============================================================================
// Reconcile error
// ============================================================================

#[test]
fn test_error_is_logged_not_published() {
    let harness = RelayHarness::new();

    harness.dispatcher.dispatch_text(
        &EndpointId::new("ws-agent"),
        &reconcile_error("pom.xml: invalid XML"),
    );

    assert!(harness.bus.is_empty());
    assert_eq!(
        harness.sink.entries(),
        vec![(
            PomReconcileUpdateOperation::NAME.to_string(),
            "pom.xml: invalid XML".to_string()
        )]
    );
}

#[test]
fn test_error_with_empty_message() {
    let harness = RelayHarness::new();

    harness
        .dispatcher
        .dispatch_text(&EndpointId::default(), &reconcile_error(""));

    assert!(harness.bus.is_empty());
    assert_eq!(harness.sink.entries().len(), 1);
    assert_eq!(harness.sink.entries()[0].1, "");
}

// ============================================================================
// Dispatch edge cases
// ============================================================================

#[test]
fn test_unrelated_notification_is_ignored() {
    let harness = RelayHarness::new();

    harness.dispatcher.dispatch_text(
        &EndpointId::default(),
        &notification("event:project-opened", json!({ "name": "demo" })),
    );

    assert!(harness.bus.is_empty());
    assert!(harness.sink.entries().is_empty());
}

#[test]
fn test_malformed_params_never_reach_relay() {
    let harness = RelayHarness::new();
    let endpoint = EndpointId::default();

    harness
        .dispatcher
        .dispatch_text(&endpoint, &state_changed(json!({ "problems": "nope" })));
    harness
        .dispatcher
        .dispatch_text(&endpoint, &notification("event:pom-reconcile-error", json!({})));
    harness
        .dispatcher
        .dispatch_text(&endpoint, &state_changed(json!(17)));

    assert!(harness.bus.is_empty());
    assert!(harness.sink.entries().is_empty());
}

#[test]
fn test_ambiguous_problem_list_is_dropped() {
    let harness = RelayHarness::new();

    harness.dispatcher.dispatch_text(
        &EndpointId::default(),
        &state_changed(json!({ "problems": [], "diagnostics": [] })),
    );

    assert!(harness.bus.is_empty());
    assert!(harness.sink.entries().is_empty());
}

#[test]
fn test_reconfiguring_keeps_one_binding() {
    let harness = RelayHarness::new();
    harness.relay.configure_handler(&harness.configurator);

    harness.dispatcher.dispatch_text(
        &EndpointId::default(),
        &state_changed(json!({ "fileLocation": "/p/pom.xml" })),
    );
    harness
        .dispatcher
        .dispatch_text(&EndpointId::default(), &reconcile_error("boom"));

    assert_eq!(harness.bus.len(), 1);
    assert_eq!(harness.sink.entries().len(), 1);
}

#[test]
fn test_requests_to_notification_methods_are_rejected() {
    let harness = RelayHarness::new();

    let responses = harness.dispatcher.dispatch_text(
        &EndpointId::default(),
        &request(5, "event:pom-reconcile-state-changed", json!({})),
    );

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].id, json!(5));
    assert_eq!(responses[0].error.as_ref().map(|e| e.code), Some(-32600));
    assert!(harness.bus.is_empty());

    let responses = harness.dispatcher.dispatch_text(
        &EndpointId::default(),
        &request(6, "workspace/reconcile", json!({})),
    );
    assert_eq!(responses[0].error.as_ref().map(|e| e.code), Some(-32601));
}

#[test]
fn test_direct_calls_ignore_endpoint() {
    let harness = RelayHarness::new();
    let result = ReconcileResult::new("/p/pom.xml", vec![Problem::warning("w", 3)]);

    harness
        .relay
        .on_success(&EndpointId::new(""), result.clone());
    harness
        .relay
        .on_success(&EndpointId::new("another-endpoint"), result.clone());

    assert_eq!(harness.bus.results(), vec![result.clone(), result]);
}
