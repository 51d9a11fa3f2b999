//! WebSocket end-to-end tests
//!
//! A local server pushes notification frames to a real client session.
//!
//! Run with: cargo test -p integration-tests --test websocket_tests

use std::sync::Arc;

use integration_tests::{fixtures::*, test_config, RecordingSink, TestServer};
use reconcile_client::transport::WebSocketEndpoint;
use reconcile_client::{ClientApp, PomReconcileUpdateOperation};
use reconcile_core::{EndpointId, IdeEvent};
use serde_json::{json, Value};

#[tokio::test]
async fn test_client_relays_pushed_notifications() {
    let pom = unique_pom();
    let server = TestServer::start(
        vec![
            state_changed(reconcile_result_json(&pom)),
            reconcile_error("Non-parseable POM"),
            notification("event:unrelated", json!({})),
        ],
        0,
    )
    .await
    .expect("Failed to start server");

    let sink = Arc::new(RecordingSink::default());
    let app = ClientApp::with_sink(test_config(&server.url()), sink.clone());
    let mut events = app.event_bus().subscribe();

    app.run().await.expect("Client session failed");
    server.finish().await.expect("Server task failed");

    assert_eq!(app.event_bus().events_fired(), 1);
    let IdeEvent::ReconcileOperation(event) = events.try_recv().expect("No event published");
    assert_eq!(event.result.file_location, pom);
    assert!(events.try_recv().is_err());

    assert_eq!(
        sink.entries(),
        vec![(
            PomReconcileUpdateOperation::NAME.to_string(),
            "Non-parseable POM".to_string()
        )]
    );

    let counts = app.summary().counts(&pom).expect("File not tracked");
    assert_eq!(counts.errors, 1);
    assert_eq!(counts.warnings, 1);
}

#[tokio::test]
async fn test_client_answers_requests() {
    let server = TestServer::start(
        vec![
            request(7, "event:pom-reconcile-error", json!({ "message": "x" })),
            state_changed(json!({})),
            "{oops".to_string(),
        ],
        2,
    )
    .await
    .expect("Failed to start server");

    let sink = Arc::new(RecordingSink::default());
    let app = ClientApp::with_sink(test_config(&server.url()), sink.clone());

    let endpoint = WebSocketEndpoint::connect(
        &server.url(),
        EndpointId::new("integration"),
        app.dispatcher(),
    )
    .await
    .expect("Failed to connect");
    let stats = endpoint.run().await.expect("Session failed");

    let responses: Vec<Value> = server
        .finish()
        .await
        .expect("Server task failed")
        .iter()
        .map(|text| serde_json::from_str(text).expect("Response is not JSON"))
        .collect();

    assert_eq!(stats.frames, 3);
    assert_eq!(stats.responses, 2);

    assert_eq!(responses[0]["id"], json!(7));
    assert_eq!(responses[0]["error"]["code"], json!(-32600));
    assert_eq!(responses[1]["id"], Value::Null);
    assert_eq!(responses[1]["error"]["code"], json!(-32700));

    assert!(sink.entries().is_empty());
    assert_eq!(app.event_bus().events_fired(), 1);
}
