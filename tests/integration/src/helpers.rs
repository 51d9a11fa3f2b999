//! Test helpers for integration tests
//!
//! Provides recording collaborators for the relay and a scripted WebSocket
//! server that plays frames to a connecting client.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use reconcile_client::{DiagnosticSink, EventBus, PomReconcileUpdateOperation};
use reconcile_common::{AppConfig, AppSettings, EndpointConfig, Environment, EventBusConfig};
use reconcile_core::{IdeEvent, ReconcileResult};
use reconcile_rpc::{RequestDispatcher, RequestHandlerConfigurator, RequestHandlerRegistry};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_tungstenite::{accept_async, tungstenite::Message};

/// Event bus that keeps every fired event
#[derive(Default)]
pub struct RecordingBus {
    events: Mutex<Vec<IdeEvent>>,
}

impl RecordingBus {
    pub fn results(&self) -> Vec<ReconcileResult> {
        self.events
            .lock()
            .iter()
            .map(|IdeEvent::ReconcileOperation(event)| event.result.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventBus for RecordingBus {
    fn fire_event(&self, event: IdeEvent) {
        self.events.lock().push(event);
    }
}

/// Log sink that keeps every `(source, message)` pair
#[derive(Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    pub fn entries(&self) -> Vec<(String, String)> {
        self.entries.lock().clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn error(&self, source: &str, message: &str) {
        self.entries
            .lock()
            .push((source.to_string(), message.to_string()));
    }
}

/// Relay wired to recording collaborators behind a dispatcher
pub struct RelayHarness {
    pub relay: PomReconcileUpdateOperation,
    pub configurator: RequestHandlerConfigurator,
    pub dispatcher: RequestDispatcher,
    pub bus: Arc<RecordingBus>,
    pub sink: Arc<RecordingSink>,
}

impl RelayHarness {
    /// Build the harness and configure the relay once
    pub fn new() -> Self {
        let bus = Arc::new(RecordingBus::default());
        let sink = Arc::new(RecordingSink::default());
        let registry = RequestHandlerRegistry::new_shared();
        let configurator = RequestHandlerConfigurator::new(registry.clone());

        let relay = PomReconcileUpdateOperation::with_sink(bus.clone(), sink.clone());
        relay.configure_handler(&configurator);

        Self {
            relay,
            configurator,
            dispatcher: RequestDispatcher::new(registry),
            bus,
            sink,
        }
    }
}

impl Default for RelayHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Scripted WebSocket server accepting a single client
pub struct TestServer {
    pub addr: SocketAddr,
    handle: JoinHandle<Result<Vec<String>>>,
}

impl TestServer {
    /// Start a server that sends `frames` as text, waits for
    /// `expected_responses` text frames back, then closes the connection
    pub async fn start(frames: Vec<String>, expected_responses: usize) -> Result<Self> {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            let (stream, _) = listener.accept().await?;
            let mut ws = accept_async(stream).await?;

            for frame in frames {
                ws.send(Message::Text(frame)).await?;
            }

            let mut received = Vec::new();
            while received.len() < expected_responses {
                match ws.next().await {
                    Some(Ok(Message::Text(text))) => received.push(text),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                }
            }

            ws.close(None).await.ok();
            Ok::<_, anyhow::Error>(received)
        });

        Ok(Self { addr, handle })
    }

    /// Client URL for this server
    pub fn url(&self) -> String {
        format!("ws://{}/rpc", self.addr)
    }

    /// Wait for the server task and return the frames the client sent
    pub async fn finish(self) -> Result<Vec<String>> {
        self.handle.await?
    }
}

/// Client configuration pointing at `url`
pub fn test_config(url: &str) -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "pom-reconcile-client-test".to_string(),
            env: Environment::Development,
            log_json: false,
        },
        endpoint: EndpointConfig {
            url: url.to_string(),
            endpoint_id: "integration".to_string(),
        },
        event_bus: EventBusConfig { capacity: 16 },
    }
}
