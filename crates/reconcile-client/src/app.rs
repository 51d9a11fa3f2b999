//! Composition root
//!
//! Builds the registry, event bus, relay and listeners once per client
//! session and wires them together.

use crate::bus::LocalEventBus;
use crate::listeners::ProblemSummaryListener;
use crate::relay::{DiagnosticSink, PomReconcileUpdateOperation, TracingSink};
use crate::transport::WebSocketEndpoint;
use reconcile_common::{AppConfig, AppError, AppResult};
use reconcile_core::EndpointId;
use reconcile_rpc::{RequestDispatcher, RequestHandlerConfigurator, RequestHandlerRegistry};
use std::sync::Arc;

/// Client application state
///
/// Holds all process-wide collaborators for the session.
pub struct ClientApp {
    config: AppConfig,
    registry: Arc<RequestHandlerRegistry>,
    event_bus: Arc<LocalEventBus>,
    relay: PomReconcileUpdateOperation,
    summary: Arc<ProblemSummaryListener>,
}

impl ClientApp {
    /// Build the application with errors logged through `tracing`
    pub fn new(config: AppConfig) -> Self {
        Self::with_sink(config, Arc::new(TracingSink))
    }

    /// Build the application with a custom diagnostic sink
    pub fn with_sink(config: AppConfig, sink: Arc<dyn DiagnosticSink>) -> Self {
        let registry = RequestHandlerRegistry::new_shared();
        let event_bus = LocalEventBus::new_shared(config.event_bus.capacity);

        let summary = ProblemSummaryListener::new_shared();
        summary.attach(&event_bus);

        let relay = PomReconcileUpdateOperation::with_sink(event_bus.clone(), sink);
        relay.configure_handler(&RequestHandlerConfigurator::new(registry.clone()));

        tracing::info!(methods = ?registry.methods(), "Notification handlers configured");

        Self {
            config,
            registry,
            event_bus,
            relay,
            summary,
        }
    }

    /// Dispatcher over the configured handlers
    #[must_use]
    pub fn dispatcher(&self) -> RequestDispatcher {
        RequestDispatcher::new(self.registry.clone())
    }

    #[must_use]
    pub fn endpoint_id(&self) -> EndpointId {
        EndpointId::new(self.config.endpoint.endpoint_id.clone())
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<RequestHandlerRegistry> {
        &self.registry
    }

    #[must_use]
    pub fn event_bus(&self) -> &Arc<LocalEventBus> {
        &self.event_bus
    }

    #[must_use]
    pub fn relay(&self) -> &PomReconcileUpdateOperation {
        &self.relay
    }

    #[must_use]
    pub fn summary(&self) -> &Arc<ProblemSummaryListener> {
        &self.summary
    }

    /// Connect to the configured endpoint and relay notifications until the
    /// server closes the connection or Ctrl-C is received
    pub async fn run(&self) -> AppResult<()> {
        let endpoint = WebSocketEndpoint::connect(
            &self.config.endpoint.url,
            self.endpoint_id(),
            self.dispatcher(),
        )
        .await
        .map_err(AppError::transport)?;

        tokio::select! {
            result = endpoint.run() => {
                let stats = result.map_err(AppError::transport)?;
                tracing::info!(
                    frames = stats.frames,
                    responses = stats.responses,
                    events = self.event_bus.events_fired(),
                    "Endpoint disconnected"
                );
            }
            signal = tokio::signal::ctrl_c() => {
                signal.map_err(AppError::internal)?;
                tracing::info!("Shutdown signal received");
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for ClientApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientApp")
            .field("endpoint", &self.config.endpoint.url)
            .field("registry", &self.registry)
            .field("event_bus", &self.event_bus)
            .finish_non_exhaustive()
    }
}
