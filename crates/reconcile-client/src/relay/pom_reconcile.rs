//! POM reconcile update operation
//!
//! Receives results of POM reconcile operations from the server and notifies
//! interested client consumers about them.

use super::{DiagnosticSink, TracingSink};
use crate::bus::EventBus;
use reconcile_core::{EndpointId, ReconcileOperationEvent, ReconcileResult, ServerError};
use reconcile_rpc::RequestHandlerConfigurator;
use std::sync::Arc;

/// Server notification carrying a reconcile failure
pub const POM_RECONCILE_ERROR_METHOD: &str = "event:pom-reconcile-error";

/// Server notification carrying a fresh reconcile result
pub const POM_RECONCILE_STATE_CHANGED_METHOD: &str = "event:pom-reconcile-state-changed";

/// Relays POM reconcile notifications.
///
/// Results go to the event bus; errors go to the diagnostic sink only.
#[derive(Clone)]
pub struct PomReconcileUpdateOperation {
    event_bus: Arc<dyn EventBus>,
    sink: Arc<dyn DiagnosticSink>,
}

impl PomReconcileUpdateOperation {
    /// Identity used to tag log output
    pub const NAME: &'static str = "PomReconcileUpdateOperation";

    /// Create a relay that logs errors through `tracing`
    pub fn new(event_bus: Arc<dyn EventBus>) -> Self {
        Self::with_sink(event_bus, Arc::new(TracingSink))
    }

    pub fn with_sink(event_bus: Arc<dyn EventBus>, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { event_bus, sink }
    }

    /// Bind both reconcile notifications on the configurator.
    ///
    /// Calling this twice binds the methods twice; whether the second binding
    /// replaces the first is up to the registry.
    pub fn configure_handler(&self, configurator: &RequestHandlerConfigurator) {
        let relay = self.clone();
        configurator
            .new_configuration()
            .method_name(POM_RECONCILE_ERROR_METHOD)
            .params_as_dto::<ServerError>()
            .no_result()
            .with_consumer(move |endpoint_id, error| relay.on_error(endpoint_id, error));

        let relay = self.clone();
        configurator
            .new_configuration()
            .method_name(POM_RECONCILE_STATE_CHANGED_METHOD)
            .params_as_dto::<ReconcileResult>()
            .no_result()
            .with_consumer(move |endpoint_id, result| relay.on_success(endpoint_id, result));
    }

    /// Publish exactly one reconcile event wrapping `result`
    pub fn on_success(&self, _endpoint_id: &EndpointId, result: ReconcileResult) {
        self.event_bus
            .fire_event(ReconcileOperationEvent::new(result).into());
    }

    /// Log the server error message; nothing is published
    pub fn on_error(&self, _endpoint_id: &EndpointId, error: ServerError) {
        self.sink.error(Self::NAME, &error.message);
    }
}

impl std::fmt::Debug for PomReconcileUpdateOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(Self::NAME).finish_non_exhaustive()
    }
}
