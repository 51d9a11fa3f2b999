//! # reconcile-client
//!
//! Client side of POM reconcile notifications: relays server notifications
//! onto the in-process event bus, and carries the bus, log sink and
//! WebSocket transport the relay runs on.

pub mod app;
pub mod bus;
pub mod listeners;
pub mod relay;
pub mod transport;

pub use app::ClientApp;
pub use bus::{EventBus, HandlerRegistration, LocalEventBus};
pub use relay::{DiagnosticSink, PomReconcileUpdateOperation, TracingSink};
