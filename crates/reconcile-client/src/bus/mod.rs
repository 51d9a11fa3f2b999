//! In-process event bus
//!
//! Decouples the notification relay from the UI-side consumers of its events.

mod local;

pub use local::{HandlerRegistration, LocalEventBus};

use reconcile_core::IdeEvent;

/// Default broadcast buffer for async subscribers
pub const DEFAULT_BUS_CAPACITY: usize = 256;

/// Publishing side of the event bus.
///
/// `fire_event` is synchronous: it returns once the event has been handed
/// to every consumer.
pub trait EventBus: Send + Sync {
    fn fire_event(&self, event: IdeEvent);
}
