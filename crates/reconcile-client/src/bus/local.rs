//! Local event bus
//!
//! Synchronous handlers run inline on the publishing task, in registration
//! order. Async consumers receive a copy through a `tokio::sync::broadcast` channel.

use super::{EventBus, DEFAULT_BUS_CAPACITY};
use parking_lot::RwLock;
use reconcile_core::IdeEvent;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

type Handler = dyn Fn(&IdeEvent) + Send + Sync;

/// Handle returned by `add_handler`, used to detach the handler again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerRegistration(u64);

/// In-memory event bus
pub struct LocalEventBus {
    /// Synchronous handlers with their registration ids
    handlers: RwLock<Vec<(u64, Arc<Handler>)>>,
    /// Next registration id
    next_id: AtomicU64,
    /// Broadcast sender for async subscribers
    sender: broadcast::Sender<IdeEvent>,
    /// Total events fired
    events_fired: AtomicU64,
    capacity: usize,
}

impl LocalEventBus {
    /// Create a new event bus with default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUS_CAPACITY)
    }

    /// Create a new event bus with the given broadcast capacity
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            handlers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
            sender,
            events_fired: AtomicU64::new(0),
            capacity,
        }
    }

    /// Create a new event bus wrapped in Arc
    #[must_use]
    pub fn new_shared(capacity: usize) -> Arc<Self> {
        Arc::new(Self::with_capacity(capacity))
    }

    /// Attach a synchronous handler
    pub fn add_handler<F>(&self, handler: F) -> HandlerRegistration
    where
        F: Fn(&IdeEvent) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.handlers.write().push((id, Arc::new(handler)));

        tracing::debug!(handler_id = id, "Event handler added");
        HandlerRegistration(id)
    }

    /// Detach a handler. Returns false if it was already removed.
    pub fn remove_handler(&self, registration: HandlerRegistration) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|(id, _)| *id != registration.0);
        before != handlers.len()
    }

    /// Subscribe to all events published after this call
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<IdeEvent> {
        self.sender.subscribe()
    }

    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    #[must_use]
    pub fn events_fired(&self) -> u64 {
        self.events_fired.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl EventBus for LocalEventBus {
    fn fire_event(&self, event: IdeEvent) {
        // Snapshot so handlers may add or remove handlers while running
        let handlers: Vec<Arc<Handler>> = self
            .handlers
            .read()
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();

        for handler in &handlers {
            handler(&event);
        }

        let event_type = event.event_type();
        // No async subscribers is not an error
        let receivers = self.sender.send(event).unwrap_or(0);
        self.events_fired.fetch_add(1, Ordering::Relaxed);

        tracing::trace!(
            event_type = event_type,
            handlers = handlers.len(),
            receivers = receivers,
            "Event fired"
        );
    }
}

impl Default for LocalEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LocalEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalEventBus")
            .field("handlers", &self.handler_count())
            .field("subscribers", &self.subscriber_count())
            .field("events_fired", &self.events_fired())
            .field("capacity", &self.capacity)
            .finish()
    }
}
