//! IDE events
//!
//! These events are published on the in-process event bus for:
//! - Editor annotation renderers
//! - Problem summaries and status indicators

use chrono::{DateTime, Utc};

use crate::dto::ReconcileResult;

/// All events published on the client event bus
#[derive(Debug, Clone, PartialEq)]
pub enum IdeEvent {
    ReconcileOperation(ReconcileOperationEvent),
}

impl IdeEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ReconcileOperation(_) => "RECONCILE_OPERATION",
        }
    }

    /// Get the timestamp of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::ReconcileOperation(e) => e.raised_at,
        }
    }
}

/// Raised when the server reports a new reconcile result
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileOperationEvent {
    pub result: ReconcileResult,
    pub raised_at: DateTime<Utc>,
}

impl ReconcileOperationEvent {
    /// Wrap a reconcile result as is
    pub fn new(result: ReconcileResult) -> Self {
        Self {
            result,
            raised_at: Utc::now(),
        }
    }

    /// The forwarded reconcile result
    #[inline]
    pub fn result(&self) -> &ReconcileResult {
        &self.result
    }
}

impl From<ReconcileOperationEvent> for IdeEvent {
    fn from(event: ReconcileOperationEvent) -> Self {
        Self::ReconcileOperation(event)
    }
}
