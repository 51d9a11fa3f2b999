//! Problem summary listener
//!
//! Tracks the latest error/warning counts per file from reconcile events.

use crate::bus::{HandlerRegistration, LocalEventBus};
use dashmap::DashMap;
use reconcile_core::{IdeEvent, ProblemSeverity, ReconcileResult};
use std::sync::Arc;

/// Error and warning counts of one reconcile result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProblemCounts {
    pub errors: usize,
    pub warnings: usize,
}

impl From<&ReconcileResult> for ProblemCounts {
    fn from(result: &ReconcileResult) -> Self {
        Self {
            errors: result.count(ProblemSeverity::Error),
            warnings: result.count(ProblemSeverity::Warning),
        }
    }
}

/// Keeps the most recent problem counts for every reconciled file
#[derive(Debug, Default)]
pub struct ProblemSummaryListener {
    latest: DashMap<String, ProblemCounts>,
}

impl ProblemSummaryListener {
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register on the bus as a synchronous handler
    pub fn attach(self: &Arc<Self>, bus: &LocalEventBus) -> HandlerRegistration {
        let listener = self.clone();
        bus.add_handler(move |event| listener.on_event(event))
    }

    pub fn on_event(&self, event: &IdeEvent) {
        match event {
            IdeEvent::ReconcileOperation(e) => {
                let counts = ProblemCounts::from(&e.result);
                self.latest.insert(e.result.file_location.clone(), counts);

                tracing::info!(
                    file = %e.result.file_location,
                    errors = counts.errors,
                    warnings = counts.warnings,
                    "Reconcile result"
                );
            }
        }
    }

    /// Latest counts for a file, if it was ever reconciled
    #[must_use]
    pub fn counts(&self, file_location: &str) -> Option<ProblemCounts> {
        self.latest.get(file_location).map(|entry| *entry.value())
    }

    #[must_use]
    pub fn tracked_files(&self) -> usize {
        self.latest.len()
    }
}
