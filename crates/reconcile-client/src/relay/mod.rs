//! Reconcile notification relay
//!
//! Bridges server reconcile notifications into local application events.

mod pom_reconcile;
mod sink;

pub use pom_reconcile::{
    PomReconcileUpdateOperation, POM_RECONCILE_ERROR_METHOD, POM_RECONCILE_STATE_CHANGED_METHOD,
};
pub use sink::{DiagnosticSink, TracingSink};
