//! # reconcile-core
//!
//! Domain layer containing the reconcile DTOs exchanged with the server,
//! endpoint identifiers, and the IDE events raised from them.
//! This crate has zero dependencies on infrastructure (transport, event bus, etc.).

pub mod dto;
pub mod events;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use dto::{Problem, ProblemSeverity, ReconcileResult, ServerError};
pub use events::{IdeEvent, ReconcileOperationEvent};
pub use value_objects::EndpointId;
