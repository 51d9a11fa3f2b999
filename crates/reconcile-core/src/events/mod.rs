//! IDE events - application events raised on the client event bus

mod ide_event;

pub use ide_event::{IdeEvent, ReconcileOperationEvent};
