//! JSON-RPC transport
//!
//! Feeds frames received from the server into the request dispatcher.

mod error;
mod websocket;

pub use error::{TransportError, TransportResult};
pub use websocket::{serve_frames, SessionStats, WebSocketEndpoint};
