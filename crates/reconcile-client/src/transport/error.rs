//! Transport error types

use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Transport error type
#[derive(Debug, Error)]
pub enum TransportError {
    /// WebSocket protocol or I/O failure
    #[error("WebSocket error: {0}")]
    WebSocket(Box<tungstenite::Error>),

    /// A response could not be serialized
    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<tungstenite::Error> for TransportError {
    fn from(err: tungstenite::Error) -> Self {
        Self::WebSocket(Box::new(err))
    }
}

/// Transport result type
pub type TransportResult<T> = Result<T, TransportError>;
