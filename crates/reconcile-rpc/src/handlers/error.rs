//! Handler error types

use crate::protocol::{ErrorCode, JsonRpcError};
use thiserror::Error;

/// Handler error type
#[derive(Debug, Error)]
pub enum RpcError {
    /// No handler registered for the method
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Params did not decode into the registered DTO
    #[error("Invalid params for {method}: {reason}")]
    InvalidParams { method: String, reason: String },

    /// A request was sent to a method registered as a notification
    #[error("Method {0} does not return a result")]
    NotificationOnly(String),

    /// The handler's result could not be encoded
    #[error("Failed to encode result of {method}: {reason}")]
    ResultEncoding { method: String, reason: String },
}

impl RpcError {
    /// Map to the JSON-RPC error code sent back to the peer
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::MethodNotFound(_) => ErrorCode::MethodNotFound,
            Self::InvalidParams { .. } => ErrorCode::InvalidParams,
            Self::NotificationOnly(_) => ErrorCode::InvalidRequest,
            Self::ResultEncoding { .. } => ErrorCode::InternalError,
        }
    }
}

impl From<&RpcError> for JsonRpcError {
    fn from(err: &RpcError) -> Self {
        JsonRpcError::new(err.error_code(), err.to_string())
    }
}

/// Handler result type
pub type RpcResult<T> = Result<T, RpcError>;
