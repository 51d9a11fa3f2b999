//! JSON-RPC protocol definitions
//!
//! Defines the JSON-RPC 2.0 message formats and standard error codes.

mod error_codes;
mod messages;

pub use error_codes::ErrorCode;
pub use messages::{
    InvalidMessage, JsonRpcError, JsonRpcMessage, JsonRpcNotification, JsonRpcRequest,
    JsonRpcResponse, JSONRPC_VERSION,
};
