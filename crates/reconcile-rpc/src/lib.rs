//! # reconcile-rpc
//!
//! JSON-RPC 2.0 plumbing for the IDE client: message types, a method-name
//! keyed handler registry with a fluent configurator, and a dispatcher that
//! routes inbound frames to registered handlers.

pub mod handlers;
pub mod protocol;

pub use handlers::{
    RequestDispatcher, RequestHandlerConfigurator, RequestHandlerRegistry, RpcError, RpcResult,
};
pub use protocol::{
    ErrorCode, InvalidMessage, JsonRpcError, JsonRpcMessage, JsonRpcNotification,
    JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION,
};
