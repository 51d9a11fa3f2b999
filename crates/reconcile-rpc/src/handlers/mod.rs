//! Method handlers
//!
//! Registers handlers by JSON-RPC method name and dispatches inbound messages to them.

mod configurator;
mod dispatcher;
mod error;
mod registry;

pub use configurator::{
    FunctionConfigurator, MethodNameConfigurator, NotificationConfigurator, ParamsConfigurator,
    RequestHandlerConfigurator, ResultConfigurator,
};
pub use dispatcher::RequestDispatcher;
pub use error::{RpcError, RpcResult};
pub use registry::{RegisteredHandler, RequestHandlerRegistry};
