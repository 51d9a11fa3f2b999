//! Fluent handler configuration
//!
//! Binds a method name, a params DTO and a callback in one chain:
//!
//! ```
//! use reconcile_rpc::{RequestHandlerConfigurator, RequestHandlerRegistry};
//! # #[derive(serde::Deserialize)]
//! # struct Payload { message: String }
//!
//! let configurator = RequestHandlerConfigurator::new(RequestHandlerRegistry::new_shared());
//! configurator
//!     .new_configuration()
//!     .method_name("event:something-happened")
//!     .params_as_dto::<Payload>()
//!     .no_result()
//!     .with_consumer(|_endpoint_id, payload| println!("{}", payload.message));
//! ```

use super::{RequestHandlerRegistry, RpcError, RpcResult};
use reconcile_core::EndpointId;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// Entry point for registering handlers on a shared registry
#[derive(Debug, Clone)]
pub struct RequestHandlerConfigurator {
    registry: Arc<RequestHandlerRegistry>,
}

impl RequestHandlerConfigurator {
    #[must_use]
    pub fn new(registry: Arc<RequestHandlerRegistry>) -> Self {
        Self { registry }
    }

    /// Start a new handler binding
    #[must_use]
    pub fn new_configuration(&self) -> MethodNameConfigurator {
        MethodNameConfigurator {
            registry: self.registry.clone(),
        }
    }

    /// The registry handlers are bound on
    #[must_use]
    pub fn registry(&self) -> &Arc<RequestHandlerRegistry> {
        &self.registry
    }
}

/// Step 1: choose the method name
#[must_use = "a configuration does nothing until a callback is bound"]
pub struct MethodNameConfigurator {
    registry: Arc<RequestHandlerRegistry>,
}

impl MethodNameConfigurator {
    pub fn method_name(self, name: impl Into<String>) -> ParamsConfigurator {
        ParamsConfigurator {
            registry: self.registry,
            method: name.into(),
        }
    }
}

/// Step 2: choose the params DTO
#[must_use = "a configuration does nothing until a callback is bound"]
pub struct ParamsConfigurator {
    registry: Arc<RequestHandlerRegistry>,
    method: String,
}

impl ParamsConfigurator {
    pub fn params_as_dto<P>(self) -> ResultConfigurator<P>
    where
        P: DeserializeOwned + 'static,
    {
        ResultConfigurator {
            registry: self.registry,
            method: self.method,
            _params: PhantomData,
        }
    }
}

/// Step 3: one-way notification or request with a result
#[must_use = "a configuration does nothing until a callback is bound"]
pub struct ResultConfigurator<P> {
    registry: Arc<RequestHandlerRegistry>,
    method: String,
    _params: PhantomData<fn() -> P>,
}

impl<P> ResultConfigurator<P>
where
    P: DeserializeOwned + 'static,
{
    /// The method is a notification; the bound callback cannot return a value
    pub fn no_result(self) -> NotificationConfigurator<P> {
        NotificationConfigurator {
            registry: self.registry,
            method: self.method,
            _params: PhantomData,
        }
    }

    /// The method is a request answered with an `R`
    pub fn result_as_dto<R>(self) -> FunctionConfigurator<P, R>
    where
        R: Serialize + 'static,
    {
        FunctionConfigurator {
            registry: self.registry,
            method: self.method,
            _types: PhantomData,
        }
    }
}

/// Step 4 for notifications: bind the consumer
#[must_use = "a configuration does nothing until a callback is bound"]
pub struct NotificationConfigurator<P> {
    registry: Arc<RequestHandlerRegistry>,
    method: String,
    _params: PhantomData<fn() -> P>,
}

impl<P> NotificationConfigurator<P>
where
    P: DeserializeOwned + 'static,
{
    pub fn with_consumer<F>(self, consumer: F)
    where
        F: Fn(&EndpointId, P) + Send + Sync + 'static,
    {
        let method = self.method.clone();
        self.registry
            .register_notification(self.method, move |endpoint_id, params| {
                let payload = decode_params::<P>(&method, params)?;
                consumer(endpoint_id, payload);
                Ok(())
            });
    }
}

/// Step 4 for requests: bind the function producing the result
#[must_use = "a configuration does nothing until a callback is bound"]
pub struct FunctionConfigurator<P, R> {
    registry: Arc<RequestHandlerRegistry>,
    method: String,
    _types: PhantomData<fn(P) -> R>,
}

impl<P, R> FunctionConfigurator<P, R>
where
    P: DeserializeOwned + 'static,
    R: Serialize + 'static,
{
    pub fn with_function<F>(self, function: F)
    where
        F: Fn(&EndpointId, P) -> R + Send + Sync + 'static,
    {
        let method = self.method.clone();
        self.registry
            .register_request(self.method, move |endpoint_id, params| {
                let payload = decode_params::<P>(&method, params)?;
                let result = function(endpoint_id, payload);
                serde_json::to_value(result).map_err(|e| RpcError::ResultEncoding {
                    method: method.clone(),
                    reason: e.to_string(),
                })
            });
    }
}

/// Decode `params` into the DTO.
///
/// A single-element positional array is unwrapped; absent params decode from `null`.
fn decode_params<P: DeserializeOwned>(method: &str, params: Option<Value>) -> RpcResult<P> {
    let value = match params {
        Some(Value::Array(mut items)) if items.len() == 1 => items.remove(0),
        Some(value) => value,
        None => Value::Null,
    };

    serde_json::from_value(value).map_err(|e| RpcError::InvalidParams {
        method: method.to_string(),
        reason: e.to_string(),
    })
}
