//! Handler registry
//!
//! Maps JSON-RPC method names to handlers using DashMap for thread-safe access.

use super::RpcResult;
use dashmap::DashMap;
use reconcile_core::EndpointId;
use serde_json::Value;
use std::sync::Arc;

type NotificationFn = dyn Fn(&EndpointId, Option<Value>) -> RpcResult<()> + Send + Sync;
type RequestFn = dyn Fn(&EndpointId, Option<Value>) -> RpcResult<Value> + Send + Sync;

/// A handler bound to a method name
#[derive(Clone)]
pub enum RegisteredHandler {
    /// One-way handler; never produces a response
    Notification(Arc<NotificationFn>),
    /// Request handler; its value is sent back as the result
    Request(Arc<RequestFn>),
}

impl RegisteredHandler {
    #[must_use]
    pub fn is_notification(&self) -> bool {
        matches!(self, Self::Notification(_))
    }
}

impl std::fmt::Debug for RegisteredHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Notification(_) => f.write_str("Notification"),
            Self::Request(_) => f.write_str("Request"),
        }
    }
}

/// Registry of handlers keyed by method name.
///
/// Registering a method name that is already bound replaces the previous handler.
pub struct RequestHandlerRegistry {
    handlers: DashMap<String, RegisteredHandler>,
}

impl RequestHandlerRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }

    /// Create an empty registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Bind a raw notification handler to a method name
    pub fn register_notification<F>(&self, method: impl Into<String>, handler: F)
    where
        F: Fn(&EndpointId, Option<Value>) -> RpcResult<()> + Send + Sync + 'static,
    {
        self.insert(method.into(), RegisteredHandler::Notification(Arc::new(handler)));
    }

    /// Bind a raw request handler to a method name
    pub fn register_request<F>(&self, method: impl Into<String>, handler: F)
    where
        F: Fn(&EndpointId, Option<Value>) -> RpcResult<Value> + Send + Sync + 'static,
    {
        self.insert(method.into(), RegisteredHandler::Request(Arc::new(handler)));
    }

    fn insert(&self, method: String, handler: RegisteredHandler) {
        let kind = format!("{handler:?}");
        if self.handlers.insert(method.clone(), handler).is_some() {
            tracing::warn!(method = %method, kind = %kind, "Handler replaced");
        } else {
            tracing::debug!(method = %method, kind = %kind, "Handler registered");
        }
    }

    /// Look up the handler for a method.
    ///
    /// Returns a clone so no map shard stays locked while the handler runs.
    #[must_use]
    pub fn get(&self, method: &str) -> Option<RegisteredHandler> {
        self.handlers.get(method).map(|entry| entry.value().clone())
    }

    /// Remove the handler for a method
    pub fn unregister(&self, method: &str) -> bool {
        self.handlers.remove(method).is_some()
    }

    #[must_use]
    pub fn contains(&self, method: &str) -> bool {
        self.handlers.contains_key(method)
    }

    /// Registered method names, sorted
    #[must_use]
    pub fn methods(&self) -> Vec<String> {
        let mut methods: Vec<String> = self.handlers.iter().map(|e| e.key().clone()).collect();
        methods.sort();
        methods
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for RequestHandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RequestHandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestHandlerRegistry")
            .field("methods", &self.methods())
            .finish()
    }
}
