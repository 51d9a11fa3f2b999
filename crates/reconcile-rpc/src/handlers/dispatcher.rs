//! Request dispatcher
//!
//! Routes inbound JSON-RPC messages to the handlers bound in the registry.

use super::{RegisteredHandler, RequestHandlerRegistry, RpcError};
use crate::protocol::{
    JsonRpcError, JsonRpcMessage, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse,
};
use reconcile_core::EndpointId;
use serde_json::Value;
use std::sync::Arc;

/// Dispatch inbound messages to registered handlers
#[derive(Debug, Clone)]
pub struct RequestDispatcher {
    registry: Arc<RequestHandlerRegistry>,
}

impl RequestDispatcher {
    #[must_use]
    pub fn new(registry: Arc<RequestHandlerRegistry>) -> Self {
        Self { registry }
    }

    /// Parse a text frame and dispatch every message in it, in order.
    ///
    /// Returns the responses to send back; empty when the frame held only notifications.
    pub fn dispatch_text(&self, endpoint_id: &EndpointId, text: &str) -> Vec<JsonRpcResponse> {
        let messages = match JsonRpcMessage::parse_frame(text) {
            Ok(messages) => messages,
            Err(e) => {
                tracing::debug!(
                    endpoint_id = %endpoint_id,
                    error = e.message.as_str(),
                    "Failed to parse frame"
                );
                return vec![JsonRpcResponse::error(Value::Null, e)];
            }
        };

        let mut responses = Vec::new();
        for message in messages {
            match message {
                Ok(message) => responses.extend(self.dispatch(endpoint_id, message)),
                Err(invalid) => {
                    tracing::debug!(
                        endpoint_id = %endpoint_id,
                        id = %invalid.id,
                        error = invalid.error.message.as_str(),
                        "Invalid message in frame"
                    );
                    responses.push(invalid.into_response());
                }
            }
        }
        responses
    }

    /// Dispatch a single message.
    ///
    /// Notifications and inbound responses never produce a response.
    pub fn dispatch(
        &self,
        endpoint_id: &EndpointId,
        message: JsonRpcMessage,
    ) -> Option<JsonRpcResponse> {
        tracing::trace!(endpoint_id = %endpoint_id, message = %message, "Received message");

        match message {
            JsonRpcMessage::Notification(notification) => {
                self.handle_notification(endpoint_id, notification);
                None
            }
            JsonRpcMessage::Request(request) => Some(self.handle_request(endpoint_id, request)),
            JsonRpcMessage::Response(response) => {
                tracing::debug!(
                    endpoint_id = %endpoint_id,
                    id = %response.id,
                    "Ignoring response to a request this client never sent"
                );
                None
            }
        }
    }

    fn handle_notification(&self, endpoint_id: &EndpointId, notification: JsonRpcNotification) {
        let method = notification.method;

        match self.registry.get(&method) {
            Some(RegisteredHandler::Notification(handler)) => {
                if let Err(e) = handler(endpoint_id, notification.params) {
                    tracing::warn!(
                        endpoint_id = %endpoint_id,
                        method = %method,
                        error = %e,
                        "Dropping notification"
                    );
                }
            }
            Some(RegisteredHandler::Request(_)) => {
                tracing::warn!(
                    endpoint_id = %endpoint_id,
                    method = %method,
                    "Notification sent to a request method, dropping"
                );
            }
            None => {
                tracing::debug!(
                    endpoint_id = %endpoint_id,
                    method = %method,
                    "No handler for notification"
                );
            }
        }
    }

    fn handle_request(&self, endpoint_id: &EndpointId, request: JsonRpcRequest) -> JsonRpcResponse {
        let result = match self.registry.get(&request.method) {
            Some(RegisteredHandler::Request(handler)) => handler(endpoint_id, request.params),
            Some(RegisteredHandler::Notification(_)) => {
                Err(RpcError::NotificationOnly(request.method.clone()))
            }
            None => Err(RpcError::MethodNotFound(request.method.clone())),
        };

        match result {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(e) => {
                tracing::debug!(
                    endpoint_id = %endpoint_id,
                    method = %request.method,
                    error = %e,
                    "Request failed"
                );
                JsonRpcResponse::error(request.id, JsonRpcError::from(&e))
            }
        }
    }
}
