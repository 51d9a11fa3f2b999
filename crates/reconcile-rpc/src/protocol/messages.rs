//! JSON-RPC message format
//!
//! Defines the structure of every frame exchanged with the server.

use super::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON-RPC 2.0 version string
pub const JSONRPC_VERSION: &str = "2.0";

/// A call that expects a response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Value,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// A one-way message; no response is ever sent for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcNotification {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// Reply to a request. Exactly one of `result` or `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// Error object carried by a failed response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// A frame element that could not be classified as a message
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidMessage {
    /// The element's `id` when one could be read, otherwise `null`
    pub id: Value,
    pub error: JsonRpcError,
}

impl InvalidMessage {
    /// Error response to send back for this element
    #[must_use]
    pub fn into_response(self) -> JsonRpcResponse {
        JsonRpcResponse::error(self.id, self.error)
    }
}

/// Any JSON-RPC message, classified by shape
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JsonRpcMessage {
    Request(JsonRpcRequest),
    Notification(JsonRpcNotification),
    Response(JsonRpcResponse),
}

impl JsonRpcRequest {
    #[must_use]
    pub fn new(id: impl Into<Value>, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: id.into(),
            method: method.into(),
            params,
        }
    }
}

impl JsonRpcNotification {
    #[must_use]
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
        }
    }
}

impl JsonRpcResponse {
    /// Create a success response
    #[must_use]
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    #[must_use]
    pub fn error(id: Value, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl JsonRpcError {
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.as_i32(),
            message: message.into(),
            data: None,
        }
    }

    /// Error with the standard message for the code
    #[must_use]
    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.description())
    }

    /// The standard code, if this is one
    #[must_use]
    pub fn error_code(&self) -> Option<ErrorCode> {
        ErrorCode::from_i32(self.code)
    }
}

impl JsonRpcMessage {
    /// Classify a decoded JSON value as a request, notification or response
    pub fn from_value(value: Value) -> Result<Self, JsonRpcError> {
        let Value::Object(object) = value else {
            return Err(JsonRpcError::new(
                ErrorCode::InvalidRequest,
                "Message must be a JSON object",
            ));
        };

        match object.get("jsonrpc").and_then(Value::as_str) {
            Some(JSONRPC_VERSION) => {}
            _ => {
                return Err(JsonRpcError::new(
                    ErrorCode::InvalidRequest,
                    "Missing or unsupported jsonrpc version",
                ))
            }
        }

        if object.contains_key("method") {
            if object.contains_key("id") {
                decode(object).map(Self::Request)
            } else {
                decode(object).map(Self::Notification)
            }
        } else if object.contains_key("result") || object.contains_key("error") {
            decode(object).map(Self::Response)
        } else {
            Err(JsonRpcError::new(
                ErrorCode::InvalidRequest,
                "Message is neither a call nor a response",
            ))
        }
    }

    /// Parse a text frame into one or more messages.
    ///
    /// A batch yields one entry per element, in order; elements that are not
    /// valid messages yield an error entry without failing the whole batch.
    pub fn parse_frame(text: &str) -> Result<Vec<Result<Self, InvalidMessage>>, JsonRpcError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| JsonRpcError::new(ErrorCode::ParseError, e.to_string()))?;

        match value {
            Value::Array(items) if items.is_empty() => Err(JsonRpcError::new(
                ErrorCode::InvalidRequest,
                "Empty batch",
            )),
            Value::Array(items) => Ok(items.into_iter().map(Self::classify).collect()),
            single => Ok(vec![Self::classify(single)]),
        }
    }

    fn classify(value: Value) -> Result<Self, InvalidMessage> {
        let id = readable_id(&value);
        Self::from_value(value).map_err(|error| InvalidMessage { id, error })
    }

    /// Method name for requests and notifications
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        match self {
            Self::Request(r) => Some(&r.method),
            Self::Notification(n) => Some(&n.method),
            Self::Response(_) => None,
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// The `id` of a message object if it has a valid type, otherwise `null`
fn readable_id(value: &Value) -> Value {
    match value.get("id") {
        Some(id @ (Value::String(_) | Value::Number(_))) => id.clone(),
        _ => Value::Null,
    }
}

fn decode<T: serde::de::DeserializeOwned>(object: Map<String, Value>) -> Result<T, JsonRpcError> {
    serde_json::from_value(Value::Object(object))
        .map_err(|e| JsonRpcError::new(ErrorCode::InvalidRequest, e.to_string()))
}

impl From<JsonRpcNotification> for JsonRpcMessage {
    fn from(notification: JsonRpcNotification) -> Self {
        Self::Notification(notification)
    }
}

impl From<JsonRpcRequest> for JsonRpcMessage {
    fn from(request: JsonRpcRequest) -> Self {
        Self::Request(request)
    }
}

impl std::fmt::Display for JsonRpcMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Request(r) => write!(f, "JsonRpcRequest(id={}, method={})", r.id, r.method),
            Self::Notification(n) => write!(f, "JsonRpcNotification(method={})", n.method),
            Self::Response(r) if r.is_error() => write!(f, "JsonRpcResponse(id={}, error)", r.id),
            Self::Response(r) => write!(f, "JsonRpcResponse(id={})", r.id),
        }
    }
}
