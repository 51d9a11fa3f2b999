//! ServerError DTO - failure reported by the server

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Error reported by the server while processing a project file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServerError {
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ServerError {
    /// Create a new ServerError with only a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            extra: Map::new(),
        }
    }

    /// Attach the path of the file concerned
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
