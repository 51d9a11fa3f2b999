//! Problem DTO - a single diagnostic produced by a reconcile pass

use serde::{Deserialize, Serialize};
use std::fmt;

/// A diagnostic reported against a source file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Problem {
    pub id: i32,
    pub message: String,
    pub error: bool,
    pub warning: bool,
    pub source_start: i32,
    pub source_end: i32,
    pub source_line_number: i32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,
}

/// Severity derived from the problem flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProblemSeverity {
    Error,
    Warning,
    Info,
}

impl Problem {
    /// Create an error problem at the given line
    pub fn error(message: impl Into<String>, line: i32) -> Self {
        Self {
            message: message.into(),
            error: true,
            source_line_number: line,
            ..Self::default()
        }
    }

    /// Create a warning problem at the given line
    pub fn warning(message: impl Into<String>, line: i32) -> Self {
        Self {
            message: message.into(),
            warning: true,
            source_line_number: line,
            ..Self::default()
        }
    }

    /// Severity of this problem. The error flag wins over the warning flag.
    pub fn severity(&self) -> ProblemSeverity {
        if self.error {
            ProblemSeverity::Error
        } else if self.warning {
            ProblemSeverity::Warning
        } else {
            ProblemSeverity::Info
        }
    }
}

impl fmt::Display for ProblemSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        };
        f.write_str(name)
    }
}
