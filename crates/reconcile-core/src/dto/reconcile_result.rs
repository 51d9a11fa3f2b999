//! ReconcileResult DTO - outcome of a server-side reconcile pass

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Problem, ProblemSeverity};

/// Result of reconciling one project descriptor on the server.
///
/// Fields the client does not know about are kept in `extra` so the
/// payload is forwarded without loss.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileResult {
    #[serde(default)]
    pub file_location: String,

    /// Also read from `diagnostics`; a payload carrying both keys is rejected
    #[serde(default, alias = "diagnostics")]
    pub problems: Vec<Problem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modification_stamp: Option<i64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReconcileResult {
    /// Create a result for a file with the given problems
    pub fn new(file_location: impl Into<String>, problems: Vec<Problem>) -> Self {
        Self {
            file_location: file_location.into(),
            problems,
            modification_stamp: None,
            extra: Map::new(),
        }
    }

    /// Check if the reconcile pass reported nothing
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }

    /// Count problems of the given severity
    pub fn count(&self, severity: ProblemSeverity) -> usize {
        self.problems
            .iter()
            .filter(|p| p.severity() == severity)
            .count()
    }
}
