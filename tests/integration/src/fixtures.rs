//! Test fixtures and notification builders
//!
//! Provides reusable JSON-RPC frames for integration tests.

use reconcile_client::relay::{POM_RECONCILE_ERROR_METHOD, POM_RECONCILE_STATE_CHANGED_METHOD};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A unique project descriptor path
pub fn unique_pom() -> String {
    format!("/workspace/module{}/pom.xml", unique_suffix())
}

/// Reconcile result payload with one error and one warning
pub fn reconcile_result_json(file_location: &str) -> Value {
    json!({
        "fileLocation": file_location,
        "problems": [
            {
                "id": 1,
                "message": "Missing artifact org.example:lib:jar:1.0",
                "error": true,
                "sourceLineNumber": 12
            },
            {
                "id": 2,
                "message": "Version is duplicate of parent version",
                "warning": true,
                "sourceLineNumber": 7
            }
        ],
        "modificationStamp": 42
    })
}

/// Build a JSON-RPC notification frame
pub fn notification(method: &str, params: Value) -> String {
    json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
    })
    .to_string()
}

/// Build a JSON-RPC request frame
pub fn request(id: u64, method: &str, params: Value) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params,
    })
    .to_string()
}

/// `event:pom-reconcile-state-changed` frame
pub fn state_changed(params: Value) -> String {
    notification(POM_RECONCILE_STATE_CHANGED_METHOD, params)
}

/// `event:pom-reconcile-error` frame
pub fn reconcile_error(message: &str) -> String {
    notification(POM_RECONCILE_ERROR_METHOD, json!({ "message": message }))
}
