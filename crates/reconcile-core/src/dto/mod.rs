//! Data transfer objects exchanged with the server over JSON-RPC

mod problem;
mod reconcile_result;
mod server_error;

pub use problem::{Problem, ProblemSeverity};
pub use reconcile_result::ReconcileResult;
pub use server_error::ServerError;
