//! Diagnostic log sink

/// Destination for diagnostic messages that are logged rather than published
pub trait DiagnosticSink: Send + Sync {
    /// Record an error message on behalf of `source`
    fn error(&self, source: &str, message: &str);
}

/// Sink that writes through `tracing` at error level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn error(&self, source: &str, message: &str) {
        tracing::error!(source = source, "{message}");
    }
}
