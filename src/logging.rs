//! Warning sink for degraded configuration sources.

use crate::error::ConfigError;

/// Receives a warning whenever a non-fatal source fails.
///
/// Injected into the resolver so callers decide where warnings go.
pub trait WarningLogger: Send + Sync {
    /// Record that a source was skipped because of `error`.
    fn warn(&self, message: &str, error: &ConfigError);
}

/// Forwards warnings to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl WarningLogger for TracingLogger {
    fn warn(&self, message: &str, error: &ConfigError) {
        tracing::warn!(error = %error, "{}", message);
    }
}
