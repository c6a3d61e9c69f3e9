//! Configuration source trait.

use crate::core::Settings;
use crate::env::HostEnvironment;
use crate::error::Result;

/// What the resolver does when a source fails to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// Abort resolution and return the error to the caller.
    Fatal,
    /// Log a warning and continue as if the source contributed nothing.
    Degrade,
}

/// Trait for configuration sources.
///
/// Implement this trait to feed additional settings into the resolver.
pub trait ConfigSource: Send + Sync {
    /// Read this source's settings from the host page.
    ///
    /// `Ok(None)` means the source has nothing to contribute. The returned map
    /// is merged over lower-priority sources, replacing colliding keys wholesale.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is malformed. Whether that aborts
    /// resolution is decided by [`failure_mode`](Self::failure_mode).
    fn load(&self, env: &dyn HostEnvironment) -> Result<Option<Settings>>;

    /// Get a human-readable name for this source (for logging/debugging).
    fn name(&self) -> String;

    /// Get the priority of this source (higher = takes precedence).
    ///
    /// Default priorities:
    /// - Asset link: 0
    /// - Embedded JSON scripts: 100
    /// - Host callback: 200
    /// - Annotation query: 300
    fn priority(&self) -> i32 {
        100
    }

    /// How a load error from this source is handled.
    fn failure_mode(&self) -> FailureMode {
        FailureMode::Fatal
    }
}
