//! Resolver that merges every configuration source on the host page.

use super::normalize::normalize_show_highlights;
use super::{AnnotatorConfig, ConfigResolverBuilder, Settings};
use crate::env::HostEnvironment;
use crate::error::Result;
use crate::logging::WarningLogger;
use crate::sources::{ConfigSource, FailureMode};
use std::sync::Arc;

/// Resolves the client configuration from a host environment.
///
/// Sources are evaluated in priority order (lowest first) and folded into a
/// single map, later sources replacing colliding keys wholesale. A fatal
/// source aborts resolution; a degrading source that fails is logged and
/// skipped.
///
/// # Examples
///
/// ```rust
/// use annotator_config::prelude::*;
/// use serde_json::json;
///
/// let env = PageEnvironment::builder()
///     .with_location("https://example.com/#annotations:query:tag:science")
///     .with_link("application/annotator+html", "https://hypothes.is/app.html")
///     .with_host_callback(|| json!({"openSidebar": true}))
///     .build();
///
/// let resolver = ConfigResolver::new();
/// let config = resolver.resolve(&env)?;
///
/// assert_eq!(config.app(), Some("https://hypothes.is/app.html"));
/// assert_eq!(config.get("openSidebar"), Some(&json!(true)));
/// assert_eq!(config.get("query"), Some(&json!("tag:science")));
/// # Ok::<(), ConfigError>(())
/// ```
pub struct ConfigResolver {
    sources: Vec<Box<dyn ConfigSource>>,
    logger: Arc<dyn WarningLogger>,
}

impl ConfigResolver {
    /// Create a resolver with the standard sources and collaborators.
    pub fn new() -> Self {
        ConfigResolverBuilder::new().build()
    }

    /// Create a builder for customizing collaborators.
    pub fn builder() -> ConfigResolverBuilder {
        ConfigResolverBuilder::new()
    }

    pub(crate) fn from_parts(
        mut sources: Vec<Box<dyn ConfigSource>>,
        logger: Arc<dyn WarningLogger>,
    ) -> Self {
        // Stable, so equal priorities keep registration order.
        sources.sort_by_key(|s| s.priority());
        Self { sources, logger }
    }

    /// Resolve the configuration for `env`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The document has no asset link ([`ConfigError::MissingLink`])
    /// - `hypothesisConfig` is set but is not a function
    ///   ([`ConfigError::InvalidHostConfig`])
    /// - A custom source with [`FailureMode::Fatal`] fails
    ///
    /// [`ConfigError::MissingLink`]: crate::error::ConfigError::MissingLink
    /// [`ConfigError::InvalidHostConfig`]: crate::error::ConfigError::InvalidHostConfig
    pub fn resolve(&self, env: &dyn HostEnvironment) -> Result<AnnotatorConfig> {
        let mut settings = Settings::new();

        for source in &self.sources {
            match source.load(env) {
                Ok(Some(values)) => {
                    tracing::debug!(source = %source.name(), keys = values.len(), "merging configuration source");
                    settings.extend(values);
                }
                Ok(None) => {
                    tracing::trace!(source = %source.name(), "configuration source contributed nothing");
                }
                Err(err) => match source.failure_mode() {
                    FailureMode::Fatal => return Err(err),
                    FailureMode::Degrade => {
                        let message = format!("Could not load settings from {}", source.name());
                        self.logger.warn(&message, &err);
                    }
                },
            }
        }

        normalize_show_highlights(&mut settings);
        Ok(AnnotatorConfig::from_settings(settings))
    }

    /// Get the list of source names in evaluation order.
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name()).collect()
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}
