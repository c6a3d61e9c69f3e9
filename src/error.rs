//! Error types for annotator-config.

use crate::sources::EMBEDDING_DOCS_URL;

/// Result type alias for annotator-config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while resolving configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The document has no asset link, so the client cannot locate itself.
    #[error("No asset link found in the document (expected an element matching {selector})")]
    MissingLink {
        /// The selector that matched nothing
        selector: String,
    },

    /// The host page defined `hypothesisConfig` as something other than a function.
    #[error("hypothesisConfig must be a function, see: {}", EMBEDDING_DOCS_URL)]
    InvalidHostConfig,

    /// An embedded configuration blob could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// The resolved configuration could not be deserialized into a typed struct.
    #[error("Failed to deserialize configuration: {0}")]
    Deserialization(String),
}

impl ConfigError {
    /// Whether this error aborts resolution when raised by a required source.
    ///
    /// Only a missing asset link and a non-invocable host config are fatal;
    /// everything else is degraded by the resolver.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingLink { .. } | Self::InvalidHostConfig)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
