//! The resolved configuration object.

use crate::error::{ConfigError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An open mapping of configuration keys to JSON values.
///
/// Every source produces one of these; the resolver merges them.
pub type Settings = Map<String, Value>;

/// Key holding the location of the client's own HTML bundle.
pub const APP_KEY: &str = "app";

/// Key controlling when highlights are shown.
pub const SHOW_HIGHLIGHTS_KEY: &str = "showHighlights";

/// The fully resolved client configuration.
///
/// Serializes transparently as its underlying map.
///
/// # Examples
///
/// ```rust
/// use annotator_config::prelude::*;
/// use serde_json::json;
///
/// let env = PageEnvironment::builder()
///     .with_link("application/annotator+html", "https://hypothes.is/app.html")
///     .with_config_script(r#"{"showHighlights": true}"#)
///     .build();
///
/// let config = config_from(&env)?;
/// assert_eq!(config.app(), Some("https://hypothes.is/app.html"));
/// assert_eq!(config.show_highlights(), Some(&json!("always")));
/// # Ok::<(), ConfigError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotatorConfig(Settings);

impl AnnotatorConfig {
    /// Wrap already-merged settings.
    pub fn from_settings(settings: Settings) -> Self {
        Self(settings)
    }

    /// The `app` URL, when it is a string.
    pub fn app(&self) -> Option<&str> {
        self.0.get(APP_KEY).and_then(Value::as_str)
    }

    /// The (normalized) `showHighlights` value.
    pub fn show_highlights(&self) -> Option<&Value> {
        self.0.get(SHOW_HIGHLIGHTS_KEY)
    }

    /// Look up any key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no keys at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &Settings {
        &self.0
    }

    /// Consume the config, returning the underlying map.
    pub fn into_inner(self) -> Settings {
        self.0
    }

    /// Deserialize the open map into a typed configuration struct.
    ///
    /// Unknown keys are ignored unless `T` denies them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Deserialization`] when the values do not fit `T`.
    pub fn try_deserialize<T>(&self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_value(Value::Object(self.0.clone()))
            .map_err(|e| ConfigError::Deserialization(e.to_string()))
    }
}

impl From<AnnotatorConfig> for Value {
    fn from(config: AnnotatorConfig) -> Self {
        Value::Object(config.0)
    }
}
