//! Embedded JSON configuration source.

use super::{ConfigSource, FailureMode};
use crate::core::Settings;
use crate::env::{Document, HostEnvironment};
use crate::error::{ConfigError, Result};
use serde_json::Value;
use std::sync::Arc;

/// Class name of the `<script>` tags carrying embedded JSON configuration.
pub const CONFIG_SCRIPT_CLASS: &str = "js-hypothesis-config";

/// Extracts configuration from JSON blobs embedded in the document.
pub trait JsonConfigExtractor: Send + Sync {
    /// Read every embedded blob and merge them into one map.
    ///
    /// # Errors
    ///
    /// Returns an error if any blob is malformed.
    fn extract(&self, document: &dyn Document) -> Result<Settings>;
}

/// Default extractor: parses each config script as a JSON object.
///
/// Scripts are merged in document order, so later scripts override earlier
/// ones key by key.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptTagExtractor;

impl JsonConfigExtractor for ScriptTagExtractor {
    fn extract(&self, document: &dyn Document) -> Result<Settings> {
        let mut settings = Settings::new();
        for (index, text) in document.config_scripts().iter().enumerate() {
            let value: Value = serde_json::from_str(text).map_err(|e| {
                ConfigError::Parse(format!("{} script #{}: {}", CONFIG_SCRIPT_CLASS, index, e))
            })?;

            match value {
                Value::Object(map) => settings.extend(map),
                other => {
                    return Err(ConfigError::Parse(format!(
                        "{} script #{}: expected a JSON object, found {}",
                        CONFIG_SCRIPT_CLASS,
                        index,
                        json_type_name(&other)
                    )));
                }
            }
        }
        Ok(settings)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Settings embedded in the page as JSON script tags.
///
/// Failures here are never fatal: a broken blob must not stop the client from
/// loading, so the resolver logs and skips it.
pub struct JsonScriptSource {
    extractor: Arc<dyn JsonConfigExtractor>,
    priority: i32,
}

impl JsonScriptSource {
    /// Create a source backed by the given extractor.
    pub fn new(extractor: Arc<dyn JsonConfigExtractor>) -> Self {
        Self {
            extractor,
            priority: 100,
        }
    }
}

impl Default for JsonScriptSource {
    fn default() -> Self {
        Self::new(Arc::new(ScriptTagExtractor))
    }
}

impl ConfigSource for JsonScriptSource {
    fn load(&self, env: &dyn HostEnvironment) -> Result<Option<Settings>> {
        self.extractor.extract(env.document()).map(Some)
    }

    fn name(&self) -> String {
        format!("script:{}", CONFIG_SCRIPT_CLASS)
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn failure_mode(&self) -> FailureMode {
        FailureMode::Degrade
    }
}
