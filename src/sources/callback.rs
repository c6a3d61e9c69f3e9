//! Host callback configuration source.

use super::ConfigSource;
use crate::core::Settings;
use crate::env::{HostEnvironment, HostValue};
use crate::error::{ConfigError, Result};
use serde_json::Value;

/// Documentation for host pages embedding the client.
pub const EMBEDDING_DOCS_URL: &str = "https://h.readthedocs.io/en/latest/embedding.html";

/// Settings returned by the host page's `hypothesisConfig()` function.
pub struct HostCallbackSource {
    priority: i32,
}

impl HostCallbackSource {
    /// Create a new host callback source.
    pub fn new() -> Self {
        Self { priority: 200 }
    }
}

impl Default for HostCallbackSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for HostCallbackSource {
    fn load(&self, env: &dyn HostEnvironment) -> Result<Option<Settings>> {
        let callback = match env.host_config() {
            None => return Ok(None),
            Some(HostValue::Value(_)) => return Err(ConfigError::InvalidHostConfig),
            Some(HostValue::Callback(callback)) => callback,
        };

        match callback() {
            Value::Object(settings) => Ok(Some(settings)),
            _ => {
                tracing::trace!("hypothesisConfig() returned a non-object value, ignoring it");
                Ok(None)
            }
        }
    }

    fn name(&self) -> String {
        "callback:hypothesisConfig".to_string()
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
