//! Asset link configuration source.

use super::ConfigSource;
use crate::core::{APP_KEY, Settings};
use crate::env::HostEnvironment;
use crate::error::{ConfigError, Result};
use serde_json::Value;

/// The `type` of the `<link>` that points at the client's own HTML bundle.
pub const ASSET_LINK_TYPE: &str = "application/annotator+html";

/// Seeds `app` from the asset-descriptor `<link>`.
///
/// This is the only required source: without the link the client cannot
/// locate itself, so a missing link is fatal.
pub struct AssetLinkSource {
    link_type: String,
    priority: i32,
}

impl AssetLinkSource {
    /// Create a source looking for [`ASSET_LINK_TYPE`] links.
    pub fn new() -> Self {
        Self::with_link_type(ASSET_LINK_TYPE)
    }

    /// Create a source looking for links of a custom type.
    pub fn with_link_type(link_type: impl Into<String>) -> Self {
        Self {
            link_type: link_type.into(),
            priority: 0,
        }
    }

    /// The selector used to find the link.
    pub fn selector(&self) -> String {
        format!(r#"link[type="{}"]"#, self.link_type)
    }
}

impl Default for AssetLinkSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for AssetLinkSource {
    fn load(&self, env: &dyn HostEnvironment) -> Result<Option<Settings>> {
        let selector = self.selector();
        let link = env
            .document()
            .query_selector(&selector)
            .ok_or(ConfigError::MissingLink { selector })?;
        // A link without an `href` attribute reads as an empty URL.
        let href = link.href().unwrap_or_default().to_string();

        let mut settings = Settings::new();
        settings.insert(APP_KEY.to_string(), Value::String(href));
        Ok(Some(settings))
    }

    fn name(&self) -> String {
        format!("link:{}", self.link_type)
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
