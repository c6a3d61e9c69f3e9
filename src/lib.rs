//! # annotator-config
//!
//! Deterministic, fault-tolerant configuration resolution for an annotation
//! client embedded in third-party web pages.
//!
//! ## Overview
//!
//! The host page can configure the client in four ways. `annotator-config`
//! merges them into one open key/value map, in this order (later wins):
//!
//! 1. `<link type="application/annotator+html" href="...">` seeds `app`
//! 2. `<script class="js-hypothesis-config">` JSON blobs
//! 3. a `window.hypothesisConfig()` function defined by the host
//! 4. an `#annotations:` fragment on the page URL
//!
//! A missing asset link, or a `hypothesisConfig` that is not a function, is a
//! hard error. Anything else that goes wrong in a source is logged and that
//! source is skipped, so a broken page never stops the client from loading.
//!
//! ## Quick Start
//!
//! ```rust
//! use annotator_config::prelude::*;
//! use serde_json::json;
//!
//! let env = PageEnvironment::builder()
//!     .with_location("https://example.com/article")
//!     .with_link("application/annotator+html", "https://hypothes.is/app.html")
//!     .with_config_script(r#"{"showHighlights": true, "openSidebar": false}"#)
//!     .build();
//!
//! let config = config_from(&env)?;
//! assert_eq!(config.app(), Some("https://hypothes.is/app.html"));
//! assert_eq!(config.show_highlights(), Some(&json!("always")));
//! # Ok::<(), ConfigError>(())
//! ```
//!
//! Real pages are reached through the [`env::HostEnvironment`] trait; the
//! in-memory [`env::PageEnvironment`] is handy for tests and tooling.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod env;
pub mod error;
pub mod logging;
pub mod sources;

use crate::core::{AnnotatorConfig, ConfigResolver};
use crate::env::HostEnvironment;

/// Resolve the configuration for `env` with the default resolver.
///
/// # Errors
///
/// See [`ConfigResolver::resolve`].
pub fn config_from(env: &dyn HostEnvironment) -> error::Result<AnnotatorConfig> {
    ConfigResolver::new().resolve(env)
}

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::config_from;
    pub use crate::core::{AnnotatorConfig, ConfigResolver, ConfigResolverBuilder, Settings};
    pub use crate::env::{Document, Element, HostEnvironment, HostValue, PageEnvironment};
    pub use crate::error::{ConfigError, Result};
    pub use crate::logging::{TracingLogger, WarningLogger};
}
