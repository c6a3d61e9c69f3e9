//! Abstractions over the page hosting the annotation client.
//!
//! The resolver never touches a real DOM. Instead it reads the page through
//! [`HostEnvironment`] and [`Document`], which a browser shim (or a test
//! fixture such as [`PageEnvironment`]) implements.

mod page;

pub use page::{PageDocument, PageEnvironment, PageEnvironmentBuilder};

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Read access to the host page's document.
pub trait Document {
    /// Return the first element matching `selector`, if any.
    fn query_selector(&self, selector: &str) -> Option<Element>;

    /// Return the text content of every embedded config script, in document order.
    fn config_scripts(&self) -> Vec<String>;
}

/// The page the client has been injected into.
pub trait HostEnvironment {
    /// The page's document.
    fn document(&self) -> &dyn Document;

    /// The full URL of the host page.
    fn location_href(&self) -> &str;

    /// The host-defined `hypothesisConfig` field, if the page set one.
    fn host_config(&self) -> Option<&HostValue>;
}

/// A snapshot of a DOM element: its tag name and attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
}

impl Element {
    /// Create an element with the given tag name and no attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: BTreeMap::new(),
        }
    }

    /// Set an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// The element's lowercase tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Look up an attribute by (case-insensitive) name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// The element's `href` attribute.
    pub fn href(&self) -> Option<&str> {
        self.attribute("href")
    }
}

/// Zero-argument host callback.
pub type HostCallback = Arc<dyn Fn() -> Value + Send + Sync>;

/// Whatever the host page stored in its `hypothesisConfig` field.
#[derive(Clone)]
pub enum HostValue {
    /// An invocable value.
    Callback(HostCallback),
    /// Any non-invocable value.
    Value(Value),
}

impl HostValue {
    /// Wrap a closure as an invocable host value.
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::Callback(Arc::new(f))
    }

    /// Whether the value can be called.
    pub fn is_invocable(&self) -> bool {
        matches!(self, Self::Callback(_))
    }
}

impl fmt::Debug for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callback(_) => f.write_str("HostValue::Callback(..)"),
            Self::Value(value) => f.debug_tuple("HostValue::Value").field(value).finish(),
        }
    }
}
