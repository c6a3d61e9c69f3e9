//! In-memory host environment.

use super::{Document, Element, HostEnvironment, HostValue};
use serde_json::Value;

/// An owned document made of a flat list of elements and config scripts.
///
/// Supports the selector forms the resolver needs: `tag`, `[attr]`,
/// `[attr="value"]` and `tag[attr="value"]` (single or double quotes).
#[derive(Debug, Clone, Default)]
pub struct PageDocument {
    elements: Vec<Element>,
    scripts: Vec<String>,
}

impl PageDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element.
    pub fn push_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Append the text content of an embedded config script.
    pub fn push_config_script(&mut self, text: impl Into<String>) {
        self.scripts.push(text.into());
    }
}

impl Document for PageDocument {
    fn query_selector(&self, selector: &str) -> Option<Element> {
        let selector = Selector::parse(selector)?;
        self.elements
            .iter()
            .find(|element| selector.matches(element))
            .cloned()
    }

    fn config_scripts(&self) -> Vec<String> {
        self.scripts.clone()
    }
}

/// A parsed simple selector.
#[derive(Debug, PartialEq)]
struct Selector<'a> {
    tag: Option<&'a str>,
    attribute: Option<(&'a str, Option<&'a str>)>,
}

impl<'a> Selector<'a> {
    /// Parse a simple selector; returns `None` for anything unsupported.
    fn parse(selector: &'a str) -> Option<Self> {
        let selector = selector.trim();
        let (tag, rest) = match selector.find('[') {
            Some(index) => (&selector[..index], Some(&selector[index..])),
            None => (selector, None),
        };

        let attribute = match rest {
            None => None,
            Some(rest) => {
                let inner = rest.strip_prefix('[')?.strip_suffix(']')?;
                match inner.split_once('=') {
                    Some((name, value)) => Some((name.trim(), Some(unquote(value.trim())?))),
                    None => Some((inner.trim(), None)),
                }
            }
        };

        let tag = (!tag.is_empty()).then_some(tag);
        if tag.is_none() && attribute.is_none() {
            return None;
        }
        if tag.is_some_and(|t| !t.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')) {
            return None;
        }
        if attribute.is_some_and(|(name, _)| name.is_empty()) {
            return None;
        }

        Some(Self { tag, attribute })
    }

    fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = self.tag {
            if !element.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        match self.attribute {
            None => true,
            Some((name, None)) => element.attribute(name).is_some(),
            Some((name, Some(value))) => element.attribute(name) == Some(value),
        }
    }
}

/// Strip one pair of matching quotes; unquoted values are returned as-is.
fn unquote(value: &str) -> Option<&str> {
    for quote in ['"', '\''] {
        if let Some(stripped) = value.strip_prefix(quote) {
            return stripped.strip_suffix(quote);
        }
    }
    Some(value)
}

/// An owned, in-memory [`HostEnvironment`].
///
/// # Examples
///
/// ```rust
/// use annotator_config::env::{HostEnvironment, PageEnvironment};
/// use serde_json::json;
///
/// let env = PageEnvironment::builder()
///     .with_location("https://example.com/article#annotations:abc123")
///     .with_link("application/annotator+html", "https://hypothes.is/app.html")
///     .with_config_script(r#"{"openSidebar": true}"#)
///     .with_host_callback(|| json!({"showHighlights": false}))
///     .build();
///
/// assert_eq!(env.location_href(), "https://example.com/article#annotations:abc123");
/// ```
#[derive(Debug, Clone)]
pub struct PageEnvironment {
    document: PageDocument,
    location: String,
    host_config: Option<HostValue>,
}

impl PageEnvironment {
    /// Create a new builder.
    pub fn builder() -> PageEnvironmentBuilder {
        PageEnvironmentBuilder::new()
    }

    /// Mutable access to the document.
    pub fn document_mut(&mut self) -> &mut PageDocument {
        &mut self.document
    }

    /// Replace the host `hypothesisConfig` field.
    pub fn set_host_config(&mut self, host_config: Option<HostValue>) {
        self.host_config = host_config;
    }
}

impl HostEnvironment for PageEnvironment {
    fn document(&self) -> &dyn Document {
        &self.document
    }

    fn location_href(&self) -> &str {
        &self.location
    }

    fn host_config(&self) -> Option<&HostValue> {
        self.host_config.as_ref()
    }
}

/// Builder for [`PageEnvironment`].
pub struct PageEnvironmentBuilder {
    document: PageDocument,
    location: String,
    host_config: Option<HostValue>,
}

impl PageEnvironmentBuilder {
    /// Create a builder for an empty page at `about:blank`.
    pub fn new() -> Self {
        Self {
            document: PageDocument::new(),
            location: "about:blank".to_string(),
            host_config: None,
        }
    }

    /// Set the page URL.
    pub fn with_location(mut self, href: impl Into<String>) -> Self {
        self.location = href.into();
        self
    }

    /// Add a `<link>` element with the given `type` and `href`.
    pub fn with_link(mut self, link_type: impl Into<String>, href: impl Into<String>) -> Self {
        self.document.push_element(
            Element::new("link")
                .with_attribute("type", link_type)
                .with_attribute("href", href),
        );
        self
    }

    /// Add an arbitrary element.
    pub fn with_element(mut self, element: Element) -> Self {
        self.document.push_element(element);
        self
    }

    /// Add an embedded config script with the given text content.
    pub fn with_config_script(mut self, text: impl Into<String>) -> Self {
        self.document.push_config_script(text);
        self
    }

    /// Define `hypothesisConfig` as a function.
    pub fn with_host_callback<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.host_config = Some(HostValue::callback(f));
        self
    }

    /// Define `hypothesisConfig` as a plain (non-invocable) value.
    pub fn with_host_value(mut self, value: Value) -> Self {
        self.host_config = Some(HostValue::Value(value));
        self
    }

    /// Build the environment.
    pub fn build(self) -> PageEnvironment {
        PageEnvironment {
            document: self.document,
            location: self.location,
            host_config: self.host_config,
        }
    }
}

impl Default for PageEnvironmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
