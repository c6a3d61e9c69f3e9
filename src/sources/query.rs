//! Annotation query configuration source.

use super::ConfigSource;
use crate::core::Settings;
use crate::env::HostEnvironment;
use crate::error::Result;
use regex::Regex;
use serde_json::Value;
use std::sync::{Arc, LazyLock};

/// `#annotations:<id>` at the end of the URL.
static ANNOTATION_ID_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#annotations:([A-Za-z0-9_-]+)$").expect("annotation id pattern is valid")
});

/// `#annotations:query:<q>` or `#annotations:q:<q>` at the end of the URL.
static QUERY_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)#annotations:(?:query|q):(.+)$").expect("query pattern is valid")
});

/// Derives configuration from the host page's URL.
pub trait AnnotationQueryExtractor: Send + Sync {
    /// Extract settings from `location_href`, or `None` if the URL carries none.
    fn extract(&self, location_href: &str) -> Option<Settings>;
}

/// Percent escapes of the characters `decodeURI` leaves encoded: `#$&+,/:;=?@`.
static RESERVED_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)%(?:2[346BCF]|3[ABDF]|40)").expect("reserved escape pattern is valid")
});

/// A `%` that does not start a two-digit hex escape.
static MALFORMED_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%(?:[^0-9A-Fa-f]|[0-9A-Fa-f][^0-9A-Fa-f]|[0-9A-Fa-f]?$)")
        .expect("malformed escape pattern is valid")
});

/// Default extractor: reads an `#annotations:` URL fragment.
///
/// - `#annotations:<id>` selects a single annotation: `{"annotations": id}`.
///   Checked first, so it wins when both forms end the URL.
/// - `#annotations:query:<q>` (or `q:`) filters the sidebar: `{"query": q}`.
///   `q` is decoded like `decodeURI`: escapes of reserved characters such as
///   `%2F` are kept, and a malformed or non-UTF-8 escape yields `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FragmentQueryExtractor;

impl AnnotationQueryExtractor for FragmentQueryExtractor {
    fn extract(&self, location_href: &str) -> Option<Settings> {
        let mut settings = Settings::new();

        if let Some(captures) = ANNOTATION_ID_FRAGMENT.captures(location_href) {
            settings.insert(
                "annotations".to_string(),
                Value::String(captures[1].to_string()),
            );
        } else if let Some(captures) = QUERY_FRAGMENT.captures(location_href) {
            let query = decode_uri(&captures[1])?;
            settings.insert("query".to_string(), Value::String(query));
        } else {
            return None;
        }

        Some(settings)
    }
}

/// Decode percent escapes except those of reserved characters.
///
/// Returns `None` where `decodeURI` would throw.
fn decode_uri(raw: &str) -> Option<String> {
    if MALFORMED_ESCAPE.is_match(raw) {
        return None;
    }

    let mut decoded = String::with_capacity(raw.len());
    let mut last = 0;
    for reserved in RESERVED_ESCAPE.find_iter(raw) {
        decoded.push_str(&urlencoding::decode(&raw[last..reserved.start()]).ok()?);
        decoded.push_str(reserved.as_str());
        last = reserved.end();
    }
    decoded.push_str(&urlencoding::decode(&raw[last..]).ok()?);
    Some(decoded)
}

/// Settings derived from the host page's URL.
///
/// Has the highest default priority: a link shared with an annotation
/// fragment must win over whatever the page itself configures.
pub struct AnnotationQuerySource {
    extractor: Arc<dyn AnnotationQueryExtractor>,
    priority: i32,
}

impl AnnotationQuerySource {
    /// Create a source backed by the given extractor.
    pub fn new(extractor: Arc<dyn AnnotationQueryExtractor>) -> Self {
        Self {
            extractor,
            priority: 300,
        }
    }
}

impl Default for AnnotationQuerySource {
    fn default() -> Self {
        Self::new(Arc::new(FragmentQueryExtractor))
    }
}

impl ConfigSource for AnnotationQuerySource {
    fn load(&self, env: &dyn HostEnvironment) -> Result<Option<Settings>> {
        Ok(self.extractor.extract(env.location_href()))
    }

    fn name(&self) -> String {
        "location:annotations".to_string()
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
