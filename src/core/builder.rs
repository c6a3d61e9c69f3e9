//! Builder for constructing ConfigResolver instances.

use crate::core::ConfigResolver;
use crate::logging::{TracingLogger, WarningLogger};
use crate::sources::{
    ASSET_LINK_TYPE, AnnotationQueryExtractor, AnnotationQuerySource, AssetLinkSource,
    ConfigSource, FragmentQueryExtractor, HostCallbackSource, JsonConfigExtractor,
    JsonScriptSource, ScriptTagExtractor,
};
use std::sync::Arc;

/// Builder for constructing a `ConfigResolver`.
///
/// The four standard sources are always registered; the builder only swaps
/// their collaborators and can add custom sources alongside them.
///
/// # Examples
///
/// ```rust
/// use annotator_config::prelude::*;
/// use annotator_config::sources::{FragmentQueryExtractor, ScriptTagExtractor};
///
/// let resolver = ConfigResolver::builder()
///     .with_json_extractor(ScriptTagExtractor)
///     .with_query_extractor(FragmentQueryExtractor)
///     .with_logger(TracingLogger)
///     .build();
///
/// assert_eq!(resolver.source_names().len(), 4);
/// ```
pub struct ConfigResolverBuilder {
    link_type: String,
    json_extractor: Arc<dyn JsonConfigExtractor>,
    query_extractor: Arc<dyn AnnotationQueryExtractor>,
    logger: Arc<dyn WarningLogger>,
    custom_sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigResolverBuilder {
    /// Create a new builder with default collaborators.
    pub fn new() -> Self {
        Self {
            link_type: ASSET_LINK_TYPE.to_string(),
            json_extractor: Arc::new(ScriptTagExtractor),
            query_extractor: Arc::new(FragmentQueryExtractor),
            logger: Arc::new(TracingLogger),
            custom_sources: Vec::new(),
        }
    }

    /// Look for asset links of a different `type`.
    pub fn with_asset_link_type(mut self, link_type: impl Into<String>) -> Self {
        self.link_type = link_type.into();
        self
    }

    /// Replace the embedded JSON extractor.
    pub fn with_json_extractor<E: JsonConfigExtractor + 'static>(mut self, extractor: E) -> Self {
        self.json_extractor = Arc::new(extractor);
        self
    }

    /// Replace the annotation query extractor.
    pub fn with_query_extractor<E: AnnotationQueryExtractor + 'static>(
        mut self,
        extractor: E,
    ) -> Self {
        self.query_extractor = Arc::new(extractor);
        self
    }

    /// Replace the logger that receives warnings about skipped sources.
    pub fn with_logger<L: WarningLogger + 'static>(mut self, logger: L) -> Self {
        self.logger = Arc::new(logger);
        self
    }

    /// Replace the logger with a shared one.
    pub fn with_shared_logger(mut self, logger: Arc<dyn WarningLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Add a custom configuration source.
    ///
    /// It is merged according to its [`priority`](ConfigSource::priority)
    /// relative to the standard sources (0, 100, 200 and 300).
    pub fn with_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
        self.custom_sources.push(Box::new(source));
        self
    }

    /// Build the resolver.
    pub fn build(self) -> ConfigResolver {
        let mut sources: Vec<Box<dyn ConfigSource>> = vec![
            Box::new(AssetLinkSource::with_link_type(self.link_type)),
            Box::new(JsonScriptSource::new(self.json_extractor)),
            Box::new(HostCallbackSource::new()),
            Box::new(AnnotationQuerySource::new(self.query_extractor)),
        ];
        sources.extend(self.custom_sources);

        ConfigResolver::from_parts(sources, self.logger)
    }
}

impl Default for ConfigResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Settings;
    use crate::env::{HostEnvironment, PageEnvironment};
    use crate::error::Result;
    use serde_json::json;

    struct ConstantSource(i32);

    impl ConfigSource for ConstantSource {
        fn load(&self, _env: &dyn HostEnvironment) -> Result<Option<Settings>> {
            let mut settings = Settings::new();
            settings.insert("foo".to_string(), json!(self.0));
            Ok(Some(settings))
        }

        fn name(&self) -> String {
            format!("constant:{}", self.0)
        }

        fn priority(&self) -> i32 {
            self.0
        }
    }

    #[test]
    fn test_custom_link_type() {
        let resolver = ConfigResolverBuilder::new()
            .with_asset_link_type("application/x-annotator")
            .build();

        let env = PageEnvironment::builder()
            .with_link("application/x-annotator", "http://example.com/custom")
            .build();

        assert_eq!(resolver.resolve(&env).unwrap().app(), Some("http://example.com/custom"));
    }

    #[test]
    fn test_custom_sources_interleave_by_priority() {
        let resolver = ConfigResolverBuilder::new()
            .with_source(ConstantSource(350))
            .with_source(ConstantSource(150))
            .build();

        let names = resolver.source_names();
        assert_eq!(names[2], "constant:150");
        assert_eq!(names[5], "constant:350");

        let env = PageEnvironment::builder()
            .with_link(ASSET_LINK_TYPE, "http://example.com/app")
            .build();
        assert_eq!(resolver.resolve(&env).unwrap().get("foo"), Some(&json!(350)));
    }
}
