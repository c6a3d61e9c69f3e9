//! Full integration tests exercising the default sources together.

use annotator_config::env::PageEnvironmentBuilder;
use annotator_config::prelude::*;
use annotator_config::sources::ASSET_LINK_TYPE;
use proptest::prelude::*;
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct RecordingLogger {
    warnings: Arc<Mutex<Vec<String>>>,
}

impl WarningLogger for RecordingLogger {
    fn warn(&self, message: &str, error: &ConfigError) {
        self.warnings
            .lock()
            .unwrap()
            .push(format!("{message}: {error}"));
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct ClientConfig {
    app: String,
    #[serde(default)]
    open_sidebar: bool,
    show_highlights: Option<String>,
    annotations: Option<String>,
    query: Option<String>,
}

fn article() -> PageEnvironmentBuilder {
    PageEnvironment::builder()
        .with_location("https://example.com/2017/article.html")
        .with_link("stylesheet", "https://example.com/site.css")
        .with_link(ASSET_LINK_TYPE, "https://hypothes.is/app.html")
}

#[test]
fn test_all_sources_together() {
    let env = article()
        .with_location("https://example.com/2017/article.html#annotations:query:user:alice%20smith")
        .with_config_script(r#"{"openSidebar": true, "showHighlights": false}"#)
        .with_config_script(r#"{"theme": "clean"}"#)
        .with_host_callback(|| json!({"theme": "classic", "branding": {"accentColor": "red"}}))
        .build();

    let config = config_from(&env).unwrap();

    assert_eq!(
        Value::from(config),
        json!({
            "app": "https://hypothes.is/app.html",
            "openSidebar": true,
            "showHighlights": "never",
            "theme": "classic",
            "branding": {"accentColor": "red"},
            "query": "user:alice smith",
        })
    );
}

#[test]
fn test_typed_config() {
    let env = article()
        .with_location("https://example.com/2017/article.html#annotations:Qe7fpc5ZEeaQrcjsv5qWkA")
        .with_config_script(r#"{"openSidebar": true, "showHighlights": true}"#)
        .build();

    let typed: ClientConfig = config_from(&env).unwrap().try_deserialize().unwrap();
    assert_eq!(
        typed,
        ClientConfig {
            app: "https://hypothes.is/app.html".to_string(),
            open_sidebar: true,
            show_highlights: Some("always".to_string()),
            annotations: Some("Qe7fpc5ZEeaQrcjsv5qWkA".to_string()),
            query: None,
        }
    );
}

#[test]
fn test_malformed_script_degrades() {
    let logger = RecordingLogger::default();
    let resolver = ConfigResolver::builder().with_logger(logger.clone()).build();

    let env = article()
        .with_config_script(r#"{"openSidebar": true}"#)
        .with_config_script("{\"openSidebar\": tru")
        .with_host_callback(|| json!({"showHighlights": "whenSidebarOpen"}))
        .build();

    let config = resolver.resolve(&env).unwrap();
    assert_eq!(config.app(), Some("https://hypothes.is/app.html"));
    assert!(!config.contains_key("openSidebar"));
    assert_eq!(config.show_highlights(), Some(&json!("whenSidebarOpen")));

    let warnings = logger.warnings.lock().unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("js-hypothesis-config"));
}

#[test]
fn test_page_without_asset_link() {
    let env = PageEnvironment::builder()
        .with_location("https://example.com/#annotations:abc")
        .with_link("stylesheet", "https://example.com/site.css")
        .with_config_script(r#"{"openSidebar": true}"#)
        .build();

    let err = config_from(&env).unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(err, ConfigError::MissingLink { .. }));
}

#[test]
fn test_asset_link_without_href() {
    let env = PageEnvironment::builder()
        .with_element(Element::new("link").with_attribute("type", ASSET_LINK_TYPE))
        .with_config_script(r#"{"openSidebar": true}"#)
        .build();

    let config = config_from(&env).unwrap();
    assert_eq!(config.app(), Some(""));
    assert_eq!(config.get("openSidebar"), Some(&json!(true)));
}

#[test]
fn test_host_value_not_a_function() {
    let env = article().with_host_value(json!({"openSidebar": true})).build();

    let err = config_from(&env).unwrap_err();
    assert_eq!(err, ConfigError::InvalidHostConfig);
    assert!(err.to_string().contains("embedding.html"));
}

#[test]
fn test_resolver_is_shareable() {
    let resolver = Arc::new(ConfigResolver::new());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let resolver = Arc::clone(&resolver);
            std::thread::spawn(move || {
                let env = article()
                    .with_location(format!("https://example.com/#annotations:id{i}"))
                    .build();
                resolver.resolve(&env).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let config = handle.join().unwrap();
        assert_eq!(config.get("annotations"), Some(&json!(format!("id{i}"))));
    }
}

fn key() -> impl Strategy<Value = String> {
    "[a-z]{1,6}".prop_filter("normalized key", |k| k != "app")
}

proptest! {
    #[test]
    fn prop_later_sources_win(
        json_keys in prop::collection::btree_map(key(), any::<i64>(), 0..6),
        callback_keys in prop::collection::btree_map(key(), any::<i64>(), 0..6),
    ) {
        let script = serde_json::to_string(&json_keys).unwrap();
        let callback_value = serde_json::to_value(&callback_keys).unwrap();
        let env = article()
            .with_config_script(script)
            .with_host_callback(move || callback_value.clone())
            .build();

        let config = config_from(&env).unwrap();

        for (k, v) in &json_keys {
            let expected = callback_keys.get(k).unwrap_or(v);
            prop_assert_eq!(config.get(k), Some(&json!(expected)));
        }
        for (k, v) in &callback_keys {
            prop_assert_eq!(config.get(k), Some(&json!(v)));
        }
        prop_assert_eq!(config.app(), Some("https://hypothes.is/app.html"));
        let distinct: BTreeSet<_> = json_keys.keys().chain(callback_keys.keys()).collect();
        prop_assert_eq!(config.len(), 1 + distinct.len());
    }

    #[test]
    fn prop_arbitrary_location_never_fails(location in ".{0,64}") {
        let env = article().with_location(location).build();
        prop_assert!(config_from(&env).is_ok());
    }
}
