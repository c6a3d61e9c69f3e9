//! Configuration source implementations.

mod callback;
mod config_source;
mod json;
mod link;
mod query;

pub use callback::{EMBEDDING_DOCS_URL, HostCallbackSource};
pub use config_source::{ConfigSource, FailureMode};
pub use json::{CONFIG_SCRIPT_CLASS, JsonConfigExtractor, JsonScriptSource, ScriptTagExtractor};
pub use link::{ASSET_LINK_TYPE, AssetLinkSource};
pub use query::{AnnotationQueryExtractor, AnnotationQuerySource, FragmentQueryExtractor};
