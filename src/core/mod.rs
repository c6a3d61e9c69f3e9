//! Core resolution types.

mod builder;
mod config;
mod normalize;
mod resolver;

pub use builder::ConfigResolverBuilder;
pub use config::{APP_KEY, AnnotatorConfig, SHOW_HIGHLIGHTS_KEY, Settings};
pub use resolver::ConfigResolver;
