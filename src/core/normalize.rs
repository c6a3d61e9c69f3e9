//! Post-merge normalization.

use super::config::{SHOW_HIGHLIGHTS_KEY, Settings};
use serde_json::Value;

/// Rewrite a boolean `showHighlights` to its string form.
///
/// `true` becomes `"always"` and `false` becomes `"never"`. Every other value,
/// including arbitrary strings, is left untouched.
pub(crate) fn normalize_show_highlights(settings: &mut Settings) {
    let replacement = match settings.get(SHOW_HIGHLIGHTS_KEY) {
        Some(Value::Bool(true)) => "always",
        Some(Value::Bool(false)) => "never",
        _ => return,
    };
    settings.insert(SHOW_HIGHLIGHTS_KEY.to_string(), Value::from(replacement));
}
