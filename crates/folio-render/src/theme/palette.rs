//! Palette resolution.
//!
//! A palette is a flat map of colour-role names to colour values. Resolving a
//! palette walks the fallback chain
//!
//! ```text
//! theme.palettes[key]  ->  theme.palettes.default  ->  built-in default palette
//! ```
//!
//! and accumulates keys along the way: entries defined by a more specific
//! palette win, missing entries come from the next link. Non-string entries
//! are dropped after merging.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::trace;

use super::defaults::{builtin, DEFAULT_KEY};
use crate::guard::{object_entry, try_get_as};

/// A resolved palette: colour role name to literal colour value.
pub type Palette = IndexMap<String, String>;

pub(crate) const PALETTES: &str = "palettes";

/// Resolves a palette from an untrusted theme document.
///
/// Without a key, the palette named by `sections.default.palette` is used,
/// or `"default"` if that is missing or not a string. A non-object theme
/// yields the built-in default palette.
///
/// # Example
///
/// ```rust
/// use folio_render::get_palette;
/// use serde_json::json;
///
/// let theme = json!({
///     "palettes": {
///         "default": { "text": "#111111" },
///         "night": { "background": "#000000", "broken": 7 }
///     }
/// });
///
/// let night = get_palette(&theme, Some("night"));
/// assert_eq!(night["background"], "#000000");
/// assert_eq!(night["text"], "#111111");
/// assert!(!night.contains_key("broken"));
/// ```
pub fn get_palette(theme: &Value, key: Option<&str>) -> Palette {
    if !theme.is_object() {
        return make_palette(builtin(PALETTES).clone());
    }

    let key = key
        .or_else(|| try_get_as(theme, "sections.default.palette", Value::as_str))
        .unwrap_or(DEFAULT_KEY);
    make_palette(build_flat(theme, PALETTES, key))
}

/// Merges the fallback chain for a flat entity (palette or scale).
///
/// Returns the unvalidated merged object; callers strip invalid entries.
pub(crate) fn build_flat(theme: &Value, collection: &str, key: &str) -> Map<String, Value> {
    let mut merged = if key == DEFAULT_KEY {
        builtin(collection).clone()
    } else {
        build_flat(theme, collection, DEFAULT_KEY)
    };

    match object_entry(theme, collection, key) {
        Some(found) => {
            for (name, value) in found {
                merged.insert(name.clone(), value.clone());
            }
        }
        None => trace!(collection, key, "entity not defined, using fallback"),
    }

    merged
}

/// Keeps only string-valued entries.
pub(crate) fn make_flat(merged: Map<String, Value>) -> IndexMap<String, String> {
    merged
        .into_iter()
        .filter_map(|(name, value)| match value {
            Value::String(s) => Some((name, s)),
            _ => None,
        })
        .collect()
}

fn make_palette(merged: Map<String, Value>) -> Palette {
    make_flat(merged)
}
