//! Section resolution.
//!
//! A section is the unit a visual area of the page selects: a pairing of a
//! palette, a background and a spacing scale, each referenced by name.
//! Resolution merges the section reference along its fallback chain, then
//! resolves each referenced entity (see [`super::palette`],
//! [`super::background`], [`super::scale`]).

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::trace;

use super::background::{get_background, ResolvedBackground};
use super::defaults::{builtin, DEFAULT_KEY};
use super::palette::{get_palette, Palette};
use super::scale::{get_scale, Scale};
use crate::guard::object_entry;

pub(crate) const SECTIONS: &str = "sections";

/// A fully resolved section: every value is literal, nothing refers back
/// into the theme document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub palette: Palette,
    pub background: ResolvedBackground,
    pub scale: Scale,
}

/// Resolves a section from an untrusted theme document.
///
/// `key` defaults to `"default"`. This never fails: a theme that is not an
/// object resolves entirely from the built-in default theme.
///
/// # Example
///
/// ```rust
/// use folio_render::get_section;
/// use serde_json::json;
///
/// let theme = json!({
///     "sections": { "hero": { "palette": "night" } },
///     "palettes": { "night": { "background": "#000000" } }
/// });
///
/// let hero = get_section(&theme, Some("hero"));
/// assert_eq!(hero.palette["background"], "#000000");
/// assert_eq!(hero.background.fill.as_deref(), Some("#000000"));
/// ```
pub fn get_section(theme: &Value, key: Option<&str>) -> Section {
    let key = key.unwrap_or(DEFAULT_KEY);
    make_section(theme, build_section(theme, key))
}

fn build_section(theme: &Value, key: &str) -> Map<String, Value> {
    let mut merged = if key == DEFAULT_KEY {
        builtin(SECTIONS).clone()
    } else {
        build_section(theme, DEFAULT_KEY)
    };

    match object_entry(theme, SECTIONS, key) {
        Some(found) => {
            for (name, value) in found {
                merged.insert(name.clone(), value.clone());
            }
        }
        None => trace!(key, "section not defined, using fallback"),
    }

    merged
}

fn make_section(theme: &Value, merged: Map<String, Value>) -> Section {
    let palette = match merged.get("palette") {
        Some(Value::String(key)) => get_palette(theme, Some(key.as_str())),
        _ => get_palette(theme, None),
    };

    let background = match merged.get("background") {
        Some(Value::String(key)) => get_background(theme, Some(key.as_str()), &palette),
        _ => get_background(theme, None, &palette),
    };

    let scale = match merged.get("scale") {
        Some(Value::String(key)) => get_scale(theme, Some(key.as_str())),
        _ => get_scale(theme, None),
    };

    Section {
        palette,
        background,
        scale,
    }
}
