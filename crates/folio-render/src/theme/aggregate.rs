//! Theme-wide enumeration.
//!
//! These functions list every entity of a kind a theme defines, resolved, in
//! document order. Sections and typography always include `default`: it is
//! prepended when the theme does not define it, since every page area can
//! fall back to it.

use indexmap::IndexMap;
use serde_json::Value;

use super::defaults::{DEFAULT_KEY, DEFAULT_THEME};
use super::font::{make_font, FontDescriptor, FONTS};
use super::graphic::{make_graphic, Graphic, GRAPHICS};
use super::section::{get_section, Section, SECTIONS};
use super::typography::{get_typography, Typography, TYPOGRAPHY};
use crate::guard::collection;

/// Resolves every section the theme defines, keyed by section name.
///
/// # Example
///
/// ```rust
/// use folio_render::get_all_sections;
/// use serde_json::json;
///
/// let theme = json!({ "sections": { "hero": {}, "footer": {}, "broken": 3 } });
/// let names: Vec<_> = get_all_sections(&theme).keys().cloned().collect();
/// assert_eq!(names, vec!["default", "hero", "footer"]);
/// ```
pub fn get_all_sections(theme: &Value) -> IndexMap<String, Section> {
    entity_keys(theme, SECTIONS)
        .into_iter()
        .map(|key| {
            let section = get_section(theme, Some(key.as_str()));
            (key, section)
        })
        .collect()
}

/// Resolves every typography entry the theme defines.
pub fn get_all_typography(theme: &Value) -> IndexMap<String, Typography> {
    entity_keys(theme, TYPOGRAPHY)
        .into_iter()
        .map(|key| {
            let typography = get_typography(theme, Some(key.as_str()));
            (key, typography)
        })
        .collect()
}

/// Lists every valid graphic the theme defines.
pub fn get_all_graphics(theme: &Value) -> IndexMap<String, Graphic> {
    collection(source(theme), GRAPHICS)
        .into_iter()
        .flatten()
        .filter_map(|(key, entry)| Some((key.clone(), make_graphic(entry.as_object()?)?)))
        .collect()
}

/// Lists every valid font declaration the theme defines.
pub fn get_fonts(theme: &Value) -> IndexMap<String, FontDescriptor> {
    collection(source(theme), FONTS)
        .into_iter()
        .flatten()
        .filter_map(|(key, entry)| Some((key.clone(), make_font(entry.as_object()?)?)))
        .collect()
}

fn source(theme: &Value) -> &Value {
    if theme.is_object() {
        theme
    } else {
        &*DEFAULT_THEME
    }
}

fn entity_keys(theme: &Value, name: &str) -> Vec<String> {
    let mut keys = vec![];
    if let Some(entries) = collection(source(theme), name) {
        keys.extend(
            entries
                .iter()
                .filter(|(_, entry)| entry.is_object())
                .map(|(key, _)| key.clone()),
        );
    }
    if !keys.iter().any(|key| key == DEFAULT_KEY) {
        keys.insert(0, DEFAULT_KEY.to_string());
    }
    keys
}
