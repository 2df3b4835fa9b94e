//! Graphic entries.
//!
//! Graphics are named image assets (logos, illustrations) that sections can
//! recolour through a colour map. Unlike palettes they have no fallback chain:
//! a graphic either exists with a string `src` or it does not.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::guard::object_entry;

pub(crate) const GRAPHICS: &str = "graphics";

/// A validated graphic. Colour-map values are still palette keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Graphic {
    pub src: String,
    pub alt: String,
    pub colour_map: IndexMap<String, String>,
}

/// Returns the graphic named `key`, or `None` if it is missing or has no
/// string `src`.
pub fn get_graphic(theme: &Value, key: &str) -> Option<Graphic> {
    make_graphic(object_entry(theme, GRAPHICS, key)?)
}

pub(crate) fn make_graphic(entry: &Map<String, Value>) -> Option<Graphic> {
    let src = entry.get("src")?.as_str()?.to_string();
    let alt = entry
        .get("alt")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let colour_map = entry
        .get("colourMap")
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .filter_map(|(class, reference)| {
                    Some((class.clone(), reference.as_str()?.to_string()))
                })
                .collect()
        })
        .unwrap_or_default();

    Some(Graphic {
        src,
        alt,
        colour_map,
    })
}
