//! Background resolution.
//!
//! A background is a fill colour reference plus an optional image. Both the
//! fill and the image's colour map refer to palette keys; resolution replaces
//! them with literal colours from an already-resolved [`Palette`] and drops
//! any reference the palette cannot satisfy.
//!
//! The fallback chain has the same shape as palettes:
//!
//! ```text
//! theme.backgrounds[key]  ->  theme.backgrounds.default  ->  built-in default
//! ```
//!
//! When no key can be determined at all (no explicit key and no string
//! `sections.default.background`), resolution goes straight to the default
//! background lookup instead of treating `"default"` as an ordinary key.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::trace;

use super::defaults::{builtin, DEFAULT_KEY};
use super::palette::Palette;
use crate::guard::{object_entry, try_get_as};

pub(crate) const BACKGROUNDS: &str = "backgrounds";

/// How a background image fills its area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageMode {
    /// Scaled to cover the whole area, not repeated.
    #[default]
    Cover,
    /// Repeated at natural size.
    Tile,
}

impl ImageMode {
    /// Parses a mode, normalizing anything other than `"tile"` to `Cover`.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("tile") => ImageMode::Tile,
            _ => ImageMode::Cover,
        }
    }
}

/// A validated background image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedImage {
    pub src: String,
    pub mode: ImageMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Class name to literal colour.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colour_map: Option<IndexMap<String, String>>,
}

/// A background with all palette references replaced by literal colours.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedBackground {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<ResolvedImage>,
}

/// Resolves a background from an untrusted theme document.
///
/// `palette` must already be resolved; it is used to substitute the fill and
/// colour-map references.
///
/// # Example
///
/// ```rust
/// use folio_render::{get_background, get_palette, ImageMode};
/// use serde_json::json;
///
/// let theme = json!({
///     "palettes": { "default": { "primary": "#123456" } },
///     "backgrounds": {
///         "hero": { "fill": "primary", "img": { "src": "hero.png", "mode": "bad" } }
///     }
/// });
///
/// let palette = get_palette(&theme, None);
/// let background = get_background(&theme, Some("hero"), &palette);
/// assert_eq!(background.fill.as_deref(), Some("#123456"));
/// assert_eq!(background.img.unwrap().mode, ImageMode::Cover);
/// ```
pub fn get_background(theme: &Value, key: Option<&str>, palette: &Palette) -> ResolvedBackground {
    if !theme.is_object() {
        return make_background(builtin(BACKGROUNDS).clone(), palette);
    }

    let key = key.or_else(|| try_get_as(theme, "sections.default.background", Value::as_str));
    let merged = match key {
        Some(key) => build_background(theme, key),
        None => build_default_background(theme),
    };
    make_background(merged, palette)
}

fn build_background(theme: &Value, key: &str) -> Map<String, Value> {
    let mut merged = if key == DEFAULT_KEY {
        builtin(BACKGROUNDS).clone()
    } else {
        build_background(theme, DEFAULT_KEY)
    };
    overlay(&mut merged, object_entry(theme, BACKGROUNDS, key), key);
    merged
}

fn build_default_background(theme: &Value) -> Map<String, Value> {
    let mut merged = builtin(BACKGROUNDS).clone();
    overlay(&mut merged, object_entry(theme, BACKGROUNDS, DEFAULT_KEY), DEFAULT_KEY);
    merged
}

fn overlay(merged: &mut Map<String, Value>, found: Option<&Map<String, Value>>, key: &str) {
    match found {
        Some(found) => {
            for (name, value) in found {
                merged.insert(name.clone(), value.clone());
            }
        }
        None => trace!(key, "background not defined, using fallback"),
    }
}

fn make_background(merged: Map<String, Value>, palette: &Palette) -> ResolvedBackground {
    let fill = match merged.get("fill") {
        Some(Value::String(reference)) => {
            let colour = palette.get(reference).cloned();
            if colour.is_none() {
                trace!(reference = reference.as_str(), "dropping unresolved background fill");
            }
            colour
        }
        _ => None,
    };

    ResolvedBackground {
        fill,
        img: merged.get("img").and_then(|img| make_image(img, palette)),
    }
}

fn make_image(img: &Value, palette: &Palette) -> Option<ResolvedImage> {
    let img = img.as_object()?;
    let src = img.get("src")?.as_str()?.to_string();

    Some(ResolvedImage {
        src,
        mode: ImageMode::from_value(img.get("mode")),
        opacity: img.get("opacity").and_then(Value::as_f64),
        colour_map: img
            .get("colourMap")
            .and_then(Value::as_object)
            .map(|map| substitute_colour_map(map, palette)),
    })
}

/// Replaces each colour-map value with the palette colour it names.
///
/// Entries whose value is not a string or not a palette key are dropped.
fn substitute_colour_map(
    map: &Map<String, Value>,
    palette: &Palette,
) -> IndexMap<String, String> {
    map.iter()
        .filter_map(|(class, reference)| {
            let colour = palette.get(reference.as_str()?)?;
            Some((class.clone(), colour.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::palette::get_palette;
    use serde_json::json;

    fn resolve(theme: &Value, key: Option<&str>) -> ResolvedBackground {
        let palette = get_palette(theme, None);
        get_background(theme, key, &palette)
    }

    // =========================================================================
    // Fallback chain
    // =========================================================================

    #[test]
    fn test_non_object_theme_is_builtin() {
        let background = resolve(&Value::Null, None);
        assert_eq!(background.fill.as_deref(), Some("#FFFFFF"));
        assert!(background.img.is_none());
    }

    #[test]
    fn test_key_from_default_section() {
        let theme = json!({
            "sections": { "default": { "background": "dark" } },
            "palettes": { "default": { "ink": "#000000" } },
            "backgrounds": { "dark": { "fill": "ink" } }
        });
        assert_eq!(resolve(&theme, None).fill.as_deref(), Some("#000000"));
    }

    #[test]
    fn test_undetermined_key_uses_default_background() {
        let theme = json!({
            "sections": { "default": { "background": false } },
            "palettes": { "default": { "ink": "#000000" } },
            "backgrounds": { "default": { "fill": "ink" } }
        });
        assert_eq!(resolve(&theme, None).fill.as_deref(), Some("#000000"));
    }

    #[test]
    fn test_named_inherits_theme_default() {
        let theme = json!({
            "backgrounds": {
                "default": { "img": { "src": "paper.png", "mode": "tile" } },
                "plain": { "fill": "text" }
            }
        });
        let background = resolve(&theme, Some("plain"));
        assert_eq!(background.fill.as_deref(), Some("#000000"));
        let img = background.img.unwrap();
        assert_eq!(img.src, "paper.png");
        assert_eq!(img.mode, ImageMode::Tile);
    }

    // =========================================================================
    // Validation and substitution
    // =========================================================================

    #[test]
    fn test_fill_substitution() {
        let theme = json!({
            "palettes": { "default": { "primary": "#123456" } },
            "backgrounds": { "default": { "fill": "primary" } }
        });
        assert_eq!(resolve(&theme, None).fill.as_deref(), Some("#123456"));
    }

    #[test]
    fn test_unresolved_fill_is_dropped() {
        let theme = json!({ "backgrounds": { "default": { "fill": "primary" } } });
        assert!(resolve(&theme, None).fill.is_none());
    }

    #[test]
    fn test_non_string_fill_is_dropped() {
        let theme = json!({ "backgrounds": { "default": { "fill": 3 } } });
        assert!(resolve(&theme, None).fill.is_none());
    }

    #[test]
    fn test_invalid_images_are_dropped() {
        for img in [json!("hero.png"), json!({ "mode": "tile" }), json!({ "src": 1 })] {
            let theme = json!({ "backgrounds": { "default": { "img": img } } });
            assert!(resolve(&theme, None).img.is_none());
        }
    }

    #[test]
    fn test_mode_normalization() {
        for (mode, expected) in [
            (json!("cover"), ImageMode::Cover),
            (json!("tile"), ImageMode::Tile),
            (json!("bad"), ImageMode::Cover),
            (json!(1), ImageMode::Cover),
            (Value::Null, ImageMode::Cover),
        ] {
            let theme = json!({
                "backgrounds": { "default": { "img": { "src": "a.png", "mode": mode } } }
            });
            assert_eq!(resolve(&theme, None).img.unwrap().mode, expected);
        }
    }

    #[test]
    fn test_opacity_must_be_number() {
        let theme = json!({
            "backgrounds": {
                "default": { "img": { "src": "a.png", "opacity": 0.25 } },
                "bad": { "img": { "src": "a.png", "opacity": "0.25" } }
            }
        });
        assert_eq!(resolve(&theme, None).img.unwrap().opacity, Some(0.25));
        assert_eq!(resolve(&theme, Some("bad")).img.unwrap().opacity, None);
    }

    #[test]
    fn test_colour_map_substitution() {
        let theme = json!({
            "palettes": { "default": { "primary": "#123456" } },
            "backgrounds": {
                "default": {
                    "img": {
                        "src": "a.svg",
                        "colourMap": { "stroke": "primary", "fill": "missing", "bad": 2 }
                    }
                },
                "broken": { "img": { "src": "a.svg", "colourMap": "primary" } }
            }
        });
        let map = resolve(&theme, None).img.unwrap().colour_map.unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["stroke"], "#123456");

        assert!(resolve(&theme, Some("broken")).img.unwrap().colour_map.is_none());
    }

    #[test]
    fn test_serializes_camel_case() {
        let theme = json!({
            "backgrounds": {
                "default": { "img": { "src": "a.svg", "colourMap": { "line": "text" } } }
            }
        });
        let value = serde_json::to_value(resolve(&theme, None)).unwrap();
        assert_eq!(value["img"]["mode"], "cover");
        assert_eq!(value["img"]["colourMap"]["line"], "#000000");
        assert!(value["img"].get("opacity").is_none());
    }
}
