//! Typography resolution.
//!
//! Typography entries merge shallowly along the usual chain
//! (named, theme `default`, built-in `default`), so `family` and `size` are
//! always available. `colour` and `shadow` stay palette keys here; the
//! stylesheet compiler substitutes them per section.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::trace;

use super::defaults::{builtin, DEFAULT_KEY};
use crate::guard::{object_entry, string_or_number};

pub(crate) const TYPOGRAPHY: &str = "typography";

/// A resolved typography entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub family: String,
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
    /// Palette key of the text colour.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
    /// Palette key of the text shadow colour.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<String>,
}

/// Resolves a typography entry; `key` defaults to `"default"`.
pub fn get_typography(theme: &Value, key: Option<&str>) -> Typography {
    let key = key.unwrap_or(DEFAULT_KEY);
    make_typography(build_typography(theme, key))
}

fn build_typography(theme: &Value, key: &str) -> Map<String, Value> {
    let mut merged = if key == DEFAULT_KEY {
        builtin(TYPOGRAPHY).clone()
    } else {
        build_typography(theme, DEFAULT_KEY)
    };

    match object_entry(theme, TYPOGRAPHY, key) {
        Some(found) => {
            for (name, value) in found {
                merged.insert(name.clone(), value.clone());
            }
        }
        None => trace!(key, "typography not defined, using fallback"),
    }

    merged
}

fn make_typography(merged: Map<String, Value>) -> Typography {
    let fallback = builtin(TYPOGRAPHY);
    let string = |name: &str| merged.get(name).and_then(Value::as_str).map(str::to_string);
    let required = |name: &str| {
        string(name)
            .or_else(|| fallback.get(name).and_then(Value::as_str).map(str::to_string))
            .unwrap_or_default()
    };

    Typography {
        family: required("family"),
        size: required("size"),
        weight: merged.get("weight").and_then(string_or_number),
        style: string("style"),
        line_height: merged.get("lineHeight").and_then(string_or_number),
        letter_spacing: string("letterSpacing"),
        text_decoration: string("textDecoration"),
        colour: string("colour"),
        shadow: string("shadow"),
    }
}
