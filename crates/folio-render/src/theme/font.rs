//! Font declarations.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::guard::{object_entry, string_or_number};

pub(crate) const FONTS: &str = "fonts";

/// A font a theme needs loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FontDescriptor {
    /// Emitted as an `@font-face` block.
    Face {
        family: String,
        src: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        weight: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<String>,
    },
    /// Emitted as an `@import` statement, e.g. a hosted font stylesheet.
    Import { url: String },
}

/// Returns the font named `key`, or `None` if the entry is invalid.
///
/// An entry with a string `import` is an import; otherwise it needs string
/// `family` and `src` to be a face.
pub fn get_font(theme: &Value, key: &str) -> Option<FontDescriptor> {
    make_font(object_entry(theme, FONTS, key)?)
}

pub(crate) fn make_font(entry: &Map<String, Value>) -> Option<FontDescriptor> {
    if let Some(url) = entry.get("import").and_then(Value::as_str) {
        return Some(FontDescriptor::Import {
            url: url.to_string(),
        });
    }

    Some(FontDescriptor::Face {
        family: entry.get("family")?.as_str()?.to_string(),
        src: entry.get("src")?.as_str()?.to_string(),
        weight: entry.get("weight").and_then(string_or_number),
        style: entry.get("style").and_then(Value::as_str).map(str::to_string),
    })
}
