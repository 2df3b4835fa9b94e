//! Spacing scale resolution.
//!
//! Scales resolve exactly like palettes (see [`super::palette`]) over
//! `theme.scales`. The built-in default scale defines `inset` and `spacing`,
//! which the stylesheet compiler also exposes as `--padding-inset` and
//! `--layout-spacing`.

use indexmap::IndexMap;
use serde_json::Value;

use super::defaults::{builtin, DEFAULT_KEY};
use super::palette::{build_flat, make_flat};
use crate::guard::try_get_as;

/// A resolved scale: size name to CSS length.
pub type Scale = IndexMap<String, String>;

pub(crate) const SCALES: &str = "scales";

/// Scale entry exposed as `--padding-inset`.
pub const INSET: &str = "inset";
/// Scale entry exposed as `--layout-spacing`.
pub const SPACING: &str = "spacing";

/// Resolves a spacing scale from an untrusted theme document.
///
/// Without a key, the scale named by `sections.default.scale` is used, or
/// `"default"`.
pub fn get_scale(theme: &Value, key: Option<&str>) -> Scale {
    if !theme.is_object() {
        return make_flat(builtin(SCALES).clone());
    }

    let key = key
        .or_else(|| try_get_as(theme, "sections.default.scale", Value::as_str))
        .unwrap_or(DEFAULT_KEY);
    make_flat(build_flat(theme, SCALES, key))
}
