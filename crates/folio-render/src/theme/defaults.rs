//! The built-in default theme.
//!
//! Every resolver falls back to this document's `default` entities as the
//! last link of the fallback chain. It defines exactly one entity of each kind
//! and all of its references resolve, so a lookup that bottoms out here always
//! produces a complete value.

use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};

/// Name of the entity each collection falls back to.
pub const DEFAULT_KEY: &str = "default";

/// The built-in default theme document.
pub static DEFAULT_THEME: Lazy<Value> = Lazy::new(|| {
    json!({
        "sections": {
            "default": { "palette": "default", "background": "default", "scale": "default" }
        },
        "palettes": {
            "default": { "background": "#FFFFFF", "text": "#000000", "accent": "#0055AA" }
        },
        "backgrounds": {
            "default": { "fill": "background" }
        },
        "scales": {
            "default": { "inset": "1.5rem", "spacing": "1rem" }
        },
        "typography": {
            "default": { "family": "sans-serif", "size": "1rem" }
        }
    })
});

static EMPTY: Lazy<Map<String, Value>> = Lazy::new(Map::new);

/// Returns the built-in `default` entity of `collection`.
///
/// Collections the default theme does not define yield an empty object.
pub(crate) fn builtin(collection: &str) -> &'static Map<String, Value> {
    crate::guard::object_entry(&DEFAULT_THEME, collection, DEFAULT_KEY)
        .unwrap_or_else(|| Lazy::force(&EMPTY))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::try_get_as;

    #[test]
    fn test_default_theme_references_resolve() {
        let section = builtin("sections");
        for (field, collection) in [
            ("palette", "palettes"),
            ("background", "backgrounds"),
            ("scale", "scales"),
        ] {
            let key = section[field].as_str().unwrap();
            assert!(
                crate::guard::object_entry(&DEFAULT_THEME, collection, key).is_some(),
                "{} -> {}",
                field,
                key
            );
        }

        let fill = try_get_as(&DEFAULT_THEME, "backgrounds.default.fill", Value::as_str).unwrap();
        assert!(builtin("palettes").contains_key(fill));
    }

    #[test]
    fn test_builtin_unknown_collection_is_empty() {
        assert!(builtin("graphics").is_empty());
    }
}
