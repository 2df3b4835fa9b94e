//! Locale text resolution.
//!
//! A locale document is a sparse, nested map of UI strings. [`build_locale`]
//! fills it against [`DEFAULT_LOCALE`], producing a complete document with
//! the same shape as the default:
//!
//! - Keys present in the default and valid in the input keep the input value
//! - Keys missing from the input, or holding a value of a different JSON type,
//!   take the default value
//! - Nested objects are filled recursively
//! - Keys the default does not know are not carried over
//!
//! ```rust
//! use folio_render::build_locale;
//! use serde_json::json;
//!
//! let locale = build_locale(&json!({
//!     "nav": { "blog": "Journal" },
//!     "contact": "not an object"
//! }));
//!
//! assert_eq!(locale.text("nav.blog"), "Journal");
//! assert_eq!(locale.text("nav.home"), "Home");
//! assert_eq!(locale.text("contact.submit"), "Send");
//! ```

use std::mem::discriminant;

use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{json, Value};

use crate::guard::try_get_as;

/// The complete default locale. Every lookup path resolves against it.
pub static DEFAULT_LOCALE: Lazy<Value> = Lazy::new(|| {
    json!({
        "meta": {
            "lang": "en",
            "title": "Folio",
            "description": "A personal website"
        },
        "nav": {
            "home": "Home",
            "profile": "Profile",
            "blog": "Blog",
            "contact": "Contact"
        },
        "blog": {
            "title": "Blog",
            "readMore": "Read more",
            "publishedOn": "Published on",
            "updatedOn": "Updated on",
            "noPosts": "Nothing has been published yet.",
            "backToList": "All posts"
        },
        "contact": {
            "title": "Get in touch",
            "name": "Name",
            "email": "Email",
            "message": "Message",
            "submit": "Send",
            "sending": "Sending...",
            "success": "Thanks, your message has been sent.",
            "failure": "Your message could not be sent. Please try again later."
        },
        "footer": {
            "copyright": "All rights reserved.",
            "poweredBy": "Powered by Folio"
        }
    })
});

/// A fully populated locale document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Locale(Value);

impl Locale {
    /// Returns the string at a dot-separated path, if there is one.
    pub fn get(&self, path: &str) -> Option<&str> {
        try_get_as(&self.0, path, Value::as_str)
    }

    /// Returns the string at `path`, or `""` for paths outside the locale
    /// shape.
    pub fn text(&self, path: &str) -> &str {
        self.get(path).unwrap_or_default()
    }

    /// Returns the underlying document.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the locale, returning the underlying document.
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale((*DEFAULT_LOCALE).clone())
    }
}

/// Fills a sparse locale document against [`DEFAULT_LOCALE`].
pub fn build_locale(raw: &Value) -> Locale {
    Locale(fill(&DEFAULT_LOCALE, Some(raw)))
}

/// Recursively fills `raw` against a shape-defining `default`.
pub fn fill(default: &Value, raw: Option<&Value>) -> Value {
    match default {
        Value::Object(defaults) => {
            let raw = raw.and_then(Value::as_object);
            Value::Object(
                defaults
                    .iter()
                    .map(|(key, value)| {
                        (key.clone(), fill(value, raw.and_then(|raw| raw.get(key))))
                    })
                    .collect(),
            )
        }
        leaf => match raw {
            Some(value) if discriminant(value) == discriminant(leaf) => value.clone(),
            _ => leaf.clone(),
        },
    }
}
