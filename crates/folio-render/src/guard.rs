//! Type guards and safe nested lookups over untrusted JSON.
//!
//! Theme and locale documents arrive as arbitrary [`serde_json::Value`]s. Every
//! read from them goes through this module so that malformed input never
//! panics and never needs ad hoc `match` ladders at the call site.
//!
//! Two primitives cover all lookups:
//!
//! - [`try_get`] walks a dot-separated path and returns the value only if it
//!   satisfies a predicate.
//! - [`try_get_as`] walks the same path and converts the value with a guard
//!   (`Value::as_str`, `Value::as_object`, ...), yielding `None` when the
//!   guard rejects it.
//!
//! ```rust
//! use folio_render::guard::{try_get, try_get_as};
//! use serde_json::{json, Value};
//!
//! let theme = json!({ "sections": { "default": { "palette": "night" } } });
//!
//! assert_eq!(
//!     try_get_as(&theme, "sections.default.palette", Value::as_str),
//!     Some("night")
//! );
//! assert!(try_get(&theme, "sections.default.palette.deeper", Value::is_string).is_none());
//! assert!(try_get_as(&Value::Null, "sections", Value::as_object).is_none());
//! ```
//!
//! Path segments are plain property names. There is no array indexing and no
//! escaping: a segment containing a dot cannot be addressed.

use serde_json::{Map, Value};

/// Returns the value at `path` if it exists and satisfies `pred`.
///
/// An empty path addresses `value` itself. Traversal stops with `None` as soon
/// as an intermediate value is not an object or lacks the next segment.
pub fn try_get<'a, P>(value: &'a Value, path: &str, pred: P) -> Option<&'a Value>
where
    P: Fn(&Value) -> bool,
{
    let target = walk(value, path)?;
    pred(target).then_some(target)
}

/// Returns the value at `path` converted by `guard`, or `None`.
///
/// This is the typed form of [`try_get`]: the guard both validates and
/// narrows, e.g. `Value::as_str` yields `Option<&str>`.
pub fn try_get_as<'a, T, G>(value: &'a Value, path: &str, guard: G) -> Option<T>
where
    G: Fn(&'a Value) -> Option<T>,
{
    walk(value, path).and_then(guard)
}

/// Returns `value.<collection>.<key>` when it is an object.
///
/// Keys are looked up literally, so entity names containing dots still work.
pub fn object_entry<'a>(value: &'a Value, collection: &str, key: &str) -> Option<&'a Map<String, Value>> {
    value.get(collection)?.as_object()?.get(key)?.as_object()
}

/// Returns `value.<collection>` when it is an object.
pub fn collection<'a>(value: &'a Value, collection: &str) -> Option<&'a Map<String, Value>> {
    value.get(collection)?.as_object()
}

/// Predicate: the value is a JSON object.
pub fn is_object(value: &Value) -> bool {
    value.is_object()
}

/// Predicate: the value is a JSON string.
pub fn is_string(value: &Value) -> bool {
    value.is_string()
}

/// Predicate: the value is a JSON number.
pub fn is_number(value: &Value) -> bool {
    value.is_number()
}

/// Guard accepting strings as-is and numbers in their JSON text form.
///
/// Used for CSS values that authors commonly write as bare numbers, such as
/// `weight: 700` or `lineHeight: 1.4`.
pub fn string_or_number(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn walk<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }
    path.split('.')
        .try_fold(value, |current, segment| current.as_object()?.get(segment))
}
