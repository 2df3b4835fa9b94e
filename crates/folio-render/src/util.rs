//! Naming and URL helpers shared by the stylesheet compiler.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static ACRONYM_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("static regex"));
static CASE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z])([A-Z])").expect("static regex"));
static LETTER_DIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z])([0-9])").expect("static regex"));
static DIGIT_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9])([A-Za-z])").expect("static regex"));
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s_]+").expect("static regex"));

/// Converts a camelCase identifier to kebab-case.
///
/// Words split on lower-to-upper transitions, at the end of an uppercase run
/// (`ACRONYMTest` becomes `acronym-test`), and between letters and digits.
/// Underscores and whitespace become hyphens.
///
/// # Example
///
/// ```rust
/// use folio_render::kebab_case;
///
/// assert_eq!(kebab_case("camelCaseACRONYMTest"), "camel-case-acronym-test");
/// assert_eq!(kebab_case("camelCaseWith123Numbers"), "camel-case-with-123-numbers");
/// assert_eq!(kebab_case("default"), "default");
/// ```
pub fn kebab_case(input: &str) -> String {
    let s = SEPARATORS.replace_all(input, "-");
    let s = ACRONYM_BOUNDARY.replace_all(&s, "$1-$2");
    let s = CASE_BOUNDARY.replace_all(&s, "$1-$2");
    let s = LETTER_DIGIT.replace_all(&s, "$1-$2");
    let s = DIGIT_LETTER.replace_all(&s, "$1-$2");
    s.to_lowercase()
}

/// Returns true for `http://` and `https://` URLs.
pub fn is_absolute_url(path: &str) -> bool {
    let lower = path.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Resolves a resource path against an optional base.
///
/// Absolute `http(s)` paths pass through unchanged. Anything else is joined to
/// the base with `/`, collapsing repeated slashes and dropping `.` segments.
/// When the base is itself an absolute URL, the joined path replaces the
/// base URL's path. The query and fragment always come from `path`; those of
/// an absolute base are dropped.
///
/// # Example
///
/// ```rust
/// use folio_render::resolve_url;
///
/// assert_eq!(resolve_url("img/hero.png", Some("/static/")), "/static/img/hero.png");
/// assert_eq!(resolve_url("./img//a.png", Some("assets")), "assets/img/a.png");
/// assert_eq!(
///     resolve_url("https://cdn.example.com/a.png", Some("/static")),
///     "https://cdn.example.com/a.png"
/// );
/// assert_eq!(
///     resolve_url("fonts/a.woff2", Some("https://cdn.example.com/site")),
///     "https://cdn.example.com/site/fonts/a.woff2"
/// );
/// ```
pub fn resolve_url(path: &str, base: Option<&str>) -> String {
    if is_absolute_url(path) {
        return path.to_string();
    }

    let (path, query, fragment) = split_suffix(path);
    let base = base.unwrap_or("");
    if is_absolute_url(base) {
        if let Ok(mut url) = Url::parse(base.trim()) {
            let joined = join_paths(url.path(), path);
            let joined = if joined.starts_with('/') {
                joined
            } else {
                format!("/{}", joined)
            };
            url.set_path(&joined);
            url.set_query(query);
            url.set_fragment(fragment);
            return url.to_string();
        }
    }

    let mut out = join_paths(base, path);
    if let Some(query) = query {
        out.push('?');
        out.push_str(query);
    }
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

/// Splits `path?query#fragment` into its three parts.
fn split_suffix(path: &str) -> (&str, Option<&str>, Option<&str>) {
    let (rest, fragment) = match path.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (path, None),
    };
    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };
    (path, query, fragment)
}

fn join_paths(base: &str, path: &str) -> String {
    let combined = if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path)
    };
    let leading = combined.starts_with('/');
    let segments: Vec<&str> = combined
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();

    let mut out = segments.join("/");
    if leading {
        out.insert(0, '/');
    }
    out
}

static CSS_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[_a-zA-Z][_a-zA-Z0-9-]*$").expect("static regex"));
static CSS_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[_a-zA-Z0-9-]+$").expect("static regex"));

/// True if `name` can be used as a class selector on its own.
pub(crate) fn is_css_identifier(name: &str) -> bool {
    CSS_IDENTIFIER.is_match(name)
}

/// True if `name` can follow a fixed prefix in a selector or custom
/// property name, e.g. the `hero` in `.section-hero`.
pub(crate) fn is_css_name(name: &str) -> bool {
    CSS_NAME.is_match(name)
}

/// True if `value` can be written as a declaration value without ending the
/// declaration or the enclosing block.
pub(crate) fn is_css_value(value: &str) -> bool {
    !value.trim().is_empty()
        && !value
            .chars()
            .any(|c| matches!(c, ';' | '{' | '}' | '<' | '>') || c.is_control())
}

/// Quotes a value as a CSS string token.
pub(crate) fn css_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\a "),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Wraps a resolved URL in a CSS `url()` function.
pub(crate) fn css_url(value: &str) -> String {
    format!("url({})", css_string(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // kebab_case
    // =========================================================================

    #[test]
    fn test_kebab_case_camel() {
        assert_eq!(kebab_case("camelCase"), "camel-case");
        assert_eq!(kebab_case("PascalCase"), "pascal-case");
    }

    #[test]
    fn test_kebab_case_acronym_run() {
        assert_eq!(kebab_case("camelCaseACRONYMTest"), "camel-case-acronym-test");
        assert_eq!(kebab_case("HTMLElement"), "html-element");
        assert_eq!(kebab_case("endsWithURL"), "ends-with-url");
    }

    #[test]
    fn test_kebab_case_digits() {
        assert_eq!(kebab_case("camelCaseWith123Numbers"), "camel-case-with-123-numbers");
        assert_eq!(kebab_case("h1"), "h-1");
    }

    #[test]
    fn test_kebab_case_single_letter_words() {
        assert_eq!(kebab_case("aBcD"), "a-bc-d");
    }

    #[test]
    fn test_kebab_case_separators() {
        assert_eq!(kebab_case("snake_case name"), "snake-case-name");
        assert_eq!(kebab_case("already-kebab"), "already-kebab");
    }

    #[test]
    fn test_kebab_case_plain() {
        assert_eq!(kebab_case("default"), "default");
        assert_eq!(kebab_case(""), "");
    }

    // =========================================================================
    // resolve_url
    // =========================================================================

    #[test]
    fn test_resolve_url_absolute_passthrough() {
        assert_eq!(
            resolve_url("http://example.com//x/./y.png", Some("/base")),
            "http://example.com//x/./y.png"
        );
        assert_eq!(resolve_url("HTTPS://example.com/a", None), "HTTPS://example.com/a");
    }

    #[test]
    fn test_resolve_url_relative_to_base() {
        assert_eq!(resolve_url("img/a.png", Some("/static")), "/static/img/a.png");
        assert_eq!(resolve_url("/img/a.png", Some("/static/")), "/static/img/a.png");
    }

    #[test]
    fn test_resolve_url_collapses_and_drops_dot_segments() {
        assert_eq!(resolve_url("./a//./b.png", Some("/x/./")), "/x/a/b.png");
    }

    #[test]
    fn test_resolve_url_without_base() {
        assert_eq!(resolve_url("/a//b.png", None), "/a/b.png");
        assert_eq!(resolve_url("a.png", None), "a.png");
        assert_eq!(resolve_url("a.png", Some("")), "a.png");
    }

    #[test]
    fn test_resolve_url_absolute_base() {
        assert_eq!(
            resolve_url("img/a.png", Some("https://cdn.example.com/assets/")),
            "https://cdn.example.com/assets/img/a.png"
        );
        assert_eq!(
            resolve_url("a.png", Some("https://cdn.example.com")),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn test_resolve_url_keeps_query_and_fragment() {
        assert_eq!(
            resolve_url("fonts/a.woff2?v=2#iefix", Some("/static")),
            "/static/fonts/a.woff2?v=2#iefix"
        );
        assert_eq!(
            resolve_url("fonts/a.woff2?v=2#iefix", Some("https://cdn.example.com/site")),
            "https://cdn.example.com/site/fonts/a.woff2?v=2#iefix"
        );
        assert_eq!(resolve_url("a.png#top", None), "a.png#top");
        assert_eq!(resolve_url("a.png?x=a//b", Some("/s")), "/s/a.png?x=a//b");
    }

    #[test]
    fn test_resolve_url_drops_base_query() {
        assert_eq!(
            resolve_url("a.png", Some("https://cdn.example.com/site?token=1")),
            "https://cdn.example.com/site/a.png"
        );
        assert_eq!(
            resolve_url("a.png", Some("https://cdn.example.com/site#frag")),
            "https://cdn.example.com/site/a.png"
        );
    }

    // =========================================================================
    // CSS quoting
    // =========================================================================

    #[test]
    fn test_css_string_escapes() {
        assert_eq!(css_string("plain"), "\"plain\"");
        assert_eq!(css_string("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(css_string("a\\b"), "\"a\\\\b\"");
    }

    #[test]
    fn test_css_identifiers_and_values() {
        assert!(is_css_identifier("ink"));
        assert!(is_css_identifier("-dark_mode2"));
        assert!(!is_css_identifier("a, body"));
        assert!(!is_css_identifier("2col"));
        assert!(!is_css_identifier(""));

        assert!(is_css_name("hero-2"));
        assert!(!is_css_name("a,-body"));

        assert!(is_css_value("#FFF"));
        assert!(is_css_value("0.03em 0.06em 0 rgb(0, 0, 0)"));
        assert!(!is_css_value("red;}body{color:red"));
        assert!(!is_css_value("red\n"));
        assert!(!is_css_value(" "));
    }

    #[test]
    fn test_css_url() {
        assert_eq!(css_url("/a.png"), "url(\"/a.png\")");
    }
}
