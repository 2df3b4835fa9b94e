//! Theme to CSS compilation.

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;
use tracing::{debug, trace, warn};

use super::rule::Rule;
use crate::theme::{
    get_all_graphics, get_all_sections, get_all_typography, get_fonts, FontDescriptor, Graphic,
    ImageMode, Palette, Section, Typography, DEFAULT_KEY, DEFAULT_THEME, INSET, SPACING,
};
use crate::util::{
    css_string, css_url, is_css_identifier, is_css_name, is_css_value, kebab_case, resolve_url,
};

/// Value used for optional typography properties a theme leaves unset.
const INHERIT: &str = "inherit";

/// Compiles resolved themes into CSS text.
///
/// The compiler carries the asset base path used to resolve image and font
/// URLs. It is cheap to construct and holds no other state.
///
/// # Example
///
/// ```rust
/// use folio_render::StyleCompiler;
/// use indexmap::IndexMap;
/// use serde_json::json;
///
/// let mut themes = IndexMap::new();
/// themes.insert(
///     "light".to_string(),
///     json!({ "backgrounds": { "default": { "img": { "src": "paper.png" } } } }),
/// );
///
/// let css = StyleCompiler::new().with_base("/static").compile(Some(&themes));
/// assert!(css.contains(".theme-light {"));
/// assert!(css.contains("--bg-img: url(\"/static/paper.png\");"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleCompiler {
    base: Option<String>,
}

impl StyleCompiler {
    /// Creates a compiler without a base path.
    pub fn new() -> Self {
        Self { base: None }
    }

    /// Sets the base path relative URLs are resolved against.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Returns the configured base path.
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// Compiles a map of named themes.
    ///
    /// `None` compiles the built-in default theme under `.theme-default`.
    pub fn compile(&self, themes: Option<&IndexMap<String, Value>>) -> String {
        match themes {
            Some(themes) => self.compile_all(themes.iter().map(|(key, theme)| (key.as_str(), theme))),
            None => self.compile_all([(DEFAULT_KEY, &*DEFAULT_THEME)]),
        }
    }

    /// Compiles named themes given as `(key, document)` pairs, in order.
    ///
    /// Font declarations are collected across all themes and emitted once
    /// each, before the theme blocks.
    pub fn compile_all<'a, I>(&self, themes: I) -> String
    where
        I: IntoIterator<Item = (&'a str, &'a Value)>,
    {
        let themes: Vec<(&str, &Value)> = themes.into_iter().collect();

        let mut fragments = self.compile_fonts(themes.iter().map(|(_, theme)| *theme));
        fragments.extend(
            themes
                .iter()
                .map(|(key, theme)| self.compile_theme(key, theme)),
        );

        fragments
            .into_iter()
            .filter(|fragment| !fragment.trim().is_empty())
            .map(|fragment| fragment.trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n\n")
            + "\n"
    }

    /// Compiles one theme's `.theme-<key>` block, without font declarations.
    ///
    /// A key that is not a valid class name suffix compiles to nothing.
    pub fn compile_theme(&self, key: &str, theme: &Value) -> String {
        if !is_css_name(key) {
            warn!(theme = key, "skipping theme with invalid class name");
            return String::new();
        }

        let sections = get_all_sections(theme);
        let typography = get_all_typography(theme);
        let graphics = get_all_graphics(theme);

        let mut block = Rule::new(format!(".theme-{}", key));
        for (name, section) in &sections {
            if let Some(rule) = self.section_rule(name, section, &typography, &graphics) {
                block.nest(rule);
            }
        }

        debug!(
            theme = key,
            sections = sections.len(),
            typography = typography.len(),
            graphics = graphics.len(),
            "compiled theme"
        );
        block.render()
    }

    fn compile_fonts<'a>(&self, themes: impl Iterator<Item = &'a Value>) -> Vec<String> {
        let mut imports = IndexSet::new();
        let mut faces = IndexSet::new();

        for theme in themes {
            for font in get_fonts(theme).into_values() {
                match font {
                    FontDescriptor::Import { url } => {
                        imports.insert(format!("@import {};", css_url(&self.url(&url))));
                    }
                    FontDescriptor::Face {
                        family,
                        src,
                        weight,
                        style,
                    } => {
                        let mut face = Rule::new("@font-face");
                        face.declare("font-family", css_string(&family));
                        face.declare("src", css_url(&self.url(&src)));
                        if let Some(weight) = weight {
                            declare_value(&mut face, "font-weight", &weight);
                        }
                        if let Some(style) = style {
                            declare_value(&mut face, "font-style", &style);
                        }
                        faces.insert(face.render());
                    }
                }
            }
        }

        let imports: Vec<String> = imports.into_iter().collect();
        let mut fragments = vec![imports.join("\n")];
        fragments.extend(faces);
        fragments
    }

    fn section_rule(
        &self,
        name: &str,
        section: &Section,
        typography: &IndexMap<String, Typography>,
        graphics: &IndexMap<String, Graphic>,
    ) -> Option<Rule> {
        let mut rule = named_rule(".section-", name)?;

        for (size, value) in &section.scale {
            declare_named(&mut rule, "--scale-", size, value);
        }
        if let Some(inset) = section.scale.get(INSET) {
            declare_value(&mut rule, "--padding-inset", inset);
        }
        if let Some(spacing) = section.scale.get(SPACING) {
            declare_value(&mut rule, "--layout-spacing", spacing);
        }

        for (role, colour) in &section.palette {
            declare_named(&mut rule, "--colour-", role, colour);
        }

        let background = &section.background;
        let img = background.img.as_ref();
        let mode = img.map(|img| img.mode);
        rule.declare(
            "--bg-colour",
            background
                .fill
                .as_deref()
                .filter(|fill| is_css_value(fill))
                .unwrap_or("transparent"),
        );
        rule.declare(
            "--bg-img",
            img.map(|img| css_url(&self.url(&img.src)))
                .unwrap_or_else(|| "none".to_string()),
        );
        rule.declare(
            "--bg-repeat",
            if mode == Some(ImageMode::Tile) {
                "repeat"
            } else {
                "no-repeat"
            },
        );
        rule.declare(
            "--bg-size",
            if mode == Some(ImageMode::Cover) {
                "cover"
            } else {
                "auto"
            },
        );
        rule.declare(
            "--bg-opacity",
            img.and_then(|img| img.opacity).unwrap_or(1.0).to_string(),
        );

        if let Some(colour_map) = img.and_then(|img| img.colour_map.as_ref()) {
            for (class, colour) in colour_map {
                if let Some(child) = colour_rule(class, colour) {
                    rule.nest(child);
                }
            }
        }

        for (key, entry) in typography {
            if let Some(child) = typography_rule(key, entry, &section.palette) {
                rule.nest(child);
            }
        }

        for (key, graphic) in graphics {
            if let Some(child) = self.graphic_rule(key, graphic, &section.palette) {
                rule.nest(child);
            }
        }

        Some(rule)
    }

    fn graphic_rule(&self, key: &str, graphic: &Graphic, palette: &Palette) -> Option<Rule> {
        let mut rule = named_rule(".graphic-", key)?;
        rule.declare("--img-src", css_url(&self.url(&graphic.src)));
        rule.declare("--img-alt", css_string(&graphic.alt));

        for (class, reference) in &graphic.colour_map {
            if let Some(child) = palette
                .get(reference)
                .and_then(|colour| colour_rule(class, colour))
            {
                rule.nest(child);
            }
        }
        Some(rule)
    }

    fn url(&self, path: &str) -> String {
        resolve_url(path, self.base())
    }
}

/// Starts a rule for `<prefix><kebab name>`, or `None` if the name would
/// not form a valid selector.
fn named_rule(prefix: &str, name: &str) -> Option<Rule> {
    let name = kebab_case(name);
    if is_css_name(&name) {
        Some(Rule::new(format!("{}{}", prefix, name)))
    } else {
        trace!(name = name.as_str(), "skipping rule with invalid name");
        None
    }
}

/// Declares `value` unless it would break out of the declaration.
fn declare_value(rule: &mut Rule, property: &str, value: &str) {
    if is_css_value(value) {
        rule.declare(property, value);
    } else {
        trace!(property, "dropping unsafe declaration value");
    }
}

/// Declares `<prefix><kebab name>: value` when both parts are safe.
fn declare_named(rule: &mut Rule, prefix: &str, name: &str, value: &str) {
    let name = kebab_case(name);
    if is_css_name(&name) {
        declare_value(rule, &format!("{}{}", prefix, name), value);
    } else {
        trace!(name = name.as_str(), "dropping custom property with invalid name");
    }
}

/// A `.class { color }` rule. Class names are used as written, so they must
/// be identifiers.
fn colour_rule(class: &str, colour: &str) -> Option<Rule> {
    if !is_css_identifier(class) || !is_css_value(colour) {
        trace!(class, "skipping colour-map entry");
        return None;
    }
    let mut rule = Rule::new(format!(".{}", class));
    rule.declare("color", colour);
    Some(rule)
}

fn typography_rule(key: &str, typography: &Typography, palette: &Palette) -> Option<Rule> {
    let optional = |value: &Option<String>| {
        value
            .as_deref()
            .filter(|value| is_css_value(value))
            .unwrap_or(INHERIT)
            .to_string()
    };
    let colour = typography
        .colour
        .as_ref()
        .and_then(|reference| palette.get(reference))
        .cloned();
    let shadow = typography
        .shadow
        .as_ref()
        .and_then(|reference| palette.get(reference))
        .filter(|colour| is_css_value(colour))
        .map(|colour| format!("0.03em 0.06em 0 {}", colour))
        .unwrap_or_else(|| "none".to_string());

    let mut rule = named_rule(".typography-", key)?;
    declare_value(&mut rule, "--font-family", &typography.family);
    declare_value(&mut rule, "--font-size", &typography.size);
    rule.declare("--font-weight", optional(&typography.weight));
    rule.declare("--font-style", optional(&typography.style));
    rule.declare("--line-height", optional(&typography.line_height));
    rule.declare("--letter-spacing", optional(&typography.letter_spacing));
    rule.declare("--text-decoration", optional(&typography.text_decoration));
    rule.declare("--text-colour", optional(&colour));
    rule.declare("--text-shadow", shadow);
    Some(rule)
}

/// Compiles themes with a compiler that has no base path.
///
/// This is the entry point the HTTP layer uses to serve `theme.css`; the
/// result is sent with [`CSS_CONTENT_TYPE`](super::CSS_CONTENT_TYPE).
///
/// # Example
///
/// ```rust
/// let css = folio_render::compile_styles(None);
/// assert!(css.contains(".theme-default {"));
/// assert!(css.contains("--bg-colour: #FFFFFF;"));
/// ```
pub fn compile_styles(themes: Option<&IndexMap<String, Value>>) -> String {
    StyleCompiler::new().compile(themes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn themes(entries: Vec<(&str, Value)>) -> IndexMap<String, Value> {
        entries
            .into_iter()
            .map(|(key, theme)| (key.to_string(), theme))
            .collect()
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    // =========================================================================
    // Default theme
    // =========================================================================

    #[test]
    fn test_default_compiles_builtin() {
        let css = compile_styles(None);
        assert!(css.starts_with(".theme-default {\n  .section-default {\n"));
        assert!(css.contains("    --bg-colour: #FFFFFF;\n"));
        assert!(css.contains("    --colour-background: #FFFFFF;\n"));
        assert!(css.contains("    --padding-inset: 1.5rem;\n"));
        assert!(css.contains("    --layout-spacing: 1rem;\n"));
        assert!(css.contains("    --bg-img: none;\n"));
        assert!(css.contains("    --bg-repeat: no-repeat;\n"));
        assert!(css.contains("    --bg-size: auto;\n"));
        assert!(css.contains("    --bg-opacity: 1;\n"));
        assert!(css.contains("    .typography-default {\n"));
        assert!(css.ends_with("}\n"));
    }

    #[test]
    fn test_empty_map_compiles_to_nothing() {
        assert_eq!(compile_styles(Some(&IndexMap::new())).trim(), "");
    }

    // =========================================================================
    // Theme and section blocks
    // =========================================================================

    #[test]
    fn test_one_block_per_theme() {
        let css = compile_styles(Some(&themes(vec![
            ("theme1", json!({ "sections": { "hero": {} } })),
            ("theme2", json!({})),
        ])));
        assert_eq!(count(&css, ".theme-theme1 {"), 1);
        assert_eq!(count(&css, ".theme-theme2 {"), 1);
        assert_eq!(count(&css, ".section-hero {"), 1);
        assert_eq!(count(&css, ".section-default {"), 2);
    }

    #[test]
    fn test_section_names_are_kebab_cased() {
        let css = compile_styles(Some(&themes(vec![(
            "t",
            json!({ "sections": { "heroBanner": {} }, "palettes": { "default": { "darkText": "#111" } } }),
        )])));
        assert!(css.contains(".section-hero-banner {"));
        assert!(css.contains("--colour-dark-text: #111;"));
    }

    #[test]
    fn test_scale_entries() {
        let css = compile_styles(Some(&themes(vec![(
            "t",
            json!({ "scales": { "default": { "test": "testSize", "inset": "3rem" } } }),
        )])));
        assert!(css.contains("--scale-test: testSize;"));
        assert!(css.contains("--scale-inset: 3rem;"));
        assert!(css.contains("--padding-inset: 3rem;"));
    }

    #[test]
    fn test_background_image_declarations() {
        let theme = json!({
            "palettes": { "default": { "primary": "#123456" } },
            "backgrounds": {
                "default": {
                    "fill": "primary",
                    "img": {
                        "src": "img/paper.png",
                        "mode": "tile",
                        "opacity": 0.5,
                        "colourMap": { "ink": "primary", "lost": "missing" }
                    }
                }
            }
        });
        let css = StyleCompiler::new()
            .with_base("/static/")
            .compile(Some(&themes(vec![("t", theme)])));
        assert!(css.contains("--bg-colour: #123456;"));
        assert!(css.contains("--bg-img: url(\"/static/img/paper.png\");"));
        assert!(css.contains("--bg-repeat: repeat;"));
        assert!(css.contains("--bg-size: auto;"));
        assert!(css.contains("--bg-opacity: 0.5;"));
        assert!(css.contains("    .ink {\n      color: #123456;\n    }\n"));
        assert!(!css.contains(".lost"));
    }

    #[test]
    fn test_cover_mode_and_unresolved_fill() {
        let theme = json!({
            "backgrounds": { "default": { "fill": "missing", "img": { "src": "a.png" } } }
        });
        let css = compile_styles(Some(&themes(vec![("t", theme)])));
        assert!(css.contains("--bg-colour: transparent;"));
        assert!(css.contains("--bg-size: cover;"));
        assert!(css.contains("--bg-repeat: no-repeat;"));
    }

    // =========================================================================
    // Typography and graphics
    // =========================================================================

    #[test]
    fn test_typography_block() {
        let theme = json!({
            "palettes": { "default": { "ink": "#222222", "glow": "#FF00FF" } },
            "typography": {
                "bodyText": { "family": "Inter", "size": "1.1rem", "weight": 400, "colour": "ink", "shadow": "glow" },
                "plain": { "colour": "nope" }
            }
        });
        let css = compile_styles(Some(&themes(vec![("t", theme)])));
        assert!(css.contains(".typography-body-text {"));
        assert!(css.contains("--font-family: Inter;"));
        assert!(css.contains("--font-weight: 400;"));
        assert!(css.contains("--font-style: inherit;"));
        assert!(css.contains("--text-colour: #222222;"));
        assert!(css.contains("--text-shadow: 0.03em 0.06em 0 #FF00FF;"));

        let plain = css.split(".typography-plain {").nth(1).unwrap();
        let plain = &plain[..plain.find('}').unwrap()];
        assert!(plain.contains("--text-colour: inherit;"));
        assert!(plain.contains("--text-shadow: none;"));
        assert!(plain.contains("--font-family: sans-serif;"));
    }

    #[test]
    fn test_graphic_block() {
        let theme = json!({
            "palettes": { "default": { "brand": "#AA0000" } },
            "graphics": {
                "siteLogo": {
                    "src": "logo.svg",
                    "alt": "The \"logo\"",
                    "colourMap": { "mark": "brand", "gone": "missing" }
                }
            }
        });
        let css = StyleCompiler::new()
            .with_base("https://cdn.example.com/assets")
            .compile(Some(&themes(vec![("t", theme)])));
        assert!(css.contains(".graphic-site-logo {"));
        assert!(css.contains("--img-src: url(\"https://cdn.example.com/assets/logo.svg\");"));
        assert!(css.contains("--img-alt: \"The \\\"logo\\\"\";"));
        assert!(css.contains(".mark {"));
        assert!(css.contains("color: #AA0000;"));
        assert!(!css.contains(".gone"));
    }

    // =========================================================================
    // Fonts
    // =========================================================================

    #[test]
    fn test_fonts_deduplicated_across_themes() {
        let fonts = json!({
            "inter": { "import": "https://fonts.example.com/inter.css" },
            "body": { "family": "Body", "src": "fonts/body.woff2" }
        });
        let css = StyleCompiler::new().with_base("/static").compile(Some(&themes(vec![
            ("one", json!({ "fonts": fonts.clone() })),
            ("two", json!({ "fonts": fonts })),
        ])));
        assert_eq!(
            count(&css, "@import url(\"https://fonts.example.com/inter.css\");"),
            1
        );
        assert_eq!(count(&css, "@font-face {"), 1);
        assert!(css.contains("  src: url(\"/static/fonts/body.woff2\");\n"));
        assert!(css.contains("  font-family: \"Body\";\n"));
    }

    #[test]
    fn test_imports_precede_faces() {
        let css = compile_styles(Some(&themes(vec![
            ("one", json!({ "fonts": { "body": { "family": "Body", "src": "body.woff2" } } })),
            ("two", json!({ "fonts": { "hosted": { "import": "https://x.example/f.css" } } })),
        ])));
        let import = css.find("@import").unwrap();
        let face = css.find("@font-face").unwrap();
        let theme = css.find(".theme-one").unwrap();
        assert!(import < face);
        assert!(face < theme);
    }

    // =========================================================================
    // Untrusted names and values
    // =========================================================================

    #[test]
    fn test_unsafe_names_and_values_are_dropped() {
        let css = compile_styles(Some(&themes(vec![(
            "site",
            json!({
                "palettes": { "default": { "ink": "#111", "evil": "red;}body{color:red" } },
                "scales": { "default": { "bad": "1rem}" } },
                "backgrounds": {
                    "default": {
                        "img": { "src": "a.svg", "colourMap": { "a, body": "ink", "ok": "ink", "x": "evil" } }
                    }
                },
                "graphics": { "logo": { "src": "logo.svg", "colourMap": { "b{}": "ink", "mark": "ink" } } },
                "typography": { "body": { "family": "Body", "size": "1rem", "weight": "700;}" } }
            }),
        )])));

        assert!(!css.contains("a, body"));
        assert!(!css.contains("b{}"));
        assert!(!css.contains("body{"));
        assert!(!css.contains("1rem}"));
        assert!(!css.contains("700;"));
        assert!(!css.contains(".x {"));
        assert!(css.contains("--colour-ink: #111;"));
        assert!(css.contains(".ok {"));
        assert!(css.contains(".mark {"));
        assert!(css.contains("--font-weight: inherit;"));
        assert_eq!(count(&css, "{"), count(&css, "}"));
    }

    #[test]
    fn test_invalid_theme_key_is_skipped() {
        let css = compile_styles(Some(&themes(vec![
            ("a, body", json!({})),
            ("light", json!({})),
        ])));
        assert!(!css.contains("a, body"));
        assert_eq!(count(&css, ".theme-"), 1);
        assert!(css.starts_with(".theme-light {"));
    }

    #[test]
    fn test_fragments_separated_by_blank_lines() {
        let css = compile_styles(Some(&themes(vec![("a", json!({})), ("b", json!({}))])));
        assert!(css.contains("}\n\n.theme-b {"));
        assert!(!css.contains("\n\n\n"));
    }
}
