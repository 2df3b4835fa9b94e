//! # Folio Render - Theme Resolution and Stylesheet Compilation
//!
//! `folio-render` turns untrusted theme documents into CSS custom properties
//! for the Folio personal site. Themes are plain JSON (or YAML) data: colour
//! palettes, backgrounds, spacing scales, typography, graphics and fonts,
//! grouped into named sections that page areas opt into.
//!
//! ## Core Concepts
//!
//! - [`get_section`]: Resolve a section into literal colours, background and scale
//! - [`get_palette`], [`get_background`], [`get_scale`]: Resolve individual entities
//! - [`StyleCompiler`]: Compile theme documents into one stylesheet
//! - [`ThemeSet`]: Named theme documents loaded from files or directories
//! - [`ThemeContext`]: The currently selected theme and graphic
//! - [`build_locale`]: Fill a sparse locale document against the default
//!
//! ## Quick Start
//!
//! ```rust
//! use folio_render::{compile_styles, get_section};
//! use indexmap::IndexMap;
//! use serde_json::json;
//!
//! let theme = json!({
//!     "sections": { "hero": { "palette": "night" } },
//!     "palettes": { "night": { "background": "#000000", "text": "#EEEEEE" } }
//! });
//!
//! let hero = get_section(&theme, Some("hero"));
//! assert_eq!(hero.palette["text"], "#EEEEEE");
//! assert_eq!(hero.palette["accent"], "#0055AA");
//! assert_eq!(hero.background.fill.as_deref(), Some("#000000"));
//!
//! let mut themes = IndexMap::new();
//! themes.insert("night".to_string(), theme);
//! let css = compile_styles(Some(&themes));
//! assert!(css.contains(".theme-night {"));
//! assert!(css.contains("--colour-text: #EEEEEE;"));
//! ```
//!
//! ## Untrusted Input
//!
//! None of the resolvers return errors. Anything missing or malformed falls
//! back to the theme's `default` entity and then to the built-in
//! [`DEFAULT_THEME`], so every page area always gets a complete set of
//! values. Only loading documents from disk can fail, with [`ThemeError`].
//!
//! ## URLs
//!
//! Image and font sources are resolved against an optional base, which can be
//! a path prefix or an absolute URL:
//!
//! ```rust
//! use folio_render::resolve_url;
//!
//! assert_eq!(resolve_url("img/a.png", Some("/static")), "/static/img/a.png");
//! assert_eq!(
//!     resolve_url("img/a.png", Some("https://cdn.example.com/site/")),
//!     "https://cdn.example.com/site/img/a.png"
//! );
//! assert_eq!(resolve_url("https://x.org/a.png", Some("/static")), "https://x.org/a.png");
//! ```

pub mod context;
pub mod document;
mod error;
pub mod guard;
pub mod locale;
pub mod stylesheet;
pub mod theme;
mod util;

pub use error::{Result, ThemeError};

pub use theme::{
    get_all_graphics, get_all_sections, get_all_typography, get_background, get_font, get_fonts,
    get_graphic, get_palette, get_scale, get_section, get_typography, FontDescriptor, Graphic,
    ImageMode, Palette, ResolvedBackground, ResolvedImage, Scale, Section, Typography, DEFAULT_KEY,
    DEFAULT_THEME,
};

pub use stylesheet::{compile_styles, StyleCompiler, CSS_CONTENT_TYPE};

pub use document::{ThemeDocument, ThemeSet, THEME_EXTENSIONS};

pub use context::ThemeContext;

pub use locale::{build_locale, Locale, DEFAULT_LOCALE};

pub use guard::{try_get, try_get_as};

pub use util::{is_absolute_url, kebab_case, resolve_url};
