//! Stylesheet compilation.
//!
//! Turns one or more theme documents into a single CSS text. Components on
//! the page never read theme data directly; they read CSS custom properties
//! scoped by two classes:
//!
//! - `.theme-<key>` on the page root selects a theme
//! - `.section-<name>` on a page area selects a section within it
//!
//! ## Output Shape
//!
//! ```css
//! @import url("https://fonts.example.com/inter.css");
//!
//! @font-face {
//!   font-family: "Body";
//!   src: url("/static/fonts/body.woff2");
//! }
//!
//! .theme-default {
//!   .section-default {
//!     --scale-inset: 1.5rem;
//!     --scale-spacing: 1rem;
//!     --padding-inset: 1.5rem;
//!     --layout-spacing: 1rem;
//!     --colour-background: #FFFFFF;
//!     --bg-colour: #FFFFFF;
//!     --bg-img: none;
//!     --bg-repeat: no-repeat;
//!     --bg-size: auto;
//!     --bg-opacity: 1;
//!     .typography-default {
//!       --font-family: sans-serif;
//!       --font-size: 1rem;
//!       --font-weight: inherit;
//!       ...
//!     }
//!   }
//! }
//! ```
//!
//! Rules inside a theme use CSS nesting, so each theme contributes exactly one
//! top-level block. Identifiers (section, typography, graphic and palette
//! names) are kebab-cased; colour-map class names are used as written.
//!
//! Font declarations are deduplicated across all compiled themes by their
//! exact text. `@import` statements come first, since CSS ignores imports
//! that follow other rules.

mod compiler;
mod rule;

pub use compiler::{compile_styles, StyleCompiler};

/// MIME type of compiled stylesheets.
pub const CSS_CONTENT_TYPE: &str = "text/css";
