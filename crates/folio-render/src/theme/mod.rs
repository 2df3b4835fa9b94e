//! Theme resolution.
//!
//! A theme document is untrusted JSON describing palettes, backgrounds,
//! scales, sections, typography, graphics and fonts. Nothing in it is
//! required and any value may have the wrong type. The resolvers in this
//! module turn such a document into fully populated, literal-valued types.
//!
//! ## The Fallback Chain
//!
//! Every named entity resolves through three levels:
//!
//! 1. The entity itself: `theme.<collection>[key]`
//! 2. The theme's own default: `theme.<collection>.default`
//! 3. The built-in default theme's `default` entity ([`DEFAULT_THEME`])
//!
//! Each level only fills what the level above leaves out. The built-in default
//! is always valid, so resolution never fails and never returns a dangling
//! reference.
//!
//! ```rust
//! use folio_render::{get_section, ImageMode};
//! use serde_json::json;
//!
//! let theme = json!({
//!     "sections": { "hero": { "palette": "night", "background": "stars" } },
//!     "palettes": {
//!         "default": { "primary": "#123456" },
//!         "night": { "background": "#000000" }
//!     },
//!     "backgrounds": {
//!         "stars": {
//!             "fill": "background",
//!             "img": { "src": "stars.png", "mode": "tile", "colourMap": { "star": "primary" } }
//!         }
//!     }
//! });
//!
//! let hero = get_section(&theme, Some("hero"));
//! assert_eq!(hero.background.fill.as_deref(), Some("#000000"));
//!
//! let img = hero.background.img.unwrap();
//! assert_eq!(img.mode, ImageMode::Tile);
//! assert_eq!(img.colour_map.unwrap()["star"], "#123456");
//! ```
//!
//! ## Malformed Input
//!
//! There is no error path. Wrong leaf types are dropped or defaulted, missing
//! entities fall back one level, unknown enum values are coerced, and
//! references that cannot be resolved remove the field that holds them.

mod aggregate;
mod background;
pub(crate) mod defaults;
mod font;
mod graphic;
mod palette;
mod scale;
mod section;
mod typography;

pub use aggregate::{get_all_graphics, get_all_sections, get_all_typography, get_fonts};
pub use background::{get_background, ImageMode, ResolvedBackground, ResolvedImage};
pub use defaults::{DEFAULT_KEY, DEFAULT_THEME};
pub use font::{get_font, FontDescriptor};
pub use graphic::{get_graphic, Graphic};
pub use palette::{get_palette, Palette};
pub use scale::{get_scale, Scale, INSET, SPACING};
pub use section::{get_section, Section};
pub use typography::{get_typography, Typography};
