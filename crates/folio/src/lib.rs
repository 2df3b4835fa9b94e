//! # Folio
//!
//! Site-level tooling on top of [`folio_render`]: the `folio.yaml`
//! configuration and the `folio` command line tool.
//!
//! ```rust
//! use folio::SiteConfig;
//!
//! let config = SiteConfig::from_yaml("base: /static\n").unwrap();
//! let css = config.load_themes().unwrap().compile(&config.compiler());
//! assert!(css.contains(".theme-default {"));
//! ```

pub mod cli;
pub mod config;

pub use cli::{run, Cli, Command};
pub use config::{ConfigError, SiteConfig, CONFIG_FILE};
