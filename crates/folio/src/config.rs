//! Site configuration.
//!
//! A site is described by a small YAML file, `folio.yaml` by default:
//!
//! ```yaml
//! base: /static
//! themes:
//!   light: themes/light.json
//! theme_dir: themes
//! locale: locale/en.yaml
//! ```
//!
//! Every field is optional. Relative paths are resolved against the
//! directory holding the configuration file.

use std::path::{Path, PathBuf};

use folio_render::{build_locale, Locale, StyleCompiler, ThemeDocument, ThemeError, ThemeSet};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Default configuration file name.
pub const CONFIG_FILE: &str = "folio.yaml";

/// Errors that can occur while loading a site configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error(transparent)]
    Theme(#[from] ThemeError),
}

/// Parsed `folio.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Base path or URL for theme assets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    /// Named theme files. Listed themes come first, in the order given.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub themes: IndexMap<String, PathBuf>,

    /// Directory of theme files, named by file stem.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_dir: Option<PathBuf>,

    /// Sparse locale document (JSON or YAML).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<PathBuf>,

    #[serde(skip)]
    root: PathBuf,
}

impl SiteConfig {
    /// Loads a configuration file. Relative paths in it resolve against the
    /// file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_yaml(&content)?;
        config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        debug!(path = %path.display(), "loaded site config");
        Ok(config)
    }

    /// Parses a configuration document. Relative paths resolve against the
    /// current directory.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // An empty file is an empty config.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Replaces the asset base when `base` is given.
    pub fn with_base(mut self, base: Option<String>) -> Self {
        if base.is_some() {
            self.base = base;
        }
        self
    }

    /// Directory relative paths resolve against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Loads every configured theme.
    ///
    /// Themes listed under `themes` come first. Files from `theme_dir` follow,
    /// skipping names already taken by a listed theme.
    pub fn load_themes(&self) -> Result<ThemeSet, ConfigError> {
        let mut set = ThemeSet::new();
        for (name, path) in &self.themes {
            set.add_file(name.as_str(), self.resolve(path))?;
        }

        if let Some(dir) = &self.theme_dir {
            let mut from_dir = ThemeSet::new();
            from_dir.add_dir(self.resolve(dir))?;
            for name in from_dir.names() {
                if set.contains(name) {
                    debug!(theme = name, "listed theme shadows theme_dir file");
                    continue;
                }
                if let Some(document) = from_dir.get(name) {
                    set.insert(name, document.clone());
                }
            }
        }

        Ok(set)
    }

    /// Loads the configured locale, or the default locale if none is set.
    pub fn load_locale(&self) -> Result<Locale, ConfigError> {
        match &self.locale {
            Some(path) => {
                let document = ThemeDocument::from_file(self.resolve(path))?;
                Ok(build_locale(document.as_value()))
            }
            None => Ok(Locale::default()),
        }
    }

    /// Returns a stylesheet compiler using the configured base.
    pub fn compiler(&self) -> StyleCompiler {
        match &self.base {
            Some(base) => StyleCompiler::new().with_base(base.as_str()),
            None => StyleCompiler::new(),
        }
    }
}
