//! Theme documents and theme sets.
//!
//! A [`ThemeDocument`] is the parsed, still untrusted content of one theme
//! file. Parsing only checks syntax: a document that is valid JSON or YAML is
//! accepted whatever its shape, and the resolvers in [`crate::theme`] deal
//! with the rest.
//!
//! A [`ThemeSet`] is an ordered collection of named documents, the unit the
//! stylesheet compiler works on.
//!
//! # Supported Extensions
//!
//! | Extension | Format |
//! |-----------|--------|
//! | `.json` | JSON |
//! | `.yaml` | YAML |
//! | `.yml` | YAML |
//!
//! When a directory holds several files with the same stem, the extension
//! listed first wins.
//!
//! # Example
//!
//! ```rust
//! use folio_render::{ThemeDocument, ThemeSet};
//!
//! let mut set = ThemeSet::new();
//! set.insert("light", ThemeDocument::from_yaml("palettes:\n  default:\n    text: '#111'\n").unwrap());
//!
//! let css = set.compile(&folio_render::StyleCompiler::new());
//! assert!(css.contains("--colour-text: #111;"));
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, ThemeError};
use crate::stylesheet::StyleCompiler;

/// Recognized theme file extensions in priority order.
pub const THEME_EXTENSIONS: &[&str] = &[".json", ".yaml", ".yml"];

/// One theme document.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeDocument {
    name: Option<String>,
    source_path: Option<PathBuf>,
    value: Value,
}

impl ThemeDocument {
    /// Wraps an already-parsed value.
    pub fn from_value(value: Value) -> Self {
        Self {
            name: None,
            source_path: None,
            value,
        }
    }

    /// Parses a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::from_value(serde_json::from_str(json)?))
    }

    /// Parses a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(Self::from_value(serde_yaml::from_str(yaml)?))
    }

    /// Loads a document from a file, choosing the format by extension.
    ///
    /// The document name is the file stem.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let value = read_value(path)?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string());

        debug!(path = %path.display(), "loaded theme document");
        Ok(Self {
            name,
            source_path: Some(path.to_path_buf()),
            value,
        })
    }

    /// Sets the document name, returning `self` for chaining.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the document name, if known.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the file this document was loaded from.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Returns the raw document.
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Re-reads the document from its source file.
    pub fn refresh(&mut self) -> Result<()> {
        let path = self.source_path.as_ref().ok_or(ThemeError::NoSource)?;
        self.value = read_value(path)?;
        Ok(())
    }
}

fn read_value(path: &Path) -> Result<Value> {
    let format = format_of(path).ok_or_else(|| ThemeError::UnsupportedExtension(path.to_path_buf()))?;
    let content = std::fs::read_to_string(path).map_err(|source| ThemeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match format {
        ".json" => Ok(serde_json::from_str(&content)?),
        _ => Ok(serde_yaml::from_str(&content)?),
    }
}

fn format_of(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    THEME_EXTENSIONS
        .iter()
        .copied()
        .find(|candidate| candidate[1..] == extension)
}

/// An ordered collection of named theme documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeSet {
    themes: IndexMap<String, ThemeDocument>,
}

impl ThemeSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a theme. Replacing keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, document: ThemeDocument) {
        self.themes.insert(name.into(), document);
    }

    /// Loads a theme file under the given name.
    pub fn add_file<P: AsRef<Path>>(&mut self, name: impl Into<String>, path: P) -> Result<()> {
        let name = name.into();
        let document = ThemeDocument::from_file(path)?.with_name(name.as_str());
        self.insert(name, document);
        Ok(())
    }

    /// Loads every theme file in a directory, named by file stem.
    ///
    /// Files are visited in file name order. Files without a recognized
    /// extension are skipped. Returns the number of themes added.
    pub fn add_dir<P: AsRef<Path>>(&mut self, dir: P) -> Result<usize> {
        let dir = dir.as_ref();
        let io_error = |source| ThemeError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if path.is_file() && format_of(&path).is_some() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut by_stem: IndexMap<String, PathBuf> = IndexMap::new();
        for path in paths {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };
            let better = match by_stem.get(&stem) {
                Some(existing) => priority(&path) < priority(existing),
                None => true,
            };
            if better {
                by_stem.insert(stem, path);
            }
        }

        let count = by_stem.len();
        for (name, path) in by_stem {
            self.add_file(name, path)?;
        }
        debug!(dir = %dir.display(), count, "loaded theme directory");
        Ok(count)
    }

    /// Returns the theme with the given name.
    pub fn get(&self, name: &str) -> Option<&ThemeDocument> {
        self.themes.get(name)
    }

    /// Returns true if a theme with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    /// Iterates theme names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    /// Iterates `(name, document)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.themes
            .iter()
            .map(|(name, document)| (name.as_str(), document.as_value()))
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Compiles every theme in the set.
    ///
    /// An empty set compiles the built-in default theme.
    pub fn compile(&self, compiler: &StyleCompiler) -> String {
        if self.is_empty() {
            compiler.compile(None)
        } else {
            compiler.compile_all(self.iter())
        }
    }
}

fn priority(path: &Path) -> usize {
    format_of(path)
        .and_then(|format| THEME_EXTENSIONS.iter().position(|ext| *ext == format))
        .unwrap_or(usize::MAX)
}
