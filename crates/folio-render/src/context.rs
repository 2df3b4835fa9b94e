//! Explicit theme selection state.
//!
//! The page keeps track of which theme is active and which graphic is
//! selected for decorative areas. That state lives in a [`ThemeContext`]
//! owned by whoever renders the page, and is passed to the code that needs
//! it. The resolvers never read it: they take the theme document as an
//! argument.

use serde_json::Value;
use tracing::warn;

use crate::document::ThemeSet;
use crate::theme::{get_graphic, get_section, Graphic, Section, DEFAULT_KEY, DEFAULT_THEME};

/// The available themes plus the current selection.
#[derive(Debug, Clone, Default)]
pub struct ThemeContext {
    themes: ThemeSet,
    current: Option<String>,
    graphic: Option<String>,
}

impl ThemeContext {
    /// Creates a context over a theme set.
    ///
    /// The first theme in the set is selected, if there is one.
    pub fn new(themes: ThemeSet) -> Self {
        let current = themes.names().next().map(str::to_string);
        Self {
            themes,
            current,
            graphic: None,
        }
    }

    /// Selects a theme by name. Unknown names leave the selection unchanged
    /// and return `false`.
    pub fn select(&mut self, name: &str) -> bool {
        if self.themes.contains(name) {
            self.current = Some(name.to_string());
            true
        } else {
            warn!(theme = name, "ignoring selection of unknown theme");
            false
        }
    }

    /// Selects the graphic shown in decorative areas; `None` clears it.
    pub fn select_graphic(&mut self, key: Option<&str>) {
        self.graphic = key.map(str::to_string);
    }

    /// Name of the current theme, `"default"` when the set is empty.
    pub fn current_name(&self) -> &str {
        self.current.as_deref().unwrap_or(DEFAULT_KEY)
    }

    /// The current theme document, or the built-in default theme.
    pub fn current(&self) -> &Value {
        self.current
            .as_deref()
            .and_then(|name| self.themes.get(name))
            .map(|document| document.as_value())
            .unwrap_or(&*DEFAULT_THEME)
    }

    /// Resolves a section of the current theme.
    pub fn section(&self, key: Option<&str>) -> Section {
        get_section(self.current(), key)
    }

    /// Resolves the selected graphic in the current theme.
    pub fn graphic(&self) -> Option<Graphic> {
        get_graphic(self.current(), self.graphic.as_deref()?)
    }

    /// The theme set this context selects from.
    pub fn themes(&self) -> &ThemeSet {
        &self.themes
    }
}
