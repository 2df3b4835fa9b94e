//! Error types for theme document loading.
//!
//! Resolution and compilation never fail: malformed theme *content* degrades
//! to defaults. Errors only arise when a document cannot be read or is not
//! syntactically valid JSON/YAML.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading theme documents.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// The document file could not be read.
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON.
    #[error("invalid JSON theme document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is not valid YAML.
    #[error("invalid YAML theme document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension does not name a supported document format.
    #[error("unsupported theme file extension: {}", .0.display())]
    UnsupportedExtension(PathBuf),

    /// `refresh` was called on a document that was not loaded from a file.
    #[error("cannot refresh: theme document has no source file")]
    NoSource,
}

/// Result type for theme document operations.
pub type Result<T> = std::result::Result<T, ThemeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ThemeError::UnsupportedExtension(PathBuf::from("themes/night.toml"));
        assert!(err.to_string().contains("night.toml"));
        assert!(ThemeError::NoSource.to_string().contains("no source file"));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ThemeError = json_err.into();
        assert!(matches!(err, ThemeError::Json(_)));
    }
}
