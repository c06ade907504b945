//! # Document Loading
//!
//! Reads a configuration document from disk and deserializes it into a
//! typed value. Loading happens before any rule runs; the rules only ever
//! see the parsed structure.

use std::path::Path;

use clap::ValueEnum;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Serialization format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocumentFormat {
    /// Pick by file extension: `.json` is JSON, anything else YAML.
    Auto,
    /// YAML document.
    Yaml,
    /// JSON document.
    Json,
}

impl DocumentFormat {
    /// Replace `Auto` with the concrete format implied by `path`.
    pub fn resolve(self, path: &Path) -> DocumentFormat {
        match self {
            DocumentFormat::Auto => {
                let is_json = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
                if is_json {
                    DocumentFormat::Json
                } else {
                    DocumentFormat::Yaml
                }
            }
            concrete => concrete,
        }
    }
}

/// Error while loading a document.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read.
    #[error("cannot read '{path}': {source}")]
    Io {
        /// Path of the document.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The file is not valid YAML for the expected shape.
    #[error("invalid YAML in '{path}': {source}")]
    Yaml {
        /// Path of the document.
        path: String,
        /// Parser error.
        source: serde_yaml::Error,
    },

    /// The file is not valid JSON for the expected shape.
    #[error("invalid JSON in '{path}': {source}")]
    Json {
        /// Path of the document.
        path: String,
        /// Parser error.
        source: serde_json::Error,
    },
}

/// Read and deserialize the document at `path`.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be read or parsed.
pub fn load_document<T: DeserializeOwned>(
    path: &Path,
    format: DocumentFormat,
) -> Result<T, LoadError> {
    let display_path = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: display_path.clone(),
        source,
    })?;

    let format = format.resolve(path);
    tracing::debug!(path = %display_path, ?format, bytes = content.len(), "loading document");

    parse_document(&content, format).map_err(|err| err.with_path(display_path))
}

/// Deserialize `content` in the given format. `Auto` is treated as YAML.
///
/// # Errors
///
/// Returns [`LoadError`] (with an empty path) if `content` does not parse.
pub fn parse_document<T: DeserializeOwned>(
    content: &str,
    format: DocumentFormat,
) -> Result<T, LoadError> {
    match format {
        DocumentFormat::Json => serde_json::from_str(content).map_err(|source| LoadError::Json {
            path: String::new(),
            source,
        }),
        DocumentFormat::Yaml | DocumentFormat::Auto => {
            serde_yaml::from_str(content).map_err(|source| LoadError::Yaml {
                path: String::new(),
                source,
            })
        }
    }
}

impl LoadError {
    fn with_path(self, path: String) -> Self {
        match self {
            LoadError::Io { source, .. } => LoadError::Io { path, source },
            LoadError::Yaml { source, .. } => LoadError::Yaml { path, source },
            LoadError::Json { source, .. } => LoadError::Json { path, source },
        }
    }
}
