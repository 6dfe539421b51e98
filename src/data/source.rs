//! Data sources and document parsing.
//!
//! A [`DataSource`] is either a file path or an inline document. Files are
//! read with `tokio::fs`; the format comes from the extension (`.yaml` /
//! `.yml` for YAML, anything else JSON).
//!
//! YAML documents write externally tagged enums as single-key maps
//! (`- add_item: { item: paper }`, `condition: { has_status: burnout }`),
//! the same shape as JSON, so both formats share one set of definitions.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading and validating game data.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("invalid game data: {0}")]
    Invalid(String),
}

/// Document format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    #[default]
    Json,
    Yaml,
}

impl DataFormat {
    /// Infer the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                DataFormat::Yaml
            }
            _ => DataFormat::Json,
        }
    }
}

/// Where a document comes from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataSource {
    /// A file on disk.
    File(PathBuf),
    /// A document held in memory.
    Inline { format: DataFormat, text: String },
}

impl DataSource {
    /// Inline JSON document.
    pub fn json(text: impl Into<String>) -> Self {
        Self::Inline {
            format: DataFormat::Json,
            text: text.into(),
        }
    }

    /// Inline YAML document.
    pub fn yaml(text: impl Into<String>) -> Self {
        Self::Inline {
            format: DataFormat::Yaml,
            text: text.into(),
        }
    }

    /// Resolve a relative file path against `base`.
    #[must_use]
    pub fn relative_to(self, base: &Path) -> Self {
        match self {
            Self::File(path) if path.is_relative() => Self::File(base.join(path)),
            other => other,
        }
    }

    /// Human-readable location, for logs.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Inline { format, .. } => format!("<inline {:?}>", format),
        }
    }
}

impl From<PathBuf> for DataSource {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl From<&Path> for DataSource {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}

impl From<&str> for DataSource {
    fn from(path: &str) -> Self {
        Self::File(PathBuf::from(path))
    }
}

/// Parse a document in the given format.
pub fn parse_document<T: DeserializeOwned>(text: &str, format: DataFormat) -> Result<T, DataError> {
    match format {
        DataFormat::Json => Ok(serde_json::from_str(text)?),
        DataFormat::Yaml => {
            let deserializer = serde_yml::Deserializer::from_str(text);
            Ok(serde_yml::with::singleton_map_recursive::deserialize(deserializer)?)
        }
    }
}

/// Read and parse a document.
pub async fn load_document<T: DeserializeOwned>(source: &DataSource) -> Result<T, DataError> {
    match source {
        DataSource::File(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| DataError::Io {
                    path: path.clone(),
                    source,
                })?;
            parse_document(&text, DataFormat::from_path(path))
        }
        DataSource::Inline { format, text } => parse_document(text, *format),
    }
}
