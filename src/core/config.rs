//! Game configuration.
//!
//! A `GameConfig` names where the engine finds its content:
//! - attribute definitions (starting variables)
//! - item definitions (starting inventory)
//! - status definitions
//! - event and ending definitions
//! - an optional language file
//!
//! plus an optional seed for reproducible runs. It is supplied once at
//! engine construction and never changes afterwards.
//!
//! Configs are built in code or read from a JSON/YAML file:
//!
//! ```yaml
//! attributes: data/attributes.yaml
//! items: data/items.yaml
//! statuses: data/statuses.yaml
//! events: data/events.yaml
//! language: lang/en.yaml
//! seed: 42
//! ```
//!
//! Relative paths in a config file resolve against the file's directory.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::{parse_document, DataError, DataFormat, DataSource};

/// Conventional file names used by [`GameConfig::from_dir`].
const ATTRIBUTES_FILE: &str = "attributes.yaml";
const ITEMS_FILE: &str = "items.yaml";
const STATUSES_FILE: &str = "statuses.yaml";
const EVENTS_FILE: &str = "events.yaml";

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Attribute definitions.
    pub attributes: DataSource,

    /// Item definitions.
    pub items: DataSource,

    /// Status definitions.
    pub statuses: DataSource,

    /// Event and ending definitions.
    pub events: DataSource,

    /// Language file. Without one, message keys display verbatim.
    #[serde(default)]
    pub language: Option<DataSource>,

    /// Seed for reproducible runs.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Create a configuration from the four required sources.
    pub fn new(
        attributes: impl Into<DataSource>,
        items: impl Into<DataSource>,
        statuses: impl Into<DataSource>,
        events: impl Into<DataSource>,
    ) -> Self {
        Self {
            attributes: attributes.into(),
            items: items.into(),
            statuses: statuses.into(),
            events: events.into(),
            language: None,
            seed: None,
        }
    }

    /// Create a configuration using the conventional file names in `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(
            dir.join(ATTRIBUTES_FILE),
            dir.join(ITEMS_FILE),
            dir.join(STATUSES_FILE),
            dir.join(EVENTS_FILE),
        )
    }

    /// Read a configuration file.
    ///
    /// Relative source paths are resolved against the file's directory.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DataError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let config: Self = parse_document(&text, DataFormat::from_path(path))?;

        Ok(match path.parent() {
            Some(base) => config.relative_to(base),
            None => config,
        })
    }

    /// Set the language file.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<DataSource>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the deterministic seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Resolve every relative file source against `base`.
    #[must_use]
    pub fn relative_to(self, base: &Path) -> Self {
        Self {
            attributes: self.attributes.relative_to(base),
            items: self.items.relative_to(base),
            statuses: self.statuses.relative_to(base),
            events: self.events.relative_to(base),
            language: self.language.map(|l| l.relative_to(base)),
            seed: self.seed,
        }
    }
}
