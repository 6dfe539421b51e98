//! Language dictionary.
//!
//! A language file is a JSON or YAML mapping. Nested objects flatten to
//! dot-separated keys, so
//!
//! ```yaml
//! event:
//!   rejection: "Reviewer 2 strikes again. Hope is now {hope}."
//! ```
//!
//! defines the key `event.rejection`.
//!
//! Lookups never fail: a key without an entry renders as itself, and a
//! placeholder the caller cannot fill stays in the text as written.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::data::{load_document, DataError, DataSource};

/// Key → template table for one language.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: FxHashMap<String, String>,
}

impl Dictionary {
    /// An empty dictionary: every key passes through.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from key/template pairs.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Load a language document.
    pub async fn load_from(source: &DataSource) -> Result<Self, DataError> {
        let document: serde_json::Value = load_document(source).await?;
        Self::from_document(&document)
    }

    /// Flatten a parsed language document.
    pub fn from_document(document: &serde_json::Value) -> Result<Self, DataError> {
        if !document.is_object() {
            return Err(DataError::Invalid(
                "language document must be a mapping".to_string(),
            ));
        }
        let mut dictionary = Self::empty();
        dictionary.flatten("", document);
        Ok(dictionary)
    }

    fn flatten(&mut self, prefix: &str, value: &serde_json::Value) {
        let join = |key: &str| {
            if prefix.is_empty() {
                key.to_string()
            } else {
                format!("{prefix}.{key}")
            }
        };

        match value {
            serde_json::Value::Object(map) => {
                for (key, child) in map {
                    self.flatten(&join(key), child);
                }
            }
            serde_json::Value::Array(items) => {
                for (index, child) in items.iter().enumerate() {
                    self.flatten(&join(&index.to_string()), child);
                }
            }
            serde_json::Value::String(text) => {
                self.entries.insert(prefix.to_string(), text.clone());
            }
            serde_json::Value::Null => {}
            other => {
                self.entries.insert(prefix.to_string(), other.to_string());
            }
        }
    }

    /// Template for a key, if defined.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.entries.insert(key.into(), template.into());
    }

    /// Resolve a key to display text.
    ///
    /// `lookup` supplies placeholder values; placeholders it returns `None`
    /// for are left verbatim.
    pub fn resolve(&self, key: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
        let template = match self.entries.get(key) {
            Some(template) => template.as_str(),
            None => {
                debug!(key, "no translation, displaying key");
                key
            }
        };
        interpolate(template, lookup)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn interpolate(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match lookup(name) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
