//! Status definitions.
//!
//! A status is a named condition on the player ("burnout", "conference
//! season"). While active, its effects apply once at the start of every
//! tick. A status given without an explicit duration lasts for the
//! definition's default, or until cleared if there is none.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::effects::Effect;

/// An authored status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDefinition {
    pub id: String,

    /// Display label (localization key).
    #[serde(default)]
    pub label: Option<String>,

    /// Default duration in ticks.
    #[serde(default)]
    pub duration: Option<u32>,

    /// Effects applied each tick while active.
    #[serde(default)]
    pub effects: Vec<Effect>,
}

impl StatusDefinition {
    /// Create a status with no effects that lasts until cleared.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            duration: None,
            effects: Vec::new(),
        }
    }

    /// Set the default duration.
    #[must_use]
    pub fn with_duration(mut self, ticks: u32) -> Self {
        self.duration = Some(ticks);
        self
    }

    /// Add a per-tick effect.
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Status definitions by id.
#[derive(Clone, Debug, Default)]
pub struct StatusRegistry {
    statuses: FxHashMap<String, StatusDefinition>,
}

impl StatusRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from definitions. Returns the duplicated id on conflict.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = StatusDefinition>,
    ) -> Result<Self, String> {
        let mut statuses = FxHashMap::default();
        for definition in definitions {
            let id = definition.id.clone();
            if statuses.insert(id.clone(), definition).is_some() {
                return Err(id);
            }
        }
        Ok(Self { statuses })
    }

    /// Look up a status.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&StatusDefinition> {
        self.statuses.get(id)
    }

    /// Check if a status is defined.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.statuses.contains_key(id)
    }

    /// Iterate definitions (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &StatusDefinition> {
        self.statuses.values()
    }

    /// Get number of statuses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}
