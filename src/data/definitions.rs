//! Document shapes for attributes, items and events.

use serde::{Deserialize, Serialize};

use crate::core::Value;
use crate::rules::EndingDefinition;
use crate::triggers::EventDefinition;

/// A starting variable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    pub name: String,
    pub initial: Value,
    #[serde(default)]
    pub description: Option<String>,
}

impl AttributeDefinition {
    /// Create an attribute.
    pub fn new(name: impl Into<String>, initial: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            initial: initial.into(),
            description: None,
        }
    }
}

/// A starting inventory entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub name: String,
    #[serde(default)]
    pub initial: u32,
    #[serde(default)]
    pub description: Option<String>,
}

impl ItemDefinition {
    /// Create an item.
    pub fn new(name: impl Into<String>, initial: u32) -> Self {
        Self {
            name: name.into(),
            initial,
            description: None,
        }
    }
}

/// The events document: events plus the endings that close a run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsDocument {
    pub events: Vec<EventDefinition>,
    #[serde(default)]
    pub endings: Vec<EndingDefinition>,
}
