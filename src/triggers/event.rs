//! Event definitions.
//!
//! An event is a narrative unit: a condition over game state and the
//! effects to apply when it holds. Events are loaded once and never
//! mutated; per-run bookkeeping (whether a `once` event already fired)
//! lives in `GameState`.

use serde::{Deserialize, Serialize};

use crate::effects::Effect;

use super::condition::TriggerCondition;

/// An authored event.
///
/// ```yaml
/// - id: advisor_meeting
///   priority: 10
///   condition: { chance: 25 }
///   effects:
///     - message: { text: event.advisor_meeting }
///     - modify_var: { name: hope, delta: -5 }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDefinition {
    /// Unique identifier.
    pub id: String,

    /// Higher priorities are evaluated first; ties keep load order.
    #[serde(default)]
    pub priority: i32,

    /// When the event fires.
    #[serde(default)]
    pub condition: TriggerCondition,

    /// Fire at most once per run.
    #[serde(default)]
    pub once: bool,

    /// Effects applied in order when the event fires.
    #[serde(default)]
    pub effects: Vec<Effect>,
}

impl EventDefinition {
    /// Create an event that always fires and does nothing.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            priority: 0,
            condition: TriggerCondition::Always,
            once: false,
            effects: Vec::new(),
        }
    }

    /// Set the priority (builder pattern).
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the condition (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, condition: TriggerCondition) -> Self {
        self.condition = condition;
        self
    }

    /// Fire only once per run (builder pattern).
    #[must_use]
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    /// Add an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}
