//! Event registry.
//!
//! Stores events in their evaluation order and answers "which events fire
//! now?". The order is fixed when the registry is built: priority
//! descending, ties broken by load order. Every tick walks the same
//! sequence, which is what makes seeded runs reproducible.

use rustc_hash::FxHashMap;

use crate::core::{EngineError, GameState};

use super::condition::{ConditionContext, ConditionEvaluator};
use super::event::EventDefinition;

/// Events in evaluation order.
#[derive(Clone, Debug, Default)]
pub struct EventRegistry {
    events: Vec<EventDefinition>,
    by_id: FxHashMap<String, usize>,
}

impl EventRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from events in load order.
    ///
    /// Returns the duplicated id on conflict.
    pub fn from_events(events: impl IntoIterator<Item = EventDefinition>) -> Result<Self, String> {
        let mut events: Vec<EventDefinition> = events.into_iter().collect();
        // Stable sort keeps load order within a priority.
        events.sort_by(|a, b| b.priority.cmp(&a.priority));

        let mut by_id = FxHashMap::default();
        for (index, event) in events.iter().enumerate() {
            if by_id.insert(event.id.clone(), index).is_some() {
                return Err(event.id.clone());
            }
        }

        Ok(Self { events, by_id })
    }

    /// Look up an event by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&EventDefinition> {
        self.by_id.get(id).and_then(|&i| self.events.get(i))
    }

    /// Iterate events in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &EventDefinition> {
        self.events.iter()
    }

    /// Get the event at a position in evaluation order.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&EventDefinition> {
        self.events.get(index)
    }

    /// Check whether an event should fire against the current state.
    ///
    /// Once-events that already fired are skipped without evaluating their
    /// condition (no RNG draw).
    pub fn should_fire(event: &EventDefinition, state: &mut GameState) -> Result<bool, EngineError> {
        if event.once && state.has_fired(&event.id) {
            return Ok(false);
        }
        let mut ctx = ConditionContext::new(&state.public, &mut state.rng);
        ConditionEvaluator::evaluate(&event.condition, &mut ctx)
    }

    /// Get number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameRng, PublicState};
    use crate::triggers::TriggerCondition;

    fn test_state() -> GameState {
        let mut public = PublicState::new();
        public.variables.set("hope", 50);
        GameState::new(public, GameRng::new(42))
    }

    #[test]
    fn test_priority_then_load_order() {
        let registry = EventRegistry::from_events([
            EventDefinition::new("a"),
            EventDefinition::new("b").with_priority(10),
            EventDefinition::new("c"),
            EventDefinition::new("d").with_priority(10),
            EventDefinition::new("e").with_priority(-1),
        ])
        .unwrap();

        let order: Vec<_> = registry.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(order, vec!["b", "d", "a", "c", "e"]);
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = EventRegistry::from_events([
            EventDefinition::new("x"),
            EventDefinition::new("x"),
        ])
        .unwrap_err();
        assert_eq!(err, "x");
    }

    #[test]
    fn test_lookup() {
        let registry = EventRegistry::from_events([
            EventDefinition::new("low"),
            EventDefinition::new("high").with_priority(1),
        ])
        .unwrap();

        assert_eq!(registry.get("low").map(|e| e.priority), Some(0));
        assert_eq!(registry.at(0).map(|e| e.id.as_str()), Some("high"));
        assert!(registry.get("missing").is_none());
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_should_fire() {
        let mut state = test_state();

        let low_hope = EventDefinition::new("despair")
            .with_condition(TriggerCondition::var_at_most("hope", 10));
        assert!(!EventRegistry::should_fire(&low_hope, &mut state).unwrap());

        state.public.variables.set("hope", 5);
        assert!(EventRegistry::should_fire(&low_hope, &mut state).unwrap());
    }

    #[test]
    fn test_once_events_skip_after_firing() {
        let mut state = test_state();
        let orientation = EventDefinition::new("orientation").once();

        assert!(EventRegistry::should_fire(&orientation, &mut state).unwrap());
        state.mark_fired("orientation");
        assert!(!EventRegistry::should_fire(&orientation, &mut state).unwrap());
    }
}
