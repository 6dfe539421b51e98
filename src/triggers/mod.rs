//! Trigger system for event-driven narrative.
//!
//! Events react to the state of the game rather than to discrete game
//! actions: every tick, each event's condition is checked against the
//! variables, inventory and statuses, and matching events apply their
//! effects.
//!
//! ## Key Components
//!
//! - [`TriggerCondition`]: Rules for when an event fires
//! - [`EventDefinition`]: A complete authored event
//! - [`EventRegistry`]: Events in deterministic evaluation order
//!
//! ## Example Usage
//!
//! ```
//! use phd_sim::core::{GameRng, GameState, PublicState};
//! use phd_sim::effects::Effect;
//! use phd_sim::triggers::{EventDefinition, EventRegistry, TriggerCondition};
//!
//! let registry = EventRegistry::from_events([
//!     EventDefinition::new("rejection")
//!         .with_condition(TriggerCondition::var_at_least("hope", 40))
//!         .with_effect(Effect::modify_var("hope", -10)),
//! ])
//! .unwrap();
//!
//! let mut public = PublicState::new();
//! public.variables.set("hope", 50);
//! let mut state = GameState::new(public, GameRng::new(42));
//!
//! let event = registry.get("rejection").unwrap();
//! assert!(EventRegistry::should_fire(event, &mut state).unwrap());
//! ```

mod condition;
mod event;
mod registry;

pub use condition::{Comparison, ConditionContext, ConditionEvaluator, Operand, TriggerCondition};
pub use event::EventDefinition;
pub use registry::EventRegistry;
