//! Effect system for narrative content.
//!
//! - `Effect`: the vocabulary events and statuses are written in
//! - `EffectResolver`: applies effects to game state, awaiting the GUI
//!   proxy for messages and choices
//!
//! Effects fail loudly. A missing variable, an underflowing item or an
//! answer outside the offered choices aborts the sequence with an
//! `EngineError`, and the engine discards the tick.

mod effect;
mod resolver;

pub use effect::{ChoiceOption, Effect, DEFAULT_CONFIRM};
pub use resolver::{EffectResolver, ResolverContext};
