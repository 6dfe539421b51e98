//! Game rules: the engine and the content it runs.
//!
//! - [`GameEngine`]: owns game state, runs the tick loop and drives the
//!   GUI Action Proxy
//! - [`StatusDefinition`]: timed or permanent player conditions
//! - [`EndingDefinition`]: the win/lose rules that close a run

pub mod ending;
pub mod engine;
pub mod status;

pub use ending::{EndingDefinition, GameOutcome};
pub use engine::{EnginePhase, GameEngine, TickReport};
pub use status::{StatusDefinition, StatusRegistry};
