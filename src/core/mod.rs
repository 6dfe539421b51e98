//! Core engine types: values, variables, inventory, state, RNG,
//! configuration and errors.
//!
//! These are the building blocks the rest of the engine mutates. Nothing
//! here knows about events, statuses or the UI.

pub mod config;
pub mod error;
pub mod inventory;
pub mod rng;
pub mod state;
pub mod value;
pub mod variables;

pub use config::GameConfig;
pub use error::EngineError;
pub use inventory::Inventory;
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, PublicState, MONTHS_PER_YEAR, MONTH_VAR, YEAR_VAR};
pub use value::Value;
pub use variables::VariableStore;
