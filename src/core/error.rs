//! Engine errors.

use thiserror::Error;

use crate::data::DataError;
use crate::rules::{EnginePhase, GameOutcome};
use crate::ui::ChoiceId;

/// Errors from engine operations.
///
/// Content mistakes (a missing variable, an underflowing item) surface
/// here instead of being clamped or defaulted away.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to load {what}: {source}")]
    Load {
        what: &'static str,
        #[source]
        source: DataError,
    },

    #[error("game data not loaded")]
    NotLoaded,

    #[error("engine is {0}, ticks need a running game")]
    NotRunning(EnginePhase),

    #[error("cannot {operation} while {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: EnginePhase,
    },

    #[error("game already ended: {0}")]
    GameOver(GameOutcome),

    #[error("variable not found: {0}")]
    VariableNotFound(String),

    #[error("variable {0} does not hold an integer")]
    NotAnInteger(String),

    #[error("cannot remove {requested} x {item}: only {available} held")]
    InventoryUnderflow {
        item: String,
        requested: u32,
        available: u32,
    },

    #[error("random range for {name} is inverted: {min} > {max}")]
    InvalidRange { name: String, min: i64, max: i64 },

    #[error("unknown status: {0}")]
    UnknownStatus(String),

    #[error("choice {chosen} was not offered ({offered} options)")]
    InvalidChoice { chosen: ChoiceId, offered: usize },
}

impl EngineError {
    /// Wrap a data error with the name of the source that failed.
    pub fn load(what: &'static str, source: DataError) -> Self {
        Self::Load { what, source }
    }
}
