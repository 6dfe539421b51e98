//! Endings: the authored win/lose rules.

use serde::{Deserialize, Serialize};

use crate::triggers::TriggerCondition;

/// Terminal outcome of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    Win,
    Lose,
}

impl GameOutcome {
    /// Check if this is a win.
    #[must_use]
    pub fn is_win(self) -> bool {
        self == GameOutcome::Win
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::Win => write!(f, "win"),
            GameOutcome::Lose => write!(f, "lose"),
        }
    }
}

/// A terminal rule checked after each tick's events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndingDefinition {
    /// Outcome reached when the condition holds.
    pub outcome: GameOutcome,

    /// When the ending applies.
    pub condition: TriggerCondition,

    /// Message key shown before the game ends.
    #[serde(default)]
    pub message: Option<String>,
}

impl EndingDefinition {
    /// Create an ending.
    pub fn new(outcome: GameOutcome, condition: TriggerCondition) -> Self {
        Self {
            outcome,
            condition,
            message: None,
        }
    }

    /// Set the closing message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
