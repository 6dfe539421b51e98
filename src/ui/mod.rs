//! GUI Action Proxy: the engine's only way to talk to the player.
//!
//! The engine never renders anything itself. When an effect needs the
//! player, it calls a [`GuiActionProxy`] and awaits the answer; the tick
//! stays suspended until the proxy resolves.
//!
//! ## Contract
//!
//! - `display_message` completes once the player acknowledges.
//! - `display_choices` resolves with exactly one of the offered ids.
//! - A backend that cannot render resolves immediately with a safe
//!   default (acknowledge / first choice) instead of hanging the game.
//!
//! ## Backends
//!
//! - [`ScriptedProxy`]: answers from a script or strategy, records a
//!   transcript. For headless runs and tests.
//! - [`ChannelProxy`]: forwards each request over a channel to a
//!   presentation task, which answers through a one-shot reply handle.

mod channel;
mod scripted;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub use channel::{channel, ChannelProxy, ChoiceRequest, MessageRequest, UiError, UiRequest};
pub use scripted::{Displayed, ScriptedProxy};

/// Identifier of one option within a displayed choice set.
///
/// The engine assigns ids as option indices; they are only unique within
/// a single set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChoiceId(pub u8);

impl ChoiceId {
    /// Create a new choice ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the option index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Choice({})", self.0)
    }
}

/// A displayed option: resolved text and its id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: ChoiceId,
    pub text: String,
}

impl Choice {
    /// Create a choice.
    pub fn new(id: ChoiceId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// Choice sets are almost always a handful of options.
pub type ChoiceSet = SmallVec<[Choice; 4]>;

/// Safe default answer for a choice set: the first option.
#[must_use]
pub fn default_choice(choices: &[Choice]) -> ChoiceId {
    choices.first().map(|c| c.id).unwrap_or_default()
}

/// Display surface the engine drives.
#[async_trait]
pub trait GuiActionProxy: Send {
    /// Show a message with a single confirm action.
    async fn display_message(
        &mut self,
        message: &str,
        confirm: &str,
        icon: Option<&str>,
        fx: Option<&str>,
    );

    /// Show a message with options and return the chosen id.
    async fn display_choices(
        &mut self,
        message: &str,
        choices: &[Choice],
        icon: Option<&str>,
    ) -> ChoiceId;
}
