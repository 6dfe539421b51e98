//! Scripted proxy for headless play and tests.

use std::collections::VecDeque;

use async_trait::async_trait;

use super::{default_choice, Choice, ChoiceId, GuiActionProxy};

type Strategy = Box<dyn FnMut(&str, &[Choice]) -> ChoiceId + Send>;

/// Something the proxy was asked to display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Displayed {
    Message {
        text: String,
        confirm: String,
        icon: Option<String>,
    },
    Choices {
        text: String,
        options: Vec<String>,
        chosen: ChoiceId,
    },
}

/// Answers choices without a player.
///
/// Each `display_choices` call takes the next scripted id; once the script
/// is exhausted the strategy decides, and without a strategy the first
/// option is taken. Messages are acknowledged immediately. Everything
/// shown is kept in a transcript.
#[derive(Default)]
pub struct ScriptedProxy {
    script: VecDeque<ChoiceId>,
    strategy: Option<Strategy>,
    transcript: Vec<Displayed>,
}

impl ScriptedProxy {
    /// Always take the first option.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer from a fixed script of ids.
    pub fn with_script(ids: impl IntoIterator<Item = ChoiceId>) -> Self {
        Self {
            script: ids.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Answer with a strategy closure.
    pub fn with_strategy(
        strategy: impl FnMut(&str, &[Choice]) -> ChoiceId + Send + 'static,
    ) -> Self {
        Self {
            strategy: Some(Box::new(strategy)),
            ..Self::default()
        }
    }

    /// Pick the option whose text equals `text`, else the first option.
    pub fn preferring(text: impl Into<String>) -> Self {
        let wanted = text.into();
        Self::with_strategy(move |_, choices| {
            choices
                .iter()
                .find(|c| c.text == wanted)
                .map(|c| c.id)
                .unwrap_or_else(|| default_choice(choices))
        })
    }

    /// Queue another scripted answer.
    pub fn queue(&mut self, id: ChoiceId) {
        self.script.push_back(id);
    }

    /// Everything displayed so far.
    #[must_use]
    pub fn transcript(&self) -> &[Displayed] {
        &self.transcript
    }

    /// Scripted answers not yet used.
    #[must_use]
    pub fn remaining_script(&self) -> usize {
        self.script.len()
    }

    fn decide(&mut self, message: &str, choices: &[Choice]) -> ChoiceId {
        if let Some(id) = self.script.pop_front() {
            return id;
        }
        match self.strategy.as_mut() {
            Some(strategy) => strategy(message, choices),
            None => default_choice(choices),
        }
    }
}

#[async_trait]
impl GuiActionProxy for ScriptedProxy {
    async fn display_message(
        &mut self,
        message: &str,
        confirm: &str,
        icon: Option<&str>,
        _fx: Option<&str>,
    ) {
        self.transcript.push(Displayed::Message {
            text: message.to_string(),
            confirm: confirm.to_string(),
            icon: icon.map(str::to_string),
        });
    }

    async fn display_choices(
        &mut self,
        message: &str,
        choices: &[Choice],
        _icon: Option<&str>,
    ) -> ChoiceId {
        let chosen = self.decide(message, choices);
        self.transcript.push(Displayed::Choices {
            text: message.to_string(),
            options: choices.iter().map(|c| c.text.clone()).collect(),
            chosen,
        });
        chosen
    }
}
