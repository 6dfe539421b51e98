//! Effect definitions.
//!
//! Effects are the state changes and player interactions narrative content
//! is built from. They are intentionally small; events compose them into
//! sequences and choices nest further sequences per option.
//!
//! ## State Effects
//!
//! - `SetVar`, `ModifyVar`, `RandomVar`: variables
//! - `AddItem`, `RemoveItem`: inventory
//! - `GiveStatus`, `ClearStatus`: statuses
//!
//! ## Interactive Effects
//!
//! Both suspend the tick until the player answers:
//! - `Message`: text with a single confirm action
//! - `Choice`: text with options, each carrying its own effects
//!
//! ## Control Effects
//!
//! - `When`: branch on a condition
//! - `EndGame`: request a terminal outcome

use serde::{Deserialize, Serialize};

use crate::core::Value;
use crate::rules::GameOutcome;
use crate::triggers::TriggerCondition;

/// Confirm label used when content does not name one.
pub const DEFAULT_CONFIRM: &str = "OK";

fn default_confirm() -> String {
    DEFAULT_CONFIRM.to_string()
}

fn default_count() -> u32 {
    1
}

/// An atomic narrative effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    // === Variables ===

    /// Create or overwrite a variable.
    SetVar { name: String, value: Value },

    /// Add `delta` to an existing integer variable.
    ModifyVar { name: String, delta: i64 },

    /// Add a uniform roll in `[min, max]` to an existing integer variable.
    RandomVar { name: String, min: i64, max: i64 },

    // === Inventory ===

    /// Add items.
    AddItem {
        item: String,
        #[serde(default = "default_count")]
        count: u32,
    },

    /// Remove items. Fails if fewer are held.
    RemoveItem {
        item: String,
        #[serde(default = "default_count")]
        count: u32,
    },

    // === Statuses ===

    /// Activate a status. Without a duration the status definition's
    /// default applies.
    GiveStatus {
        status: String,
        #[serde(default)]
        duration: Option<u32>,
    },

    /// Deactivate a status.
    ClearStatus { status: String },

    // === Interaction ===

    /// Show a message and wait for acknowledgement.
    Message {
        text: String,
        #[serde(default = "default_confirm")]
        confirm: String,
        #[serde(default)]
        icon: Option<String>,
        #[serde(default)]
        fx: Option<String>,
    },

    /// Show a message with options and apply the chosen option's effects.
    Choice {
        text: String,
        #[serde(default)]
        icon: Option<String>,
        options: Vec<ChoiceOption>,
    },

    // === Control ===

    /// Apply `then` if the condition holds, `otherwise` if not.
    When {
        condition: TriggerCondition,
        #[serde(default)]
        then: Vec<Effect>,
        #[serde(default)]
        otherwise: Vec<Effect>,
    },

    /// Request the end of the game.
    EndGame { outcome: GameOutcome },
}

/// One selectable option of a [`Effect::Choice`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Option label (localization key).
    pub text: String,
    /// Effects applied when chosen.
    #[serde(default)]
    pub effects: Vec<Effect>,
}

impl ChoiceOption {
    /// Create an option.
    pub fn new(text: impl Into<String>, effects: impl IntoIterator<Item = Effect>) -> Self {
        Self {
            text: text.into(),
            effects: effects.into_iter().collect(),
        }
    }
}

impl Effect {
    /// Create a set-variable effect.
    pub fn set_var(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::SetVar {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create a modify-variable effect.
    pub fn modify_var(name: impl Into<String>, delta: i64) -> Self {
        Self::ModifyVar {
            name: name.into(),
            delta,
        }
    }

    /// Create a random-adjustment effect.
    pub fn random_var(name: impl Into<String>, min: i64, max: i64) -> Self {
        Self::RandomVar {
            name: name.into(),
            min,
            max,
        }
    }

    /// Create an add-item effect.
    pub fn add_item(item: impl Into<String>, count: u32) -> Self {
        Self::AddItem {
            item: item.into(),
            count,
        }
    }

    /// Create a remove-item effect.
    pub fn remove_item(item: impl Into<String>, count: u32) -> Self {
        Self::RemoveItem {
            item: item.into(),
            count,
        }
    }

    /// Create a give-status effect.
    pub fn give_status(status: impl Into<String>, duration: Option<u32>) -> Self {
        Self::GiveStatus {
            status: status.into(),
            duration,
        }
    }

    /// Create a clear-status effect.
    pub fn clear_status(status: impl Into<String>) -> Self {
        Self::ClearStatus {
            status: status.into(),
        }
    }

    /// Create a message with the default confirm label.
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message {
            text: text.into(),
            confirm: default_confirm(),
            icon: None,
            fx: None,
        }
    }

    /// Create a choice.
    pub fn choice(text: impl Into<String>, options: impl IntoIterator<Item = ChoiceOption>) -> Self {
        Self::Choice {
            text: text.into(),
            icon: None,
            options: options.into_iter().collect(),
        }
    }

    /// Create a conditional branch.
    pub fn when(
        condition: TriggerCondition,
        then: impl IntoIterator<Item = Effect>,
        otherwise: impl IntoIterator<Item = Effect>,
    ) -> Self {
        Self::When {
            condition,
            then: then.into_iter().collect(),
            otherwise: otherwise.into_iter().collect(),
        }
    }

    /// Create an end-game effect.
    pub fn end_game(outcome: GameOutcome) -> Self {
        Self::EndGame { outcome }
    }

    /// Does this effect (or a nested one) need player input?
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        let mut interactive = false;
        self.walk(&mut |e| {
            if matches!(e, Effect::Message { .. } | Effect::Choice { .. }) {
                interactive = true;
            }
        });
        interactive
    }

    /// Visit this effect and every nested one, depth first.
    pub fn walk(&self, visit: &mut impl FnMut(&Effect)) {
        visit(self);
        match self {
            Effect::Choice { options, .. } => {
                for option in options {
                    for effect in &option.effects {
                        effect.walk(visit);
                    }
                }
            }
            Effect::When { then, otherwise, .. } => {
                for effect in then.iter().chain(otherwise) {
                    effect.walk(visit);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{parse_document, DataFormat};

    #[test]
    fn test_modify_var() {
        let effect = Effect::modify_var("hope", -5);
        match effect {
            Effect::ModifyVar { name, delta } => {
                assert_eq!(name, "hope");
                assert_eq!(delta, -5);
            }
            _ => panic!("Expected ModifyVar"),
        }
    }

    #[test]
    fn test_message_default_confirm() {
        match Effect::message("event.intro") {
            Effect::Message { text, confirm, icon, fx } => {
                assert_eq!(text, "event.intro");
                assert_eq!(confirm, DEFAULT_CONFIRM);
                assert!(icon.is_none());
                assert!(fx.is_none());
            }
            _ => panic!("Expected Message"),
        }
    }

    #[test]
    fn test_is_interactive() {
        assert!(!Effect::add_item("paper", 1).is_interactive());
        assert!(Effect::message("hi").is_interactive());

        let nested = Effect::when(
            TriggerCondition::Always,
            [Effect::modify_var("hope", 1)],
            [Effect::choice("pick", [ChoiceOption::new("a", [])])],
        );
        assert!(nested.is_interactive());
    }

    #[test]
    fn test_walk_counts_nested() {
        let effect = Effect::choice(
            "What now?",
            [
                ChoiceOption::new("Write", [Effect::add_item("paper", 1)]),
                ChoiceOption::new(
                    "Rest",
                    [Effect::when(TriggerCondition::Always, [Effect::modify_var("hope", 5)], [])],
                ),
            ],
        );

        let mut count = 0;
        effect.walk(&mut |_| count += 1);
        assert_eq!(count, 4);
    }

    #[test]
    fn test_yaml_authoring() {
        let yaml = r#"
- add_item: { item: paper }
- remove_item: { item: coffee, count: 2 }
- give_status: { status: burnout }
- message: { text: event.done, icon: trophy }
- end_game: { outcome: win }
"#;
        let effects: Vec<Effect> = parse_document(yaml, DataFormat::Yaml).unwrap();
        assert_eq!(effects[0], Effect::add_item("paper", 1));
        assert_eq!(effects[1], Effect::remove_item("coffee", 2));
        assert_eq!(effects[2], Effect::give_status("burnout", None));
        assert_eq!(
            effects[3],
            Effect::Message {
                text: "event.done".into(),
                confirm: DEFAULT_CONFIRM.into(),
                icon: Some("trophy".into()),
                fx: None,
            }
        );
        assert_eq!(effects[4], Effect::end_game(GameOutcome::Win));
    }

    #[test]
    fn test_effect_serialization() {
        let effect = Effect::choice(
            "choice.month",
            [ChoiceOption::new("choice.write", [Effect::add_item("paper", 1)])],
        );
        let json = serde_json::to_string(&effect).unwrap();
        let deserialized: Effect = serde_json::from_str(&json).unwrap();
        assert_eq!(effect, deserialized);
    }
}
