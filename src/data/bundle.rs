//! Loaded and validated game content.
//!
//! All five sources load concurrently. Nothing is handed to the engine
//! until every source has parsed and the cross references check out, so a
//! broken content set never produces a half-initialized game.
//!
//! ## Validation
//!
//! - attribute, item, status and event ids are unique
//! - every referenced status is defined
//! - choice sets have between 1 and 255 options
//! - `chance` is at most 100
//! - `random_var` ranges are not inverted

use futures::try_join;
use tracing::info;

use crate::core::{EngineError, GameConfig, PublicState, MONTH_VAR, YEAR_VAR};
use crate::effects::Effect;
use crate::i18n::Dictionary;
use crate::rules::{EndingDefinition, StatusDefinition, StatusRegistry};
use crate::triggers::{EventDefinition, EventRegistry, TriggerCondition};

use super::definitions::{AttributeDefinition, EventsDocument, ItemDefinition};
use super::source::{load_document, DataError};

/// Largest choice set a [`crate::ui::ChoiceId`] can address.
const MAX_OPTIONS: usize = u8::MAX as usize;

/// Everything the engine needs to run a game.
#[derive(Clone, Debug)]
pub struct GameData {
    pub attributes: Vec<AttributeDefinition>,
    pub items: Vec<ItemDefinition>,
    pub statuses: StatusRegistry,
    pub events: EventRegistry,
    pub endings: Vec<EndingDefinition>,
    pub dictionary: Dictionary,
}

impl GameData {
    /// Assemble and validate content built in code.
    pub fn new(
        attributes: Vec<AttributeDefinition>,
        items: Vec<ItemDefinition>,
        statuses: Vec<StatusDefinition>,
        events: Vec<EventDefinition>,
        endings: Vec<EndingDefinition>,
    ) -> Result<Self, DataError> {
        check_unique("attribute", attributes.iter().map(|a| a.name.as_str()))?;
        check_unique("item", items.iter().map(|i| i.name.as_str()))?;

        let statuses = StatusRegistry::from_definitions(statuses)
            .map_err(|id| DataError::Invalid(format!("duplicate status id: {id}")))?;
        let events = EventRegistry::from_events(events)
            .map_err(|id| DataError::Invalid(format!("duplicate event id: {id}")))?;

        let data = Self {
            attributes,
            items,
            statuses,
            events,
            endings,
            dictionary: Dictionary::empty(),
        };
        data.validate()?;
        Ok(data)
    }

    /// Use a language dictionary.
    #[must_use]
    pub fn with_dictionary(mut self, dictionary: Dictionary) -> Self {
        self.dictionary = dictionary;
        self
    }

    /// Load every source named by the configuration.
    pub async fn load(config: &GameConfig) -> Result<Self, EngineError> {
        let (attributes, items, statuses, events, dictionary) = try_join!(
            async {
                load_document::<Vec<AttributeDefinition>>(&config.attributes)
                    .await
                    .map_err(|e| EngineError::load("attributes", e))
            },
            async {
                load_document::<Vec<ItemDefinition>>(&config.items)
                    .await
                    .map_err(|e| EngineError::load("items", e))
            },
            async {
                load_document::<Vec<StatusDefinition>>(&config.statuses)
                    .await
                    .map_err(|e| EngineError::load("statuses", e))
            },
            async {
                load_document::<EventsDocument>(&config.events)
                    .await
                    .map_err(|e| EngineError::load("events", e))
            },
            async {
                match &config.language {
                    Some(source) => Dictionary::load_from(source)
                        .await
                        .map_err(|e| EngineError::load("language", e)),
                    None => Ok(Dictionary::empty()),
                }
            },
        )?;

        let data = Self::new(attributes, items, statuses, events.events, events.endings)
            .map_err(|e| EngineError::load("game data", e))?
            .with_dictionary(dictionary);

        info!(
            attributes = data.attributes.len(),
            items = data.items.len(),
            statuses = data.statuses.len(),
            events = data.events.len(),
            endings = data.endings.len(),
            translations = data.dictionary.len(),
            "game data loaded"
        );
        Ok(data)
    }

    /// Observable state at the start of a run.
    ///
    /// The clock variables default to month 1 of year 1 unless an
    /// attribute sets them.
    #[must_use]
    pub fn initial_state(&self) -> PublicState {
        let mut state = PublicState::new();
        for attribute in &self.attributes {
            state.variables.set(attribute.name.clone(), attribute.initial.clone());
        }
        for item in &self.items {
            state.inventory.set(item.name.clone(), item.initial);
        }
        for clock in [MONTH_VAR, YEAR_VAR] {
            if !state.variables.contains(clock) {
                state.variables.set(clock, 1);
            }
        }
        state
    }

    /// Check cross references across all content.
    pub fn validate(&self) -> Result<(), DataError> {
        for event in self.events.iter() {
            self.check_condition(&event.condition)
                .and_then(|()| self.check_effects(&event.effects))
                .map_err(|e| in_context("event", &event.id, e))?;
        }
        for status in self.statuses.iter() {
            self.check_effects(&status.effects)
                .map_err(|e| in_context("status", &status.id, e))?;
        }
        for (index, ending) in self.endings.iter().enumerate() {
            self.check_condition(&ending.condition)
                .map_err(|e| in_context("ending", &index.to_string(), e))?;
        }
        Ok(())
    }

    fn check_effects(&self, effects: &[Effect]) -> Result<(), String> {
        let mut problem = None;
        for effect in effects {
            effect.walk(&mut |e| {
                if problem.is_none() {
                    problem = self.check_effect(e).err();
                }
            });
        }
        problem.map_or(Ok(()), Err)
    }

    fn check_effect(&self, effect: &Effect) -> Result<(), String> {
        match effect {
            Effect::GiveStatus { status, .. } | Effect::ClearStatus { status } => {
                self.check_status(status)
            }
            Effect::RandomVar { name, min, max } if min > max => {
                Err(format!("random_var {name}: min {min} exceeds max {max}"))
            }
            Effect::Choice { text, options, .. } if options.is_empty() => {
                Err(format!("choice {text} has no options"))
            }
            Effect::Choice { text, options, .. } if options.len() > MAX_OPTIONS => Err(format!(
                "choice {text} has {} options, at most {MAX_OPTIONS} allowed",
                options.len()
            )),
            Effect::When { condition, .. } => self.check_condition(condition),
            _ => Ok(()),
        }
    }

    fn check_condition(&self, condition: &TriggerCondition) -> Result<(), String> {
        let mut problem = None;
        condition.walk(&mut |c| {
            if problem.is_some() {
                return;
            }
            problem = match c {
                TriggerCondition::HasStatus(status) => self.check_status(status).err(),
                TriggerCondition::Chance(percent) if *percent > 100 => {
                    Some(format!("chance {percent} is above 100"))
                }
                _ => None,
            };
        });
        problem.map_or(Ok(()), Err)
    }

    fn check_status(&self, status: &str) -> Result<(), String> {
        if self.statuses.contains(status) {
            Ok(())
        } else {
            Err(format!("unknown status {status}"))
        }
    }
}

fn check_unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), DataError> {
    let mut seen = rustc_hash::FxHashSet::default();
    for id in ids {
        if !seen.insert(id) {
            return Err(DataError::Invalid(format!("duplicate {kind} id: {id}")));
        }
    }
    Ok(())
}

fn in_context(kind: &str, id: &str, problem: String) -> DataError {
    DataError::Invalid(format!("{kind} {id}: {problem}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataSource;
    use crate::effects::ChoiceOption;
    use crate::rules::GameOutcome;

    fn build(events: Vec<EventDefinition>) -> Result<GameData, DataError> {
        GameData::new(
            vec![AttributeDefinition::new("hope", 50)],
            vec![ItemDefinition::new("paper", 0)],
            vec![StatusDefinition::new("burnout").with_duration(2)],
            events,
            vec![EndingDefinition::new(GameOutcome::Win, TriggerCondition::item_at_least("paper", 3))],
        )
    }

    fn invalid_message(result: Result<GameData, DataError>) -> String {
        match result {
            Err(DataError::Invalid(message)) => message,
            other => panic!("Expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_initial_state() {
        let data = build(vec![]).unwrap();
        let state = data.initial_state();

        assert_eq!(state.variables.int_or("hope", 0), 50);
        assert_eq!(state.inventory.count("paper"), 0);
        assert_eq!((state.year(), state.month()), (1, 1));
        assert!(state.variables.contains(MONTH_VAR));
        assert_eq!(state.ticks, 0);
    }

    #[test]
    fn test_clock_attributes_respected() {
        let data = GameData::new(
            vec![AttributeDefinition::new(MONTH_VAR, 9)],
            vec![],
            vec![],
            vec![],
            vec![],
        )
        .unwrap();
        assert_eq!(data.initial_state().month(), 9);
    }

    #[test]
    fn test_duplicate_ids() {
        let message = invalid_message(GameData::new(
            vec![AttributeDefinition::new("hope", 1), AttributeDefinition::new("hope", 2)],
            vec![],
            vec![],
            vec![],
            vec![],
        ));
        assert!(message.contains("duplicate attribute id: hope"));

        let message = invalid_message(build(vec![EventDefinition::new("a"), EventDefinition::new("a")]));
        assert!(message.contains("duplicate event id: a"));
    }

    #[test]
    fn test_unknown_status_reference() {
        let message = invalid_message(build(vec![
            EventDefinition::new("flu").with_effect(Effect::give_status("sick", None))
        ]));
        assert!(message.contains("event flu"));
        assert!(message.contains("unknown status sick"));

        let nested = EventDefinition::new("check").with_effect(Effect::when(
            TriggerCondition::has_status("sick"),
            [],
            [],
        ));
        assert!(invalid_message(build(vec![nested])).contains("unknown status sick"));
    }

    #[test]
    fn test_choice_sizes() {
        let empty = EventDefinition::new("empty").with_effect(Effect::choice("choice.none", []));
        assert!(invalid_message(build(vec![empty])).contains("no options"));

        let options = (0..256).map(|i| ChoiceOption::new(format!("opt{i}"), []));
        let huge = EventDefinition::new("huge").with_effect(Effect::choice("choice.huge", options));
        assert!(invalid_message(build(vec![huge])).contains("at most 255"));

        let options = (0..255).map(|i| ChoiceOption::new(format!("opt{i}"), []));
        let largest = EventDefinition::new("largest").with_effect(Effect::choice("choice.ok", options));
        assert!(build(vec![largest]).is_ok());
    }

    #[test]
    fn test_chance_and_range_bounds() {
        let chance = EventDefinition::new("lucky").with_condition(TriggerCondition::Chance(101));
        assert!(invalid_message(build(vec![chance])).contains("above 100"));

        let range = EventDefinition::new("swing").with_effect(Effect::random_var("hope", 5, -5));
        assert!(invalid_message(build(vec![range])).contains("exceeds max"));
    }

    #[test]
    fn test_status_effects_validated() {
        let result = GameData::new(
            vec![],
            vec![],
            vec![StatusDefinition::new("burnout").with_effect(Effect::clear_status("ghost"))],
            vec![],
            vec![],
        );
        assert!(invalid_message(result).contains("status burnout"));
    }

    #[tokio::test]
    async fn test_load_inline() {
        let config = GameConfig::new(
            DataSource::json(r#"[{ "name": "hope", "initial": 50 }]"#),
            DataSource::json(r#"[{ "name": "paper" }]"#),
            DataSource::json("[]"),
            DataSource::yaml("events: []\n"),
        )
        .with_language(DataSource::yaml("ui:\n  ok: Fine\n"));

        let data = GameData::load(&config).await.unwrap();
        assert_eq!(data.attributes.len(), 1);
        assert_eq!(data.items[0].name, "paper");
        assert_eq!(data.dictionary.get("ui.ok"), Some("Fine"));
    }

    #[tokio::test]
    async fn test_load_names_failing_source() {
        let config = GameConfig::new(
            DataSource::json("[]"),
            DataSource::json("not json"),
            DataSource::json("[]"),
            DataSource::json(r#"{ "events": [] }"#),
        );

        match GameData::load(&config).await {
            Err(EngineError::Load { what, .. }) => assert_eq!(what, "items"),
            other => panic!("Expected Load error, got {other:?}"),
        }
    }
}
