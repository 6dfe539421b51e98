//! Effect resolution: executing effects on game state.
//!
//! Resolution is async because `message` and `choice` hand control to the
//! player. Sequences nest (choice options and `when` branches carry their
//! own), so the recursive entry points return boxed futures.
//!
//! A sequence stops early once an `end_game` effect has requested an
//! outcome.

use futures::future::{BoxFuture, FutureExt};
use tracing::debug;

use crate::core::{EngineError, GameState};
use crate::i18n::Dictionary;
use crate::rules::StatusRegistry;
use crate::triggers::{ConditionContext, ConditionEvaluator};
use crate::ui::{Choice, ChoiceSet, ChoiceId, GuiActionProxy};

use super::effect::{ChoiceOption, Effect};

/// What the resolver needs besides the state it mutates.
pub struct ResolverContext<'a> {
    /// Status definitions, for default durations.
    pub statuses: &'a StatusRegistry,
    /// Display text for message and option keys.
    pub dictionary: &'a Dictionary,
    /// Where messages and choices go.
    pub proxy: &'a mut dyn GuiActionProxy,
}

impl<'a> ResolverContext<'a> {
    /// Create a new context.
    pub fn new(
        statuses: &'a StatusRegistry,
        dictionary: &'a Dictionary,
        proxy: &'a mut dyn GuiActionProxy,
    ) -> Self {
        Self {
            statuses,
            dictionary,
            proxy,
        }
    }
}

/// Resolves effects on game state.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve effects in order, stopping after an `end_game` request.
    pub fn resolve_all<'a, 'ctx>(
        state: &'a mut GameState,
        effects: &'a [Effect],
        ctx: &'a mut ResolverContext<'ctx>,
    ) -> BoxFuture<'a, Result<(), EngineError>> {
        async move {
            for effect in effects {
                if state.pending_outcome().is_some() {
                    break;
                }
                Self::resolve(state, effect, ctx).await?;
            }
            Ok(())
        }
        .boxed()
    }

    /// Resolve a single effect.
    pub fn resolve<'a, 'ctx>(
        state: &'a mut GameState,
        effect: &'a Effect,
        ctx: &'a mut ResolverContext<'ctx>,
    ) -> BoxFuture<'a, Result<(), EngineError>> {
        async move {
            match effect {
                // === Variables ===
                Effect::SetVar { name, value } => {
                    state.public.variables.set(name.clone(), value.clone());
                }

                Effect::ModifyVar { name, delta } => {
                    state.public.variables.modify(name, *delta)?;
                }

                Effect::RandomVar { name, min, max } => {
                    if min > max {
                        return Err(EngineError::InvalidRange {
                            name: name.clone(),
                            min: *min,
                            max: *max,
                        });
                    }
                    // Fail on a missing variable before drawing.
                    state.public.variables.require_int(name)?;
                    let roll = state.rng.gen_range_inclusive(*min..=*max);
                    state.public.variables.modify(name, roll)?;
                }

                // === Inventory ===
                Effect::AddItem { item, count } => {
                    state.public.inventory.add(item, *count);
                }

                Effect::RemoveItem { item, count } => {
                    state.public.inventory.remove(item, *count)?;
                }

                // === Statuses ===
                Effect::GiveStatus { status, duration } => {
                    let definition = ctx
                        .statuses
                        .get(status)
                        .ok_or_else(|| EngineError::UnknownStatus(status.clone()))?;
                    state.give_status(status.clone(), duration.or(definition.duration));
                }

                Effect::ClearStatus { status } => {
                    if !ctx.statuses.contains(status) {
                        return Err(EngineError::UnknownStatus(status.clone()));
                    }
                    state.public.clear_status(status);
                }

                // === Interaction ===
                Effect::Message {
                    text,
                    confirm,
                    icon,
                    fx,
                } => {
                    let message = Self::localize(state, ctx.dictionary, text);
                    let confirm = Self::localize(state, ctx.dictionary, confirm);
                    ctx.proxy
                        .display_message(&message, &confirm, icon.as_deref(), fx.as_deref())
                        .await;
                }

                Effect::Choice {
                    text,
                    icon,
                    options,
                } => {
                    let option = Self::ask(state, ctx, text, icon.as_deref(), options).await?;
                    Self::resolve_all(state, &option.effects, ctx).await?;
                }

                // === Control ===
                Effect::When {
                    condition,
                    then,
                    otherwise,
                } => {
                    let holds = {
                        let mut cond_ctx = ConditionContext::new(&state.public, &mut state.rng);
                        ConditionEvaluator::evaluate(condition, &mut cond_ctx)?
                    };
                    let branch = if holds { then } else { otherwise };
                    Self::resolve_all(state, branch, ctx).await?;
                }

                Effect::EndGame { outcome } => {
                    state.request_outcome(*outcome);
                }
            }
            Ok(())
        }
        .boxed()
    }

    /// Display a choice set and return the chosen option.
    async fn ask<'o>(
        state: &GameState,
        ctx: &mut ResolverContext<'_>,
        text: &str,
        icon: Option<&str>,
        options: &'o [ChoiceOption],
    ) -> Result<&'o ChoiceOption, EngineError> {
        let message = Self::localize(state, ctx.dictionary, text);
        let choices: ChoiceSet = options
            .iter()
            .enumerate()
            .filter_map(|(index, option)| {
                let id = ChoiceId::new(u8::try_from(index).ok()?);
                Some(Choice::new(id, Self::localize(state, ctx.dictionary, &option.text)))
            })
            .collect();

        let chosen = ctx.proxy.display_choices(&message, &choices, icon).await;
        debug!(%chosen, offered = choices.len(), "choice answered");

        options.get(chosen.index()).ok_or(EngineError::InvalidChoice {
            chosen,
            offered: choices.len(),
        })
    }

    /// Resolve a text key against the dictionary and current state.
    fn localize(state: &GameState, dictionary: &Dictionary, key: &str) -> String {
        dictionary.resolve(key, |name| state.public.placeholder(name))
    }
}
