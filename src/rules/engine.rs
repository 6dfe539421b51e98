//! The game engine: tick loop and run lifecycle.
//!
//! ## Lifecycle
//!
//! ```text
//! Unloaded --load--> Loaded --start--> Running --ending--> Ended
//!                                         ^                  |
//!                                         +------start-------+
//! ```
//!
//! `start` also restarts a Running game. Loading is only allowed before a
//! run begins.
//!
//! ## Tick
//!
//! 1. Apply the per-tick effects of the statuses active at tick start, in
//!    id order. A status cleared earlier in the pass is skipped.
//! 2. Evaluate events in registry order and apply the effects of each one
//!    that fires, awaiting the proxy for messages and choices. An
//!    `end_game` effect stops the remaining events.
//! 3. Check endings: a pending `end_game` request wins, otherwise the first
//!    authored ending whose condition holds.
//! 4. Count status durations down. Statuses given during this tick keep
//!    their full duration, so a status given in tick N is active for the
//!    `duration` ticks starting at N + 1.
//! 5. Without an ending, advance the clock one month.
//!
//! A tick runs against a copy of the state and is committed only when it
//! completes, so an error leaves the game exactly as it was.

use tracing::{debug, info};

use crate::core::{
    EngineError, GameConfig, GameRng, GameRngState, GameState, Inventory, PublicState,
    VariableStore,
};
use crate::data::GameData;
use crate::effects::{EffectResolver, ResolverContext, DEFAULT_CONFIRM};
use crate::i18n::Dictionary;
use crate::triggers::{ConditionContext, ConditionEvaluator, EventRegistry};
use crate::ui::GuiActionProxy;

use super::ending::GameOutcome;

type EndCallback = Box<dyn FnOnce(GameOutcome) + Send>;

/// Where the engine is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnginePhase {
    Unloaded,
    Loaded,
    Running,
    Ended,
}

impl std::fmt::Display for EnginePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EnginePhase::Unloaded => "unloaded",
            EnginePhase::Loaded => "loaded",
            EnginePhase::Running => "running",
            EnginePhase::Ended => "ended",
        };
        f.write_str(name)
    }
}

/// What happened during one tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickReport {
    /// Tick number, starting at 1.
    pub tick: u64,
    /// Events that fired, in order.
    pub fired: Vec<String>,
    /// Statuses that ran out.
    pub expired: Vec<String>,
    /// Outcome, if this tick ended the game.
    pub outcome: Option<GameOutcome>,
}

/// Event-driven game engine.
///
/// Generic over its display backend so the proxy can be inspected after
/// a run (see [`GameEngine::proxy`]).
pub struct GameEngine<P: GuiActionProxy> {
    config: GameConfig,
    proxy: P,
    data: Option<GameData>,
    state: GameState,
    phase: EnginePhase,
    outcome: Option<GameOutcome>,
    on_end: Option<EndCallback>,
}

impl<P: GuiActionProxy> GameEngine<P> {
    /// Create an engine. Nothing is loaded yet.
    pub fn new(config: GameConfig, proxy: P) -> Self {
        let rng = GameRng::new(config.seed.unwrap_or_default());
        Self {
            config,
            proxy,
            data: None,
            state: GameState::new(PublicState::new(), rng),
            phase: EnginePhase::Unloaded,
            outcome: None,
            on_end: None,
        }
    }

    // === Lifecycle ===

    /// Load every configured source.
    ///
    /// On failure the engine keeps its previous phase and content.
    pub async fn load_game_data(&mut self) -> Result<(), EngineError> {
        self.check_loadable()?;
        let data = GameData::load(&self.config).await?;
        self.install(data);
        Ok(())
    }

    /// Install content that was built or loaded elsewhere.
    pub fn load_with(&mut self, data: GameData) -> Result<(), EngineError> {
        self.check_loadable()?;
        data.validate()
            .map_err(|e| EngineError::load("game data", e))?;
        self.install(data);
        Ok(())
    }

    fn check_loadable(&self) -> Result<(), EngineError> {
        match self.phase {
            EnginePhase::Unloaded | EnginePhase::Loaded => Ok(()),
            phase => Err(EngineError::InvalidPhase {
                operation: "load game data",
                phase,
            }),
        }
    }

    fn install(&mut self, data: GameData) {
        self.state = GameState::new(data.initial_state(), self.state.rng.clone());
        self.data = Some(data);
        self.phase = EnginePhase::Loaded;
    }

    /// Begin a new run.
    ///
    /// Uses the configured seed unless `new_seed` is set or no seed is
    /// configured, in which case a fresh seed is drawn (see
    /// [`GameEngine::seed`] to replay it).
    pub fn start(&mut self, new_seed: bool) -> Result<(), EngineError> {
        let data = match (self.phase, self.data.as_ref()) {
            (EnginePhase::Unloaded, _) | (_, None) => return Err(EngineError::NotLoaded),
            (_, Some(data)) => data,
        };

        let rng = match (new_seed, self.config.seed) {
            (false, Some(seed)) => GameRng::new(seed),
            _ => GameRng::from_entropy(),
        };
        let seed = rng.seed();

        self.state = GameState::new(data.initial_state(), rng);
        self.phase = EnginePhase::Running;
        self.outcome = None;

        info!(seed, events = data.events.len(), "game started");
        Ok(())
    }

    /// Register the end-game callback.
    ///
    /// It fires once, when the game next ends. A restarted run needs a new
    /// registration.
    pub fn on_game_end(&mut self, callback: impl FnOnce(GameOutcome) + Send + 'static) {
        self.on_end = Some(Box::new(callback));
    }

    // === Tick loop ===

    /// Advance the game one month.
    pub async fn tick(&mut self) -> Result<TickReport, EngineError> {
        match self.phase {
            EnginePhase::Running => {}
            EnginePhase::Ended => {
                return Err(self
                    .outcome
                    .map_or(EngineError::NotRunning(EnginePhase::Ended), EngineError::GameOver));
            }
            phase => return Err(EngineError::NotRunning(phase)),
        }
        let data = self.data.as_ref().ok_or(EngineError::NotLoaded)?;

        let mut state = self.state.clone();
        let tick = state.public.ticks + 1;
        let mut ctx = ResolverContext::new(&data.statuses, &data.dictionary, &mut self.proxy);

        // Statuses
        let active: Vec<String> = state.public.statuses().map(|(id, _)| id.clone()).collect();
        for id in &active {
            if state.pending_outcome().is_some() {
                break;
            }
            if !state.public.has_status(id) {
                continue;
            }
            if let Some(status) = data.statuses.get(id) {
                EffectResolver::resolve_all(&mut state, &status.effects, &mut ctx).await?;
            }
        }

        // Events
        let mut fired = Vec::new();
        for event in data.events.iter() {
            if state.pending_outcome().is_some() {
                break;
            }
            if !EventRegistry::should_fire(event, &mut state)? {
                continue;
            }
            debug!(event = %event.id, tick, "event fired");
            if event.once {
                state.mark_fired(event.id.clone());
            }
            fired.push(event.id.clone());
            EffectResolver::resolve_all(&mut state, &event.effects, &mut ctx).await?;
        }

        // Endings
        let mut ending = state.pending_outcome().map(|outcome| (outcome, None));
        if ending.is_none() {
            for candidate in &data.endings {
                let mut cond_ctx = ConditionContext::new(&state.public, &mut state.rng);
                if ConditionEvaluator::evaluate(&candidate.condition, &mut cond_ctx)? {
                    ending = Some((candidate.outcome, candidate.message.as_deref()));
                    break;
                }
            }
        }

        let expired = state.count_down_statuses();

        match ending {
            Some((_, Some(key))) => {
                let lookup = |name: &str| state.public.placeholder(name);
                let text = data.dictionary.resolve(key, lookup);
                let confirm = data.dictionary.resolve(DEFAULT_CONFIRM, lookup);
                ctx.proxy.display_message(&text, &confirm, None, None).await;
            }
            Some((_, None)) => {}
            None => state.public.advance_month(),
        }

        state.public.ticks = tick;
        self.state = state;

        let outcome = ending.map(|(outcome, _)| outcome);
        if let Some(outcome) = outcome {
            self.finish(outcome);
        }

        Ok(TickReport {
            tick,
            fired,
            expired,
            outcome,
        })
    }

    /// Tick until the game ends or `max_ticks` ticks have run.
    ///
    /// Returns the outcome if the game ended.
    pub async fn run(&mut self, max_ticks: u64) -> Result<Option<GameOutcome>, EngineError> {
        for _ in 0..max_ticks {
            if let Some(outcome) = self.tick().await?.outcome {
                return Ok(Some(outcome));
            }
        }
        Ok(None)
    }

    fn finish(&mut self, outcome: GameOutcome) {
        self.phase = EnginePhase::Ended;
        self.outcome = Some(outcome);
        info!(
            %outcome,
            ticks = self.state.public.ticks,
            year = self.state.public.year(),
            month = self.state.public.month(),
            "game ended"
        );
        if let Some(callback) = self.on_end.take() {
            callback(outcome);
        }
    }

    // === Accessors ===

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    /// Outcome of the finished run.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Current variables.
    #[must_use]
    pub fn variables(&self) -> &VariableStore {
        &self.state.public.variables
    }

    /// Current inventory.
    #[must_use]
    pub fn inventory(&self) -> &Inventory {
        &self.state.public.inventory
    }

    /// Borrow the observable state.
    #[must_use]
    pub fn public_state(&self) -> &PublicState {
        &self.state.public
    }

    /// Detached copy of the observable state. O(1).
    #[must_use]
    pub fn snapshot(&self) -> PublicState {
        self.state.public.clone()
    }

    /// Seed of the current run, once started.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.has_run().then(|| self.state.rng.seed())
    }

    /// RNG position of the current run, once started.
    #[must_use]
    pub fn rng_state(&self) -> Option<GameRngState> {
        self.has_run().then(|| self.state.rng.state())
    }

    fn has_run(&self) -> bool {
        matches!(self.phase, EnginePhase::Running | EnginePhase::Ended)
    }

    /// Loaded language dictionary.
    #[must_use]
    pub fn dictionary(&self) -> Option<&Dictionary> {
        self.data.as_ref().map(|d| &d.dictionary)
    }

    /// Loaded content.
    #[must_use]
    pub fn data(&self) -> Option<&GameData> {
        self.data.as_ref()
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Display backend.
    #[must_use]
    pub fn proxy(&self) -> &P {
        &self.proxy
    }

    /// Display backend, mutably.
    pub fn proxy_mut(&mut self) -> &mut P {
        &mut self.proxy
    }
}
