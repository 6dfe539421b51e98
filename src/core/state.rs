//! Game state: observable and engine-private parts.
//!
//! ## PublicState
//!
//! What the presentation layer may read for HUD rendering:
//! - Variables (including the `year`/`month` clock)
//! - Inventory
//! - Active statuses and their remaining duration
//! - Elapsed tick count
//!
//! ## GameState
//!
//! Complete state including:
//! - Public state
//! - Once-event bookkeeping
//! - Statuses given during the current tick
//! - Pending end-game request
//! - RNG
//!
//! All maps are `im` persistent structures, so cloning a whole state is
//! O(1). The engine relies on this to hand out snapshots and to run each
//! tick against a working copy that is committed only on success.

use im::{OrdMap, OrdSet};
use serde::{Deserialize, Serialize};

use super::inventory::Inventory;
use super::rng::GameRng;
use super::value::Value;
use super::variables::VariableStore;
use crate::rules::GameOutcome;

/// Variable holding the current month (1-based).
pub const MONTH_VAR: &str = "month";

/// Variable holding the current year (1-based).
pub const YEAR_VAR: &str = "year";

/// Months per simulated year.
pub const MONTHS_PER_YEAR: i64 = 12;

/// Placeholder prefix that reads inventory counts in message templates.
const ITEM_PLACEHOLDER_PREFIX: &str = "item.";

/// Observable game state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicState {
    /// World and player attributes.
    pub variables: VariableStore,

    /// Countable items.
    pub inventory: Inventory,

    /// Active statuses: id → remaining ticks (`None` = until cleared).
    statuses: OrdMap<String, Option<u32>>,

    /// Ticks completed in this run.
    pub ticks: u64,
}

impl PublicState {
    /// Create an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Clock ===

    /// Current month, 1 if unset.
    #[must_use]
    pub fn month(&self) -> i64 {
        self.variables.int_or(MONTH_VAR, 1)
    }

    /// Current year, 1 if unset.
    #[must_use]
    pub fn year(&self) -> i64 {
        self.variables.int_or(YEAR_VAR, 1)
    }

    /// Advance the clock by one month, rolling into the next year after
    /// month 12.
    pub fn advance_month(&mut self) {
        let month = self.month() + 1;
        if month > MONTHS_PER_YEAR {
            let year = self.year() + 1;
            self.variables.set(MONTH_VAR, 1);
            self.variables.set(YEAR_VAR, year);
        } else {
            self.variables.set(MONTH_VAR, month);
        }
    }

    // === Statuses ===

    /// Check if a status is active.
    #[must_use]
    pub fn has_status(&self, id: &str) -> bool {
        self.statuses.contains_key(id)
    }

    /// Remaining duration of an active status.
    ///
    /// `None` if inactive, `Some(None)` if it lasts until cleared.
    #[must_use]
    pub fn status_remaining(&self, id: &str) -> Option<Option<u32>> {
        self.statuses.get(id).copied()
    }

    /// Iterate active statuses in id order.
    pub fn statuses(&self) -> impl Iterator<Item = (&String, Option<u32>)> {
        self.statuses.iter().map(|(k, v)| (k, *v))
    }

    /// Activate a status, replacing any remaining duration.
    pub fn give_status(&mut self, id: impl Into<String>, duration: Option<u32>) {
        self.statuses.insert(id.into(), duration);
    }

    /// Deactivate a status. Returns true if it was active.
    pub fn clear_status(&mut self, id: &str) -> bool {
        self.statuses.remove(id).is_some()
    }

    /// Count down timed statuses by one tick, removing expired ones.
    ///
    /// Statuses in `fresh` keep their full duration. Returns the ids that
    /// expired.
    pub fn expire_statuses(&mut self, fresh: &OrdSet<String>) -> Vec<String> {
        let mut expired = Vec::new();
        let mut remaining = OrdMap::new();

        for (id, left) in self.statuses.iter() {
            match left {
                _ if fresh.contains(id) => {
                    remaining.insert(id.clone(), *left);
                }
                Some(n) if *n <= 1 => expired.push(id.clone()),
                Some(n) => {
                    remaining.insert(id.clone(), Some(n - 1));
                }
                None => {
                    remaining.insert(id.clone(), None);
                }
            }
        }

        self.statuses = remaining;
        expired
    }

    // === Templates ===

    /// Resolve a message placeholder against this state.
    ///
    /// `{name}` reads a variable, `{item.name}` reads an inventory count.
    #[must_use]
    pub fn placeholder(&self, name: &str) -> Option<String> {
        if let Some(item) = name.strip_prefix(ITEM_PLACEHOLDER_PREFIX) {
            return Some(self.inventory.count(item).to_string());
        }
        self.variables.get(name).map(Value::to_string)
    }
}

/// Full game state including engine bookkeeping.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Public state (observable by presentation).
    pub public: PublicState,

    /// Once-events that already fired this run.
    fired: OrdSet<String>,

    /// Statuses given since the last countdown.
    fresh_statuses: OrdSet<String>,

    /// Outcome requested by an `end_game` effect during the current tick.
    pending_outcome: Option<GameOutcome>,

    /// Deterministic RNG.
    pub rng: GameRng,
}

impl GameState {
    /// Create a new game state.
    #[must_use]
    pub fn new(public: PublicState, rng: GameRng) -> Self {
        Self {
            public,
            fired: OrdSet::new(),
            fresh_statuses: OrdSet::new(),
            pending_outcome: None,
            rng,
        }
    }

    /// Check whether a once-event already fired.
    #[must_use]
    pub fn has_fired(&self, event_id: &str) -> bool {
        self.fired.contains(event_id)
    }

    /// Record that a once-event fired.
    pub fn mark_fired(&mut self, event_id: impl Into<String>) {
        self.fired.insert(event_id.into());
    }

    /// Activate a status. It is not counted down until the next tick.
    pub fn give_status(&mut self, id: impl Into<String>, duration: Option<u32>) {
        let id = id.into();
        self.fresh_statuses.insert(id.clone());
        self.public.give_status(id, duration);
    }

    /// Count status durations down at the end of a tick.
    ///
    /// Statuses given during the tick start counting on the next one.
    /// Returns the ids that expired.
    pub fn count_down_statuses(&mut self) -> Vec<String> {
        let fresh = std::mem::take(&mut self.fresh_statuses);
        self.public.expire_statuses(&fresh)
    }

    /// Request a terminal outcome. The first request in a tick wins.
    pub fn request_outcome(&mut self, outcome: GameOutcome) {
        if self.pending_outcome.is_none() {
            self.pending_outcome = Some(outcome);
        }
    }

    /// Outcome requested during this tick, if any.
    #[must_use]
    pub fn pending_outcome(&self) -> Option<GameOutcome> {
        self.pending_outcome
    }
}
