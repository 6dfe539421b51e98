//! # phd-sim
//!
//! Event-driven engine for a narrative simulation game: the player advances
//! through simulated months, answers narrative events through dialog
//! choices, and tracks resources (papers, hope) toward a win or a loss.
//!
//! ## Design Principles
//!
//! 1. **Content-Driven**: Variables, items, statuses, events and endings
//!    are data, loaded from JSON or YAML. The engine hardcodes only the
//!    `year`/`month` clock.
//!
//! 2. **Presentation-Agnostic**: The engine never renders. It awaits a
//!    [`GuiActionProxy`] for messages and choices and exposes read-only
//!    state for HUDs.
//!
//! 3. **Deterministic**: Same content, same seed and same answers give the
//!    same run.
//!
//! ## Architecture
//!
//! - **Transactional Ticks**: Each tick works on an O(1) copy of the state
//!   (`im` persistent maps) and is committed only if it completes.
//!
//! - **Fail Loudly**: Content mistakes (missing variables, item underflow,
//!   unknown statuses) are errors, not silent defaults.
//!
//! ## Modules
//!
//! - `core`: Values, variables, inventory, state, RNG, configuration, errors
//! - `data`: Data sources, document shapes, loading and validation
//! - `triggers`: Conditions and event definitions
//! - `effects`: Effect vocabulary and the async resolver
//! - `rules`: Statuses, endings and the game engine
//! - `ui`: GUI Action Proxy trait and backends
//! - `i18n`: Localization dictionary

pub mod core;
pub mod data;
pub mod effects;
pub mod i18n;
pub mod rules;
pub mod triggers;
pub mod ui;

// Re-export commonly used types
pub use crate::core::{
    EngineError, GameConfig, GameRng, GameRngState, GameState, Inventory, PublicState, Value,
    VariableStore,
};

pub use crate::data::{
    AttributeDefinition, DataError, DataFormat, DataSource, EventsDocument, GameData,
    ItemDefinition,
};

pub use crate::effects::{ChoiceOption, Effect, EffectResolver, ResolverContext};

pub use crate::i18n::Dictionary;

pub use crate::rules::{
    EndingDefinition, EnginePhase, GameEngine, GameOutcome, StatusDefinition, StatusRegistry,
    TickReport,
};

pub use crate::triggers::{
    Comparison, ConditionContext, ConditionEvaluator, EventDefinition, EventRegistry, Operand,
    TriggerCondition,
};

pub use crate::ui::{
    Choice, ChoiceId, ChannelProxy, Displayed, GuiActionProxy, ScriptedProxy, UiError, UiRequest,
};
