//! Trigger conditions.
//!
//! Conditions decide whether an event fires or an ending applies. They
//! read variables, inventory counts and active statuses, and may roll the
//! game RNG (`chance`). Content authors write them in JSON/YAML:
//!
//! ```yaml
//! condition:
//!   all:
//!     - compare: { left: { var: hope }, op: "<", right: { value: 20 } }
//!     - chance: 30
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, GameRng, PublicState, Value};

/// One side of a numeric comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    /// An integer variable (must exist).
    Var(String),
    /// An inventory count.
    Item(String),
    /// A literal.
    Value(i64),
}

impl Operand {
    /// Resolve to an integer against the current state.
    pub fn resolve(&self, state: &PublicState) -> Result<i64, EngineError> {
        match self {
            Operand::Var(name) => state.variables.require_int(name),
            Operand::Item(item) => Ok(i64::from(state.inventory.count(item))),
            Operand::Value(n) => Ok(*n),
        }
    }
}

/// Comparison operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = ">")]
    Greater,
}

impl Comparison {
    /// Apply the operator.
    #[must_use]
    pub fn holds(self, left: i64, right: i64) -> bool {
        match self {
            Comparison::Less => left < right,
            Comparison::LessOrEqual => left <= right,
            Comparison::Equal => left == right,
            Comparison::NotEqual => left != right,
            Comparison::GreaterOrEqual => left >= right,
            Comparison::Greater => left > right,
        }
    }
}

/// A condition over game state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerCondition {
    // === Constants ===

    /// Always matches.
    #[default]
    Always,

    /// Never matches (disabled content).
    Never,

    // === State Filters ===

    /// Numeric comparison of two operands.
    Compare {
        left: Operand,
        op: Comparison,
        right: Operand,
    },

    /// Variable equals a value exactly (works for text).
    VarEquals { name: String, value: Value },

    /// Status is currently active.
    HasStatus(String),

    // === Randomness ===

    /// Percent chance (0-100), rolled on the game RNG.
    Chance(u8),

    // === Combinators ===

    /// All conditions must be true.
    All(Vec<TriggerCondition>),

    /// At least one condition must be true.
    Any(Vec<TriggerCondition>),

    /// Condition must be false.
    Not(Box<TriggerCondition>),
}

impl TriggerCondition {
    /// Compare two operands.
    pub fn compare(left: Operand, op: Comparison, right: Operand) -> Self {
        Self::Compare { left, op, right }
    }

    /// Variable is at least `min`.
    pub fn var_at_least(name: impl Into<String>, min: i64) -> Self {
        Self::compare(Operand::Var(name.into()), Comparison::GreaterOrEqual, Operand::Value(min))
    }

    /// Variable is at most `max`.
    pub fn var_at_most(name: impl Into<String>, max: i64) -> Self {
        Self::compare(Operand::Var(name.into()), Comparison::LessOrEqual, Operand::Value(max))
    }

    /// Item count is at least `min`.
    pub fn item_at_least(item: impl Into<String>, min: i64) -> Self {
        Self::compare(Operand::Item(item.into()), Comparison::GreaterOrEqual, Operand::Value(min))
    }

    /// Status is active.
    pub fn has_status(id: impl Into<String>) -> Self {
        Self::HasStatus(id.into())
    }

    /// Create an AND condition.
    pub fn all(conditions: impl IntoIterator<Item = TriggerCondition>) -> Self {
        Self::All(conditions.into_iter().collect())
    }

    /// Create an OR condition.
    pub fn any(conditions: impl IntoIterator<Item = TriggerCondition>) -> Self {
        Self::Any(conditions.into_iter().collect())
    }

    /// Negate this condition.
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Add another condition with AND.
    pub fn and(self, other: TriggerCondition) -> Self {
        match self {
            Self::All(mut conditions) => {
                conditions.push(other);
                Self::All(conditions)
            }
            _ => Self::All(vec![self, other]),
        }
    }

    /// Add another condition with OR.
    pub fn or(self, other: TriggerCondition) -> Self {
        match self {
            Self::Any(mut conditions) => {
                conditions.push(other);
                Self::Any(conditions)
            }
            _ => Self::Any(vec![self, other]),
        }
    }

    /// Visit this condition and every nested one.
    pub fn walk(&self, visit: &mut impl FnMut(&TriggerCondition)) {
        visit(self);
        match self {
            Self::All(conditions) | Self::Any(conditions) => {
                for c in conditions {
                    c.walk(visit);
                }
            }
            Self::Not(inner) => inner.walk(visit),
            _ => {}
        }
    }
}

/// Context for evaluating conditions.
pub struct ConditionContext<'a> {
    /// Current game state.
    pub state: &'a PublicState,
    /// RNG for chance rolls.
    pub rng: &'a mut GameRng,
}

impl<'a> ConditionContext<'a> {
    /// Create a new context.
    pub fn new(state: &'a PublicState, rng: &'a mut GameRng) -> Self {
        Self { state, rng }
    }
}

/// Evaluator for conditions.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Check if a condition is satisfied.
    ///
    /// `all`/`any` short-circuit left to right, so chance rolls after a
    /// deciding sub-condition are not drawn.
    pub fn evaluate(
        condition: &TriggerCondition,
        ctx: &mut ConditionContext<'_>,
    ) -> Result<bool, EngineError> {
        match condition {
            TriggerCondition::Always => Ok(true),

            TriggerCondition::Never => Ok(false),

            TriggerCondition::Compare { left, op, right } => {
                let l = left.resolve(ctx.state)?;
                let r = right.resolve(ctx.state)?;
                Ok(op.holds(l, r))
            }

            TriggerCondition::VarEquals { name, value } => {
                Ok(ctx.state.variables.require(name)? == value)
            }

            TriggerCondition::HasStatus(id) => Ok(ctx.state.has_status(id)),

            TriggerCondition::Chance(percent) => Ok(ctx.rng.roll_percent(*percent)),

            TriggerCondition::All(conditions) => {
                for c in conditions {
                    if !Self::evaluate(c, ctx)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }

            TriggerCondition::Any(conditions) => {
                for c in conditions {
                    if Self::evaluate(c, ctx)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }

            TriggerCondition::Not(inner) => Ok(!Self::evaluate(inner, ctx)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{parse_document, DataFormat};

    fn test_state() -> PublicState {
        let mut state = PublicState::new();
        state.variables.set("hope", 50);
        state.variables.set("papersRequired", 3);
        state.variables.set("advisor", "Dr. Smith");
        state.inventory.set("paper", 1);
        state
    }

    fn eval(condition: &TriggerCondition, state: &PublicState) -> Result<bool, EngineError> {
        let mut rng = GameRng::new(42);
        let mut ctx = ConditionContext::new(state, &mut rng);
        ConditionEvaluator::evaluate(condition, &mut ctx)
    }

    #[test]
    fn test_compare_operands() {
        let state = test_state();

        assert!(eval(&TriggerCondition::var_at_least("hope", 50), &state).unwrap());
        assert!(!eval(&TriggerCondition::var_at_least("hope", 51), &state).unwrap());
        assert!(eval(&TriggerCondition::var_at_most("hope", 50), &state).unwrap());
        assert!(eval(&TriggerCondition::item_at_least("paper", 1), &state).unwrap());
        assert!(!eval(&TriggerCondition::item_at_least("grant", 1), &state).unwrap());

        let papers_done = TriggerCondition::compare(
            Operand::Item("paper".into()),
            Comparison::GreaterOrEqual,
            Operand::Var("papersRequired".into()),
        );
        assert!(!eval(&papers_done, &state).unwrap());
    }

    #[test]
    fn test_comparison_ops() {
        assert!(Comparison::Less.holds(1, 2));
        assert!(!Comparison::Less.holds(2, 2));
        assert!(Comparison::LessOrEqual.holds(2, 2));
        assert!(Comparison::Equal.holds(2, 2));
        assert!(Comparison::NotEqual.holds(1, 2));
        assert!(Comparison::GreaterOrEqual.holds(2, 2));
        assert!(Comparison::Greater.holds(3, 2));
    }

    #[test]
    fn test_missing_variable_is_an_error() {
        let state = test_state();
        let err = eval(&TriggerCondition::var_at_least("funding", 1), &state).unwrap_err();
        assert!(matches!(err, EngineError::VariableNotFound(name) if name == "funding"));
    }

    #[test]
    fn test_text_variable_in_comparison_is_an_error() {
        let state = test_state();
        let err = eval(&TriggerCondition::var_at_least("advisor", 1), &state).unwrap_err();
        assert!(matches!(err, EngineError::NotAnInteger(_)));
    }

    #[test]
    fn test_var_equals_text() {
        let state = test_state();
        let cond = TriggerCondition::VarEquals {
            name: "advisor".into(),
            value: Value::from("Dr. Smith"),
        };
        assert!(eval(&cond, &state).unwrap());
    }

    #[test]
    fn test_has_status() {
        let mut state = test_state();
        let cond = TriggerCondition::has_status("burnout");
        assert!(!eval(&cond, &state).unwrap());

        state.give_status("burnout", Some(2));
        assert!(eval(&cond, &state).unwrap());
    }

    #[test]
    fn test_chance_extremes() {
        let state = test_state();
        assert!(eval(&TriggerCondition::Chance(100), &state).unwrap());
        assert!(!eval(&TriggerCondition::Chance(0), &state).unwrap());
    }

    #[test]
    fn test_combinators() {
        let state = test_state();

        let all_true = TriggerCondition::all([
            TriggerCondition::Always,
            TriggerCondition::var_at_least("hope", 10),
        ]);
        assert!(eval(&all_true, &state).unwrap());

        let any_true = TriggerCondition::any([
            TriggerCondition::Never,
            TriggerCondition::var_at_least("hope", 10),
        ]);
        assert!(eval(&any_true, &state).unwrap());

        assert!(eval(&TriggerCondition::Never.negate(), &state).unwrap());
    }

    #[test]
    fn test_short_circuit_skips_errors() {
        let state = test_state();

        // The missing variable is never read.
        let guarded = TriggerCondition::all([
            TriggerCondition::Never,
            TriggerCondition::var_at_least("funding", 1),
        ]);
        assert!(!eval(&guarded, &state).unwrap());
    }

    #[test]
    fn test_short_circuit_skips_rolls() {
        let state = test_state();
        let mut rng = GameRng::new(5);
        let before = rng.state();

        let cond = TriggerCondition::any([TriggerCondition::Always, TriggerCondition::Chance(50)]);
        let mut ctx = ConditionContext::new(&state, &mut rng);
        assert!(ConditionEvaluator::evaluate(&cond, &mut ctx).unwrap());

        assert_eq!(rng.state(), before);
    }

    #[test]
    fn test_builder_methods() {
        let condition = TriggerCondition::Always
            .and(TriggerCondition::has_status("sick"))
            .and(TriggerCondition::Chance(10));

        if let TriggerCondition::All(conditions) = condition {
            assert_eq!(conditions.len(), 3);
        } else {
            panic!("Expected All condition");
        }
    }

    #[test]
    fn test_walk_visits_nested() {
        let cond = TriggerCondition::any([
            TriggerCondition::Chance(10),
            TriggerCondition::all([TriggerCondition::Chance(20)]).negate(),
        ]);

        let mut chances = Vec::new();
        cond.walk(&mut |c| {
            if let TriggerCondition::Chance(p) = c {
                chances.push(*p);
            }
        });
        assert_eq!(chances, vec![10, 20]);
    }

    #[test]
    fn test_yaml_authoring() {
        let yaml = r#"
all:
  - compare: { left: { var: hope }, op: "<", right: { value: 20 } }
  - has_status: burnout
  - chance: 30
"#;
        let cond: TriggerCondition = parse_document(yaml, DataFormat::Yaml).unwrap();
        assert_eq!(
            cond,
            TriggerCondition::all([
                TriggerCondition::compare(
                    Operand::Var("hope".into()),
                    Comparison::Less,
                    Operand::Value(20)
                ),
                TriggerCondition::has_status("burnout"),
                TriggerCondition::Chance(30),
            ])
        );

        let always: TriggerCondition = parse_document("always", DataFormat::Yaml).unwrap();
        assert_eq!(always, TriggerCondition::Always);
    }

    #[test]
    fn test_condition_serialization() {
        let condition = TriggerCondition::all([
            TriggerCondition::var_at_most("hope", 0),
            TriggerCondition::Chance(5),
        ]);

        let json = serde_json::to_string(&condition).unwrap();
        let deserialized: TriggerCondition = serde_json::from_str(&json).unwrap();
        assert_eq!(condition, deserialized);
    }
}
