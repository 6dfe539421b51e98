//! Variable store: flat name → value state.
//!
//! Holds world and player attributes (`year`, `month`, `hope`, rule
//! thresholds). Backed by an `im::OrdMap` so that snapshots are O(1) and
//! iteration order is stable, which keeps message interpolation and
//! trajectory comparisons deterministic.
//!
//! Lookups never invent values: a caller either marks the variable as
//! required ([`VariableStore::require`]) or passes its own default
//! ([`VariableStore::get_or`]).

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::value::Value;

/// Name → value store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableStore {
    values: OrdMap<String, Value>,
}

impl VariableStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a variable if it exists.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Get a variable, failing if it is absent.
    pub fn require(&self, name: &str) -> Result<&Value, EngineError> {
        self.values
            .get(name)
            .ok_or_else(|| EngineError::VariableNotFound(name.to_string()))
    }

    /// Get a variable or the caller's default.
    #[must_use]
    pub fn get_or<'a>(&'a self, name: &str, default: &'a Value) -> &'a Value {
        self.values.get(name).unwrap_or(default)
    }

    /// Get an integer variable, failing if absent or not an integer.
    pub fn require_int(&self, name: &str) -> Result<i64, EngineError> {
        self.require(name)?
            .as_int()
            .ok_or_else(|| EngineError::NotAnInteger(name.to_string()))
    }

    /// Get an integer variable with a default.
    ///
    /// Text values also fall back to the default.
    #[must_use]
    pub fn int_or(&self, name: &str, default: i64) -> i64 {
        self.values
            .get(name)
            .and_then(Value::as_int)
            .unwrap_or(default)
    }

    /// Create or overwrite a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Add `delta` to an existing integer variable.
    ///
    /// Returns the new value.
    pub fn modify(&mut self, name: &str, delta: i64) -> Result<i64, EngineError> {
        let updated = self.require_int(name)?.saturating_add(delta);
        self.values.insert(name.to_string(), Value::Int(updated));
        Ok(updated)
    }

    /// Check whether a variable exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterate variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
