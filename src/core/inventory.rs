//! Countable item ledger.
//!
//! Counts are `u32`, so they can never be negative. Removing more than is
//! held is an error and leaves the count as it was; silently clamping
//! would hide authoring mistakes in event data.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Item name → quantity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: OrdMap<String, u32>,
}

impl Inventory {
    /// Create an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantity held (0 if never set).
    #[must_use]
    pub fn count(&self, item: &str) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    /// Set the quantity directly.
    pub fn set(&mut self, item: impl Into<String>, count: u32) {
        self.items.insert(item.into(), count);
    }

    /// Add `n` of an item. Returns the new count.
    pub fn add(&mut self, item: &str, n: u32) -> u32 {
        let updated = self.count(item).saturating_add(n);
        self.items.insert(item.to_string(), updated);
        updated
    }

    /// Remove `n` of an item. Returns the new count.
    pub fn remove(&mut self, item: &str, n: u32) -> Result<u32, EngineError> {
        let available = self.count(item);
        let updated = available
            .checked_sub(n)
            .ok_or_else(|| EngineError::InventoryUnderflow {
                item: item.to_string(),
                requested: n,
                available,
            })?;
        self.items.insert(item.to_string(), updated);
        Ok(updated)
    }

    /// Iterate items in name order, including zero counts.
    pub fn iter(&self) -> impl Iterator<Item = (&String, u32)> {
        self.items.iter().map(|(k, v)| (k, *v))
    }

    /// Number of distinct items tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if no items are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
