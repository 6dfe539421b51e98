//! Localization.
//!
//! Narrative content refers to display text by key. The [`Dictionary`]
//! maps keys to templates for the configured language and fills in
//! `{placeholder}`s from game state when a message is shown.

mod dictionary;

pub use dictionary::Dictionary;
