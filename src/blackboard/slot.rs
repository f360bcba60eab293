//! Blackboard slot: a single agent's latest result.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata attached to a blackboard slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotMeta {
    /// Agent that wrote this slot.
    pub source: String,
    /// Write time, epoch millis.
    pub epoch: i64,
    /// How many times this key has been written since the board was cleared.
    pub revision: u64,
}

/// A single slot in the blackboard.
///
/// Slots are replaced wholesale on every write; no history is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct BlackboardSlot {
    /// The agent's result payload.
    pub value: Value,
    /// Slot metadata.
    pub meta: SlotMeta,
}

impl BlackboardSlot {
    /// Create a new slot stamped with the current time.
    pub fn new(value: Value, source: impl Into<String>) -> Self {
        Self {
            value,
            meta: SlotMeta {
                source: source.into(),
                epoch: Utc::now().timestamp_millis(),
                revision: 1,
            },
        }
    }

    /// Time of the last update.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.meta.epoch).single()
    }
}
