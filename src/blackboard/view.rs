//! The shared state store for one briefing run.
//!
//! Each agent owns exactly one key (its id) and overwrites it on every run.
//! The blackboard is passed explicitly into every agent call; there is no
//! global instance.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::registry::AgentRegistry;
use super::slot::BlackboardSlot;

/// The shared state store.
///
/// # Example
///
/// ```
/// use daily_briefing::blackboard::Blackboard;
///
/// let mut bb = Blackboard::new();
/// bb.set("weather", serde_json::json!({"location": "London"}));
/// bb.set("news", serde_json::json!({"topic": "world"}));
///
/// assert!(bb.has_all(&["weather", "news"]));
/// assert_eq!(bb.get("weather").unwrap()["location"], "London");
/// ```
#[derive(Debug, Default)]
pub struct Blackboard {
    slots: HashMap<String, BlackboardSlot>,
    /// Lifecycle state of every registered sub-agent.
    pub agents: AgentRegistry,
    /// Keys in order of writing, interleaved with phase markers.
    trace: Vec<String>,
}

impl Blackboard {
    /// Create an empty blackboard.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Write operations ---

    /// Overwrite the entry for `agent_id`.
    pub fn set(&mut self, agent_id: impl Into<String>, payload: Value) {
        let agent_id = agent_id.into();
        let slot = BlackboardSlot::new(payload, agent_id.clone());
        self.put_slot(agent_id, slot);
    }

    /// Store a pre-built slot, replacing any previous one under `key`.
    pub fn put_slot(&mut self, key: impl Into<String>, mut slot: BlackboardSlot) {
        let key = key.into();
        if let Some(previous) = self.slots.get(&key) {
            slot.meta.revision = previous.meta.revision + 1;
        }
        self.trace.push(key.clone());
        self.slots.insert(key, slot);
    }

    // --- Read operations ---

    /// Current payload for `agent_id`, or `None` if absent.
    pub fn get(&self, agent_id: &str) -> Option<&Value> {
        self.slots.get(agent_id).map(|slot| &slot.value)
    }

    /// Get the full slot (payload plus metadata).
    pub fn get_slot(&self, agent_id: &str) -> Option<&BlackboardSlot> {
        self.slots.get(agent_id)
    }

    /// Deserialize the payload for `agent_id` into `T`.
    ///
    /// `Ok(None)` when the entry is absent.
    pub fn get_as<T: DeserializeOwned>(
        &self,
        agent_id: &str,
    ) -> Result<Option<T>, serde_json::Error> {
        self.get(agent_id)
            .map(|value| T::deserialize(value))
            .transpose()
    }

    /// True iff every id has a present entry.
    pub fn has_all<S: AsRef<str>>(&self, ids: &[S]) -> bool {
        ids.iter().all(|id| self.contains(id.as_ref()))
    }

    /// The ids in `ids` that have no entry, in the given order.
    pub fn missing<S: AsRef<str>>(&self, ids: &[S]) -> Vec<String> {
        ids.iter()
            .map(|id| id.as_ref())
            .filter(|id| !self.contains(id))
            .map(str::to_string)
            .collect()
    }

    /// Check if a key exists.
    pub fn contains(&self, agent_id: &str) -> bool {
        self.slots.contains_key(agent_id)
    }

    /// Get the number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the blackboard is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    // --- Trace operations ---

    /// Get the execution trace.
    pub fn trace(&self) -> &[String] {
        &self.trace
    }

    /// Get the last N entries from the trace.
    pub fn recent_trace(&self, n: usize) -> &[String] {
        let start = self.trace.len().saturating_sub(n);
        &self.trace[start..]
    }

    pub(crate) fn record_phase_start(&mut self, phase_name: &str) {
        self.trace.push(format!(">>phase:{}", phase_name));
    }

    pub(crate) fn record_phase_end(&mut self, phase_name: &str, elapsed_ms: i64) {
        self.trace.push(format!("<<phase:{}:{}ms", phase_name, elapsed_ms));
    }

    // --- Cleanup ---

    /// Remove an entry.
    pub fn remove(&mut self, agent_id: &str) -> Option<BlackboardSlot> {
        self.slots.remove(agent_id)
    }

    /// Drop every entry and the trace. Registered agents stay registered.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.trace.clear();
    }
}
