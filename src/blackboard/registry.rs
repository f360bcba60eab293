//! Presence registry for the sub-agents sharing a blackboard.
//!
//! Every agent in the tree is registered once; the tree updates its state as
//! the agent runs so callers can see which agents produced data.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Agent lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentState {
    /// Registered, not run during the current request.
    Idle,
    /// Currently executing.
    Active,
    /// Produced its result.
    Completed,
    /// Returned an error.
    Failed,
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Presence record for one agent.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentPresence {
    pub agent_id: String,
    /// Human-readable agent name.
    pub name: String,
    /// What the agent does.
    pub role: String,
    pub state: AgentState,
    /// Last state change (epoch millis).
    pub last_active: i64,
    /// Error message from the most recent failure.
    pub last_error: Option<String>,
}

/// Registry of the agents sharing a blackboard, keyed by agent id.
#[derive(Debug, Default)]
pub struct AgentRegistry {
    agents: BTreeMap<String, AgentPresence>,
}

impl AgentRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent (or replace an existing record) in the Idle state.
    pub fn register(
        &mut self,
        agent_id: impl Into<String>,
        name: impl Into<String>,
        role: impl Into<String>,
    ) {
        let agent_id = agent_id.into();
        let presence = AgentPresence {
            agent_id: agent_id.clone(),
            name: name.into(),
            role: role.into(),
            state: AgentState::Idle,
            last_active: chrono::Utc::now().timestamp_millis(),
            last_error: None,
        };
        self.agents.insert(agent_id, presence);
    }

    /// Update an agent's state. Unknown ids are ignored.
    pub fn set_state(&mut self, agent_id: &str, state: AgentState) {
        if let Some(agent) = self.agents.get_mut(agent_id) {
            agent.state = state;
            agent.last_active = chrono::Utc::now().timestamp_millis();
            if state != AgentState::Failed {
                agent.last_error = None;
            }
        }
    }

    /// Mark an agent failed and remember why.
    pub fn set_failed(&mut self, agent_id: &str, error: impl Into<String>) {
        self.set_state(agent_id, AgentState::Failed);
        if let Some(agent) = self.agents.get_mut(agent_id) {
            agent.last_error = Some(error.into());
        }
    }

    /// Put every agent back to Idle (start of a new request).
    pub fn reset(&mut self) {
        for agent in self.agents.values_mut() {
            agent.state = AgentState::Idle;
            agent.last_error = None;
        }
    }

    /// Get an agent's presence record.
    pub fn get(&self, agent_id: &str) -> Option<&AgentPresence> {
        self.agents.get(agent_id)
    }

    /// Get an agent's current state.
    pub fn state(&self, agent_id: &str) -> Option<AgentState> {
        self.agents.get(agent_id).map(|a| a.state)
    }

    /// Find all agents in a given state.
    pub fn by_state(&self, state: AgentState) -> Vec<&AgentPresence> {
        self.agents.values().filter(|a| a.state == state).collect()
    }

    /// Snapshot of every agent's state, ordered by id.
    pub fn states(&self) -> BTreeMap<String, AgentState> {
        self.agents
            .iter()
            .map(|(id, agent)| (id.clone(), agent.state))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AgentPresence)> {
        self.agents.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_register_and_get() {
        let mut reg = AgentRegistry::new();
        reg.register("weather", "WeatherAgent", "weather lookup");

        let agent = reg.get("weather").unwrap();
        assert_eq!(agent.name, "WeatherAgent");
        assert_eq!(agent.state, AgentState::Idle);
        assert!(reg.get("news").is_none());
    }

    #[test]
    fn test_registry_state_transitions() {
        let mut reg = AgentRegistry::new();
        reg.register("news", "NewsAgent", "headline lookup");

        reg.set_state("news", AgentState::Active);
        assert_eq!(reg.state("news"), Some(AgentState::Active));

        reg.set_failed("news", "feed offline");
        assert_eq!(reg.state("news"), Some(AgentState::Failed));
        assert_eq!(reg.get("news").unwrap().last_error.as_deref(), Some("feed offline"));

        reg.set_state("news", AgentState::Completed);
        assert!(reg.get("news").unwrap().last_error.is_none());
    }

    #[test]
    fn test_registry_reset_and_snapshot() {
        let mut reg = AgentRegistry::new();
        reg.register("weather", "WeatherAgent", "");
        reg.register("news", "NewsAgent", "");
        reg.set_state("weather", AgentState::Completed);
        reg.set_failed("news", "boom");

        assert_eq!(reg.by_state(AgentState::Completed).len(), 1);

        reg.reset();
        let states = reg.states();
        assert_eq!(states.len(), 2);
        assert!(states.values().all(|s| *s == AgentState::Idle));
        assert_eq!(states.keys().collect::<Vec<_>>(), vec!["news", "weather"]);
    }

    #[test]
    fn test_registry_unknown_agent_ignored() {
        let mut reg = AgentRegistry::new();
        reg.set_state("ghost", AgentState::Active);
        assert!(reg.is_empty());
        assert_eq!(reg.iter().count(), 0);
    }
}
