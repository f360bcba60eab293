//! Sub-agents.
//!
//! Each agent turns the current [`BriefingRequest`] into one typed result
//! and writes it to the blackboard under its own id. Agents never write
//! another agent's key.

pub mod news;
pub mod synthesizer;
pub mod weather;

use std::fmt;

use serde_json::Value;

use crate::blackboard::Blackboard;
use crate::error::AgentError;
use crate::types::BriefingRequest;

pub use news::NewsAgent;
pub use synthesizer::SynthesizerAgent;
pub use weather::WeatherAgent;

/// Blackboard key of the weather agent.
pub const WEATHER_AGENT_ID: &str = "weather";
/// Blackboard key of the news agent.
pub const NEWS_AGENT_ID: &str = "news";
/// Blackboard key of the synthesizer agent.
pub const SYNTHESIZER_AGENT_ID: &str = "synthesizer";

/// A specialized worker driven by an action node of the behavior tree.
pub trait SubAgent: Send + Sync + fmt::Debug {
    /// Blackboard key this agent owns.
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Short description for the presence registry.
    fn role(&self) -> &str {
        ""
    }

    /// Run the agent for `request`, write the result under [`SubAgent::id`]
    /// and return the written payload.
    fn execute(
        &self,
        request: &BriefingRequest,
        blackboard: &mut Blackboard,
    ) -> Result<Value, AgentError>;
}

/// Serialize `result` and store it under `agent_id`.
pub(crate) fn publish<T: serde::Serialize>(
    blackboard: &mut Blackboard,
    agent_id: &str,
    result: &T,
) -> Result<Value, AgentError> {
    let payload = serde_json::to_value(result).map_err(|source| AgentError::Payload {
        key: agent_id.to_string(),
        source,
    })?;
    blackboard.set(agent_id, payload.clone());
    Ok(payload)
}
