//! Error types for the briefing pipeline.
//!
//! Blank user input is never an error: it is replaced by a default where it
//! is read. Everything else that can go wrong in one run is described here.

use thiserror::Error;

use crate::controller::RunState;

/// Errors raised by a sub-agent while executing.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The agent needs blackboard entries that are not present.
    #[error("{agent} is missing required input from: {}", .missing.join(", "))]
    MissingDependency { agent: String, missing: Vec<String> },

    /// The agent could not produce a result.
    #[error("{agent} failed: {message}")]
    Failed { agent: String, message: String },

    /// A blackboard payload could not be converted to or from its typed form.
    #[error("invalid payload under '{key}': {source}")]
    Payload {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl AgentError {
    /// Shorthand for [`AgentError::Failed`].
    pub fn failed(agent: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            agent: agent.into(),
            message: message.into(),
        }
    }
}

/// Errors from turning gathered data into briefing text.
///
/// These never fail a run: the synthesizer falls back to a plain rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A briefing template failed to parse or render.
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    /// The language-generation backend is enabled but has no credential.
    #[error("no API key configured for the language-generation backend")]
    MissingCredential,

    /// Transport failure talking to the backend.
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered but not with usable text.
    #[error("backend error: {0}")]
    Backend(String),

    /// The backend returned an empty completion.
    #[error("backend returned an empty completion")]
    EmptyResponse,
}

/// The FAILED outcome of one controller run.
#[derive(Debug, Clone, Error)]
#[error("briefing failed while {stage}: {reason}")]
pub struct RunFailure {
    /// Identifier of the run that failed.
    pub run_id: String,
    /// The state the controller was in when the tree failed.
    pub stage: RunState,
    /// Human-readable description.
    pub reason: String,
    /// Agent ids that did not produce data.
    pub missing: Vec<String>,
}

/// Errors from the interactive prompt.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("prompt I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dependency_message_lists_agents() {
        let err = AgentError::MissingDependency {
            agent: "synthesizer".into(),
            missing: vec!["weather".into(), "news".into()],
        };
        assert_eq!(
            err.to_string(),
            "synthesizer is missing required input from: weather, news"
        );
    }

    #[test]
    fn test_run_failure_display() {
        let failure = RunFailure {
            run_id: "run-1".into(),
            stage: RunState::Checking,
            reason: "no data from: news".into(),
            missing: vec!["news".into()],
        };
        assert_eq!(
            failure.to_string(),
            "briefing failed while CHECKING: no data from: news"
        );
    }
}
