//! Behavior tree nodes.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::context::{NodeFailure, TickContext};
use crate::agents::SubAgent;
use crate::blackboard::{AgentState, Blackboard, Phase};

/// Result of ticking a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Success,
    Failure,
    /// Not finished yet. The built-in agents are synchronous and never
    /// return this, but composites propagate it.
    Running,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "SUCCESS"),
            Self::Failure => write!(f, "FAILURE"),
            Self::Running => write!(f, "RUNNING"),
        }
    }
}

/// A blackboard entry a [`Node::Condition`] waits for.
///
/// An entry that is present but fails `check` counts as missing.
#[derive(Clone)]
pub struct Requirement {
    key: String,
    check: fn(&Value) -> bool,
}

impl Requirement {
    /// Satisfied by any entry under `key`.
    pub fn present(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            check: |_| true,
        }
    }

    /// Satisfied only by an entry that deserializes as `T`.
    pub fn readable<T: DeserializeOwned>(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            check: deserializes_as::<T>,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_met(&self, blackboard: &Blackboard) -> bool {
        blackboard.get(&self.key).is_some_and(|value| (self.check)(value))
    }
}

impl fmt::Debug for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Requirement").field(&self.key).finish()
    }
}

impl From<&str> for Requirement {
    fn from(key: &str) -> Self {
        Self::present(key)
    }
}

impl From<String> for Requirement {
    fn from(key: String) -> Self {
        Self::present(key)
    }
}

fn deserializes_as<T: DeserializeOwned>(value: &Value) -> bool {
    T::deserialize(value).is_ok()
}

/// A behavior tree node.
///
/// A closed set of variants; composites own their children directly.
#[derive(Debug)]
pub enum Node {
    /// Ticks children in order, stopping at the first child that does not
    /// succeed and returning its status.
    Sequence { name: String, children: Vec<Node> },
    /// Ticks every child before looking at any result, then joins:
    /// Failure if any child failed, else Running if any is running, else
    /// Success.
    Parallel { name: String, children: Vec<Node> },
    /// Succeeds iff every requirement is met.
    Condition {
        name: String,
        required: Vec<Requirement>,
    },
    /// Runs one sub-agent.
    Action { name: String, agent: Box<dyn SubAgent> },
}

impl Node {
    pub fn sequence(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Sequence {
            name: name.into(),
            children,
        }
    }

    pub fn parallel(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Parallel {
            name: name.into(),
            children,
        }
    }

    pub fn condition<R: Into<Requirement>>(
        name: impl Into<String>,
        required: impl IntoIterator<Item = R>,
    ) -> Self {
        Self::Condition {
            name: name.into(),
            required: required.into_iter().map(Into::into).collect(),
        }
    }

    pub fn action(name: impl Into<String>, agent: Box<dyn SubAgent>) -> Self {
        Self::Action {
            name: name.into(),
            agent,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Sequence { name, .. }
            | Self::Parallel { name, .. }
            | Self::Condition { name, .. }
            | Self::Action { name, .. } => name,
        }
    }

    /// Visit every agent in the subtree, depth first.
    pub fn for_each_agent(&self, f: &mut dyn FnMut(&dyn SubAgent)) {
        match self {
            Self::Sequence { children, .. } | Self::Parallel { children, .. } => {
                for child in children {
                    child.for_each_agent(f);
                }
            }
            Self::Action { agent, .. } => f(agent.as_ref()),
            Self::Condition { .. } => {}
        }
    }

    /// Tick this node once.
    pub fn tick(&self, ctx: &mut TickContext<'_>) -> Status {
        ctx.enter(self.name());
        let status = match self {
            Self::Sequence { children, .. } => tick_sequence(children, ctx),
            Self::Parallel { children, .. } => tick_parallel(children, ctx),
            Self::Condition { name, required } => tick_condition(name, required, ctx),
            Self::Action { name, agent } => tick_action(name, agent.as_ref(), ctx),
        };
        ctx.exit(self.name(), status);
        status
    }
}

fn tick_sequence(children: &[Node], ctx: &mut TickContext<'_>) -> Status {
    for child in children {
        let status = child.tick(ctx);
        if status != Status::Success {
            return status;
        }
    }
    Status::Success
}

fn tick_parallel(children: &[Node], ctx: &mut TickContext<'_>) -> Status {
    let statuses: Vec<Status> = children.iter().map(|child| child.tick(ctx)).collect();
    if statuses.contains(&Status::Failure) {
        Status::Failure
    } else if statuses.contains(&Status::Running) {
        Status::Running
    } else {
        Status::Success
    }
}

fn tick_condition(name: &str, required: &[Requirement], ctx: &mut TickContext<'_>) -> Status {
    let missing: Vec<String> = required
        .iter()
        .filter(|req| !req.is_met(&*ctx.blackboard))
        .map(|req| req.key.clone())
        .collect();
    if missing.is_empty() {
        return Status::Success;
    }
    log::debug!("{}: missing {:?}", name, missing);
    ctx.fail(NodeFailure {
        node: name.to_string(),
        reason: format!("no data from: {}", missing.join(", ")),
        agents: missing,
    });
    Status::Failure
}

fn tick_action(name: &str, agent: &dyn SubAgent, ctx: &mut TickContext<'_>) -> Status {
    let request = ctx.request;
    let mut phase = Phase::begin(&mut *ctx.blackboard, name);
    phase.bb().agents.set_state(agent.id(), AgentState::Active);

    match agent.execute(request, phase.bb()) {
        Ok(_) => {
            phase.bb().agents.set_state(agent.id(), AgentState::Completed);
            Status::Success
        }
        Err(e) => {
            log::warn!("Sub-agent {} failed: {}", agent.name(), e);
            phase.bb().agents.set_failed(agent.id(), e.to_string());
            drop(phase);
            ctx.fail(NodeFailure {
                node: name.to_string(),
                agents: vec![agent.id().to_string()],
                reason: e.to_string(),
            });
            Status::Failure
        }
    }
}
