//! Per-tick state threaded through the tree.

use super::node::Status;
use crate::blackboard::Blackboard;
use crate::types::BriefingRequest;

/// Why a node failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeFailure {
    /// Name of the failing node.
    pub node: String,
    /// Agent ids that did not produce data.
    pub agents: Vec<String>,
    pub reason: String,
}

/// Observes node entry and exit during a tick.
///
/// Both methods get the blackboard so an observer can inspect or adjust
/// shared state between nodes.
pub trait TickListener {
    fn on_enter(&mut self, _node: &str, _blackboard: &mut Blackboard) {}

    fn on_exit(&mut self, _node: &str, _status: Status, _blackboard: &mut Blackboard) {}
}

/// Listener that ignores everything.
#[derive(Debug, Default)]
pub struct NoopListener;

impl TickListener for NoopListener {}

/// Everything a node needs while ticking.
pub struct TickContext<'a> {
    pub blackboard: &'a mut Blackboard,
    pub request: &'a BriefingRequest,
    listener: &'a mut dyn TickListener,
    failures: Vec<NodeFailure>,
}

impl<'a> TickContext<'a> {
    pub fn new(
        blackboard: &'a mut Blackboard,
        request: &'a BriefingRequest,
        listener: &'a mut dyn TickListener,
    ) -> Self {
        Self {
            blackboard,
            request,
            listener,
            failures: Vec::new(),
        }
    }

    pub(crate) fn enter(&mut self, node: &str) {
        self.listener.on_enter(node, &mut *self.blackboard);
    }

    pub(crate) fn exit(&mut self, node: &str, status: Status) {
        self.listener.on_exit(node, status, &mut *self.blackboard);
    }

    /// Record a node failure.
    pub fn fail(&mut self, failure: NodeFailure) {
        self.failures.push(failure);
    }

    /// Failures recorded so far, in order.
    pub fn failures(&self) -> &[NodeFailure] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<NodeFailure> {
        self.failures
    }
}
