//! Behavior tree.
//!
//! Four node kinds ([`Node::Sequence`], [`Node::Parallel`],
//! [`Node::Condition`], [`Node::Action`]) each expose one `tick` returning a
//! [`Status`]. Ticking is synchronous and single-pass.
//!
//! `Parallel` is a logical grouping with join semantics: every child is
//! issued before the group looks at any result, but children run one after
//! another on the calling thread. Each action writes only its own
//! blackboard key, so issue order does not change the joined result.

pub mod context;
pub mod node;

pub use context::{NodeFailure, NoopListener, TickContext, TickListener};
pub use node::{Node, Requirement, Status};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{NewsAgent, SubAgent, WeatherAgent};
    use crate::blackboard::{AgentState, Blackboard};
    use crate::error::AgentError;
    use crate::types::BriefingRequest;
    use serde::Deserialize;
    use serde_json::Value;

    #[derive(Debug)]
    struct BrokenAgent;

    impl SubAgent for BrokenAgent {
        fn id(&self) -> &str {
            "broken"
        }

        fn name(&self) -> &str {
            "BrokenAgent"
        }

        fn execute(&self, _: &BriefingRequest, _: &mut Blackboard) -> Result<Value, AgentError> {
            Err(AgentError::failed("broken", "source offline"))
        }
    }

    #[derive(Default)]
    struct Recorder {
        entered: Vec<String>,
        exited: Vec<(String, Status)>,
    }

    impl TickListener for Recorder {
        fn on_enter(&mut self, node: &str, _: &mut Blackboard) {
            self.entered.push(node.to_string());
        }

        fn on_exit(&mut self, node: &str, status: Status, _: &mut Blackboard) {
            self.exited.push((node.to_string(), status));
        }
    }

    fn tick(
        node: &Node,
        bb: &mut Blackboard,
        listener: &mut dyn TickListener,
    ) -> (Status, Vec<NodeFailure>) {
        let request = BriefingRequest::new("Oslo", "world");
        let mut ctx = TickContext::new(bb, &request, listener);
        let status = node.tick(&mut ctx);
        (status, ctx.into_failures())
    }

    #[test]
    fn test_parallel_joins_both_children() {
        let tree = Node::parallel(
            "gather",
            vec![
                Node::action("w", Box::new(WeatherAgent::new())),
                Node::action("n", Box::new(NewsAgent::new())),
            ],
        );
        let mut bb = Blackboard::new();
        let (status, failures) = tick(&tree, &mut bb, &mut NoopListener);

        assert_eq!(status, Status::Success);
        assert!(failures.is_empty());
        assert!(bb.has_all(&["weather", "news"]));
    }

    #[test]
    fn test_parallel_issues_every_child_even_after_failure() {
        let tree = Node::parallel(
            "gather",
            vec![
                Node::action("b", Box::new(BrokenAgent)),
                Node::action("n", Box::new(NewsAgent::new())),
            ],
        );
        let mut bb = Blackboard::new();
        bb.agents.register("broken", "BrokenAgent", "");
        let (status, failures) = tick(&tree, &mut bb, &mut NoopListener);

        assert_eq!(status, Status::Failure);
        assert!(bb.contains("news"));
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].agents, vec!["broken".to_string()]);
        assert_eq!(failures[0].reason, "broken failed: source offline");
        assert_eq!(bb.agents.state("broken"), Some(AgentState::Failed));
    }

    #[test]
    fn test_sequence_stops_at_first_failure() {
        let tree = Node::sequence(
            "root",
            vec![
                Node::condition("ready", ["weather"]),
                Node::action("n", Box::new(NewsAgent::new())),
            ],
        );
        let mut bb = Blackboard::new();
        let mut recorder = Recorder::default();
        let (status, failures) = tick(&tree, &mut bb, &mut recorder);

        assert_eq!(status, Status::Failure);
        assert!(!bb.contains("news"));
        assert_eq!(recorder.entered, vec!["root", "ready"]);
        assert_eq!(failures[0].reason, "no data from: weather");
        assert_eq!(
            recorder.exited.last(),
            Some(&("root".to_string(), Status::Failure))
        );
    }

    #[test]
    fn test_condition_success() {
        let mut bb = Blackboard::new();
        bb.set("weather", serde_json::json!({}));
        bb.set("news", serde_json::json!({}));
        let (status, _) = tick(
            &Node::condition("ready", ["weather", "news"]),
            &mut bb,
            &mut NoopListener,
        );
        assert_eq!(status, Status::Success);
    }

    #[test]
    fn test_readable_requirement_rejects_wrong_shape() {
        #[derive(Deserialize)]
        struct Reading {
            #[allow(dead_code)]
            location: String,
        }

        let check = Node::condition(
            "ready",
            [
                Requirement::readable::<Reading>("weather"),
                Requirement::present("news"),
            ],
        );
        let mut bb = Blackboard::new();
        bb.set("weather", serde_json::json!({"location": 1}));
        bb.set("news", serde_json::json!({}));

        let (status, failures) = tick(&check, &mut bb, &mut NoopListener);
        assert_eq!(status, Status::Failure);
        assert_eq!(failures[0].agents, vec!["weather".to_string()]);

        bb.set("weather", serde_json::json!({"location": "Oslo"}));
        let (status, failures) = tick(&check, &mut bb, &mut NoopListener);
        assert_eq!(status, Status::Success);
        assert!(failures.is_empty());
    }

    #[test]
    fn test_action_runs_inside_phase() {
        let mut bb = Blackboard::new();
        bb.agents.register("weather", "WeatherAgent", "");
        let (status, _) = tick(
            &Node::action("WeatherCollection", Box::new(WeatherAgent::new())),
            &mut bb,
            &mut NoopListener,
        );
        assert_eq!(status, Status::Success);
        assert_eq!(bb.trace()[0], ">>phase:WeatherCollection");
        assert_eq!(bb.trace()[1], "weather");
        assert_eq!(bb.agents.state("weather"), Some(AgentState::Completed));
    }

    #[test]
    fn test_for_each_agent_visits_depth_first() {
        let tree = Node::sequence(
            "root",
            vec![
                Node::parallel(
                    "gather",
                    vec![
                        Node::action("w", Box::new(WeatherAgent::new())),
                        Node::action("n", Box::new(NewsAgent::new())),
                    ],
                ),
                Node::condition("ready", ["weather", "news"]),
                Node::action("b", Box::new(BrokenAgent)),
            ],
        );
        let mut ids = Vec::new();
        tree.for_each_agent(&mut |agent| ids.push(agent.id().to_string()));
        assert_eq!(ids, vec!["weather", "news", "broken"]);
    }
}
