//! Briefing controller: runs the fixed behavior tree as a state machine.
//!
//! ```text
//! DailyBriefingSequence
//! ├── DataGathering (parallel)      READY -> GATHERING
//! │   ├── WeatherCollection
//! │   └── NewsCollection
//! ├── DataReadyCheck (condition)    GATHERING -> CHECKING
//! └── BriefingSynthesis             CHECKING -> SYNTHESIZING
//! ```
//!
//! A run ends in DONE with a [`BriefingResult`], or in FAILED with a
//! [`RunFailure`] naming the agents that produced no data. Runs are single
//! pass: no retries, and no partial briefing when an input is missing.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::agents::{NewsAgent, SubAgent, SynthesizerAgent, WeatherAgent, SYNTHESIZER_AGENT_ID};
use crate::blackboard::{AgentState, Blackboard};
use crate::config::BriefingConfig;
use crate::error::RunFailure;
use crate::render::{BriefingRenderer, LlmRenderer, TemplateRenderer};
use crate::tree::{Node, NodeFailure, Requirement, Status, TickContext, TickListener};
use crate::types::{BriefingRequest, BriefingResult, NewsResult, WeatherResult};

pub const ROOT_NODE: &str = "DailyBriefingSequence";
pub const GATHER_NODE: &str = "DataGathering";
pub const WEATHER_NODE: &str = "WeatherCollection";
pub const NEWS_NODE: &str = "NewsCollection";
pub const CHECK_NODE: &str = "DataReadyCheck";
pub const SYNTHESIS_NODE: &str = "BriefingSynthesis";

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunState {
    Ready,
    Gathering,
    Checking,
    Synthesizing,
    Done,
    Failed,
}

impl RunState {
    fn for_node(node: &str) -> Option<Self> {
        match node {
            GATHER_NODE => Some(Self::Gathering),
            CHECK_NODE => Some(Self::Checking),
            SYNTHESIS_NODE => Some(Self::Synthesizing),
            _ => None,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ready => "READY",
            Self::Gathering => "GATHERING",
            Self::Checking => "CHECKING",
            Self::Synthesizing => "SYNTHESIZING",
            Self::Done => "DONE",
            Self::Failed => "FAILED",
        };
        f.write_str(s)
    }
}

/// Observes controller state transitions.
///
/// Hooks run synchronously on every transition and may touch the
/// blackboard before the next node executes.
pub trait RunHook: Send + Sync {
    fn on_transition(
        &self,
        _run_id: &str,
        _from: RunState,
        _to: RunState,
        _blackboard: &mut Blackboard,
    ) {
    }
}

/// Maps stage node entry to controller transitions.
struct StageTracker<'a> {
    run_id: &'a str,
    hooks: &'a [Box<dyn RunHook>],
    transitions: &'a mut Vec<RunState>,
}

impl StageTracker<'_> {
    fn current(&self) -> RunState {
        self.transitions.last().copied().unwrap_or(RunState::Ready)
    }

    fn advance(&mut self, to: RunState, blackboard: &mut Blackboard) {
        let from = self.current();
        log::debug!("run {}: {} -> {}", self.run_id, from, to);
        self.transitions.push(to);
        for hook in self.hooks {
            hook.on_transition(self.run_id, from, to, blackboard);
        }
    }
}

impl TickListener for StageTracker<'_> {
    fn on_enter(&mut self, node: &str, blackboard: &mut Blackboard) {
        if let Some(state) = RunState::for_node(node) {
            self.advance(state, blackboard);
        }
    }
}

/// Runs one briefing per call over a fixed tree.
pub struct BriefingController {
    root: Node,
    blackboard: Blackboard,
    hooks: Vec<Box<dyn RunHook>>,
    transitions: Vec<RunState>,
    last_run_id: Option<String>,
}

impl Default for BriefingController {
    fn default() -> Self {
        Self::new(
            Box::new(WeatherAgent::new()),
            Box::new(NewsAgent::new()),
            Box::new(SynthesizerAgent::default()),
        )
    }
}

impl fmt::Debug for BriefingController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BriefingController")
            .field("root", &self.root)
            .field("hooks", &self.hooks.len())
            .field("transitions", &self.transitions)
            .finish_non_exhaustive()
    }
}

impl BriefingController {
    /// Build the standard tree around the given agents.
    ///
    /// The synthesizer is expected to read the weather and news agents'
    /// entries. The readiness check only passes when both entries parse as
    /// [`WeatherResult`] and [`NewsResult`]; an unreadable entry counts as
    /// missing.
    pub fn new(
        weather: Box<dyn SubAgent>,
        news: Box<dyn SubAgent>,
        synthesizer: Box<dyn SubAgent>,
    ) -> Self {
        let required = [
            Requirement::readable::<WeatherResult>(weather.id()),
            Requirement::readable::<NewsResult>(news.id()),
        ];
        let root = Node::sequence(
            ROOT_NODE,
            vec![
                Node::parallel(
                    GATHER_NODE,
                    vec![
                        Node::action(WEATHER_NODE, weather),
                        Node::action(NEWS_NODE, news),
                    ],
                ),
                Node::condition(CHECK_NODE, required),
                Node::action(SYNTHESIS_NODE, synthesizer),
            ],
        );

        let mut blackboard = Blackboard::new();
        root.for_each_agent(&mut |agent| {
            blackboard.agents.register(agent.id(), agent.name(), agent.role());
        });

        Self {
            root,
            blackboard,
            hooks: Vec::new(),
            transitions: vec![RunState::Ready],
            last_run_id: None,
        }
    }

    /// Standard agents, with the LLM renderer when the config enables it.
    pub fn from_config(config: &BriefingConfig) -> Self {
        let renderer: Box<dyn BriefingRenderer> = match &config.llm {
            Some(llm) => Box::new(LlmRenderer::new(llm.clone())),
            None => Box::new(TemplateRenderer::new()),
        };
        log::debug!("briefing renderer: {}", renderer.name());
        Self::new(
            Box::new(WeatherAgent::new()),
            Box::new(NewsAgent::new()),
            Box::new(SynthesizerAgent::new(renderer)),
        )
    }

    /// Register a transition hook.
    pub fn with_hook(mut self, hook: Box<dyn RunHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn add_hook(&mut self, hook: Box<dyn RunHook>) {
        self.hooks.push(hook);
    }

    /// Produce one briefing.
    ///
    /// The blackboard is cleared first so nothing from an earlier request
    /// can leak into this one.
    pub fn run(&mut self, request: &BriefingRequest) -> Result<BriefingResult, RunFailure> {
        let run_id = Uuid::new_v4().to_string();
        log::info!(
            "run {}: briefing for location={:?} topic={:?}",
            run_id,
            request.location,
            request.topic
        );

        self.blackboard.clear();
        self.blackboard.agents.reset();
        self.transitions.clear();
        self.transitions.push(RunState::Ready);
        self.last_run_id = Some(run_id.clone());

        let mut tracker = StageTracker {
            run_id: &run_id,
            hooks: &self.hooks,
            transitions: &mut self.transitions,
        };
        let mut ctx = TickContext::new(&mut self.blackboard, request, &mut tracker);
        let status = self.root.tick(&mut ctx);
        let failures = ctx.into_failures();
        let stage = tracker.current();

        let outcome = match status {
            Status::Success => self.collect_briefing(&run_id, stage),
            Status::Failure => Err(failure_from(&run_id, stage, &failures)),
            Status::Running => Err(RunFailure {
                run_id: run_id.clone(),
                stage,
                reason: "tree did not finish in a single pass".into(),
                missing: Vec::new(),
            }),
        };

        let terminal = if outcome.is_ok() {
            RunState::Done
        } else {
            RunState::Failed
        };
        let mut tracker = StageTracker {
            run_id: &run_id,
            hooks: &self.hooks,
            transitions: &mut self.transitions,
        };
        tracker.advance(terminal, &mut self.blackboard);

        match &outcome {
            Ok(_) => log::info!("run {}: briefing generated", run_id),
            Err(failure) => log::warn!("run {}: {}", run_id, failure),
        }
        outcome
    }

    fn collect_briefing(
        &self,
        run_id: &str,
        stage: RunState,
    ) -> Result<BriefingResult, RunFailure> {
        match self.blackboard.get_as::<BriefingResult>(SYNTHESIZER_AGENT_ID) {
            Ok(Some(briefing)) => Ok(briefing),
            Ok(None) => Err(RunFailure {
                run_id: run_id.to_string(),
                stage,
                reason: "synthesis produced no briefing".into(),
                missing: vec![SYNTHESIZER_AGENT_ID.to_string()],
            }),
            Err(e) => Err(RunFailure {
                run_id: run_id.to_string(),
                stage,
                reason: format!("unreadable briefing: {}", e),
                missing: vec![SYNTHESIZER_AGENT_ID.to_string()],
            }),
        }
    }

    /// States visited by the most recent run, starting with READY.
    pub fn last_transitions(&self) -> &[RunState] {
        &self.transitions
    }

    /// Current (or final) state of the most recent run.
    pub fn state(&self) -> RunState {
        self.transitions.last().copied().unwrap_or(RunState::Ready)
    }

    pub fn last_run_id(&self) -> Option<&str> {
        self.last_run_id.as_deref()
    }

    /// Each sub-agent's state after the most recent run.
    pub fn agent_states(&self) -> BTreeMap<String, AgentState> {
        self.blackboard.agents.states()
    }

    /// Read access to the shared state store.
    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }
}

fn failure_from(run_id: &str, stage: RunState, failures: &[NodeFailure]) -> RunFailure {
    let mut missing: Vec<String> = Vec::new();
    for agent in failures.iter().flat_map(|f| f.agents.iter()) {
        if !missing.contains(agent) {
            missing.push(agent.clone());
        }
    }
    let reason = if failures.is_empty() {
        "behavior tree failed".to_string()
    } else {
        failures
            .iter()
            .map(|f| format!("{}: {}", f.node, f.reason))
            .collect::<Vec<_>>()
            .join("; ")
    };
    RunFailure {
        run_id: run_id.to_string(),
        stage,
        reason,
        missing,
    }
}
