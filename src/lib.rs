//! # Daily Briefing
//!
//! A root controller dispatches to specialized sub-agents (weather lookup,
//! news lookup), waits for both, checks that their results are on the
//! shared blackboard, and synthesizes a human-readable briefing.
//!
//! Control flow is a small behavior tree:
//!
//! ```text
//! Sequence
//! ├── Parallel: WeatherAgent, NewsAgent
//! ├── Condition: weather and news readable
//! └── Action: SynthesizerAgent
//! ```
//!
//! All data sources are in-process placeholders. The optional LLM renderer
//! is the only component that talks to the network.
//!
//! ```
//! use daily_briefing::{BriefingController, BriefingRequest};
//!
//! let mut controller = BriefingController::default();
//! let briefing = controller.run(&BriefingRequest::new("London", "world")).unwrap();
//! assert!(briefing.weather_section.contains("London"));
//! ```

pub mod agents;
pub mod blackboard;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod render;
pub mod tree;
pub mod types;

pub use agents::{NewsAgent, SubAgent, SynthesizerAgent, WeatherAgent};
pub use blackboard::Blackboard;
pub use cli::InteractiveDriver;
pub use config::BriefingConfig;
pub use controller::{BriefingController, RunHook, RunState};
pub use error::{AgentError, DriverError, RenderError, RunFailure};
pub use tree::{Node, Status};
pub use types::{BriefingRequest, BriefingResult, Headline, NewsResult, WeatherResult};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
