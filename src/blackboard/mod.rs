//! The state store shared by the sub-agents.
//!
//! Each agent writes its latest result under its own id; the synthesizer
//! and the readiness check read those entries back. The blackboard is an
//! explicit value owned by the controller and lent (`&mut`) to one tree
//! node at a time, so no locking is needed.
//!
//! # Phase Discipline
//!
//! Action nodes borrow the blackboard through a [`Phase`], which brackets
//! the keys they write with trace markers.

pub mod phase;
pub mod registry;
pub mod slot;
pub mod view;

pub use phase::Phase;
pub use registry::{AgentPresence, AgentRegistry, AgentState};
pub use slot::{BlackboardSlot, SlotMeta};
pub use view::Blackboard;
