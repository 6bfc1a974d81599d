//! Agent module - the reasoning-acting loop
//!
//! Contains the decision parser, the fallback reasoner, per-run loop state,
//! and the orchestrator that ties them to the generation backend and tools.

pub mod fallback;
pub mod loop_state;
pub mod orchestrator;
pub mod parser;
pub mod prompt;

pub use fallback::FallbackReasoner;
pub use loop_state::{AgentLoopState, History};
pub use orchestrator::{Agent, AgentBuilder};
pub use parser::{parse_decision, Decision};
