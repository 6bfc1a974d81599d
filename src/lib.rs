//! Todo Agent - a ReAct agent for a todo list
//!
//! Alternates between asking a text-generation backend for a
//! `Thought:` / `Action:` / `Answer:` decision, dispatching actions to the
//! todo tools, and feeding observations back into the next round. When the
//! backend is unreachable or replies off-grammar, a deterministic keyword
//! reasoner takes over for that round.
//!
//! # Architecture
//!
//! - **Core**: Shared types, configuration, and error handling
//! - **LLM**: Generation client contract with an OpenAI-compatible backend
//! - **Tools**: Tool registry and the todo tools
//! - **Agent**: Decision parser, fallback reasoner, and the reasoning loop
//! - **CLI**: Command-line interface and REPL
//!
//! # Usage
//!
//! ```rust,no_run
//! use todo_agent::{Agent, Config};
//!
//! #[tokio::main]
//! async fn main() {
//!     let agent = Agent::with_config(&Config::load()).unwrap();
//!     let result = agent.run("add buy milk").await.unwrap();
//!     println!("{}", result.answer);
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod core;
pub mod llm;
pub mod tools;

// Re-export commonly used items
pub use agent::{Agent, AgentBuilder};
pub use cli::Repl;
pub use core::{AgentError, AgentResult, Config, Result, Step, StepKind};
