//! Error types for the todo agent
//!
//! Every failure the agent can observe is one variant here. Only
//! `InvalidInput` ever escapes `Agent::run`; the rest are recovered inside
//! a round.

use thiserror::Error;

/// Main error type for agent operations
#[derive(Error, Debug)]
pub enum AgentError {
    /// Caller supplied an empty task
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generation backend unreachable (auth, network, timeout, empty reply)
    #[error("Generation backend unavailable: {0}")]
    AdapterUnavailable(String),

    /// Generation output did not follow the Thought/Action/Answer grammar
    #[error("Malformed decision: {0}")]
    MalformedDecision(String),

    /// No tool registered under this name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A tool with this name is already registered
    #[error("Tool '{0}' is already registered")]
    DuplicateTool(String),

    /// Tool execution errors
    #[error("{0}")]
    ToolExecution(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error for other cases
    #[error("{0}")]
    Other(String),
}

/// Convenience Result type for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

impl AgentError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an adapter unavailable error
    pub fn adapter(msg: impl Into<String>) -> Self {
        Self::AdapterUnavailable(msg.into())
    }

    /// Create a malformed decision error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedDecision(msg.into())
    }

    /// Create a tool execution error
    pub fn tool(msg: impl Into<String>) -> Self {
        Self::ToolExecution(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error should send the round to the fallback reasoner
    pub fn triggers_fallback(&self) -> bool {
        matches!(
            self,
            Self::AdapterUnavailable(_) | Self::MalformedDecision(_)
        )
    }
}
