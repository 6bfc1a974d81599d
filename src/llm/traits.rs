//! Generation client trait for abstracting text-generation backends
//!
//! The agent loop only needs one raw decision string per round; any backend
//! that can turn a prompt into text qualifies.

use async_trait::async_trait;

use crate::core::Result;

/// Trait for text-generation backends
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Produce the raw decision text for one round.
    ///
    /// Implementations report every transport, auth, and timeout failure as
    /// `AgentError::AdapterUnavailable`.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the backend name
    fn name(&self) -> &str;
}
