//! Offline client
//!
//! Always unavailable, so every round is decided by the fallback reasoner.

use async_trait::async_trait;

use crate::core::{AgentError, Result};
use crate::llm::traits::GenerationClient;

/// Backend that never answers
#[derive(Debug, Clone, Default)]
pub struct OfflineClient;

impl OfflineClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl GenerationClient for OfflineClient {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(AgentError::adapter("running in offline mode"))
    }

    fn name(&self) -> &str {
        "offline"
    }
}
