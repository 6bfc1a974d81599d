//! LLM module - text-generation backends
//!
//! Provides the generation client contract with an OpenAI-compatible
//! implementation and an offline stand-in.

pub mod mistral;
pub mod offline;
pub mod traits;

use std::sync::Arc;

use crate::core::{Config, Result};

pub use mistral::MistralClient;
pub use offline::OfflineClient;
pub use traits::GenerationClient;

/// Create the generation client selected by configuration
pub fn create_client(config: &Config) -> Result<Arc<dyn GenerationClient>> {
    let client: Arc<dyn GenerationClient> = if config.llm.offline {
        Arc::new(OfflineClient::new())
    } else {
        Arc::new(MistralClient::from_config(config)?)
    };
    Ok(client)
}
