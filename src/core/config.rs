//! Configuration management for the todo agent
//!
//! Supports environment variables, a config file, and runtime overrides.
//!
//! Config file location: ~/.config/todo-agent/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::core::error::{AgentError, Result};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Generation backend configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Todo service configuration
    #[serde(default)]
    pub todo_api: TodoApiConfig,
    /// Agent loop configuration
    #[serde(default)]
    pub agent: AgentConfig,
}

/// OpenAI-compatible chat completions endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL, without the `/chat/completions` suffix
    pub base_url: String,
    /// Bearer token, if the endpoint requires one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model name sent with each request
    pub model: String,
    /// System message sent ahead of every prompt
    pub system_prompt: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Skip the backend entirely and reason from heuristics
    pub offline: bool,
}

/// Todo CRUD service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoApiConfig {
    /// Base URL of the service (default: http://localhost:5001)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Agent behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Maximum reasoning rounds before a final answer is synthesized
    /// Default: 10
    pub max_steps: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/v1".to_string()),
            api_key: env::var("API_KEY").ok().filter(|k| !k.is_empty()),
            model: env::var("LLM_MODEL").unwrap_or_else(|_| "mistral".to_string()),
            system_prompt: "You are a helpful ReAct agent that manages todos.".to_string(),
            temperature: 0.7,
            max_tokens: 500,
            timeout_secs: 60,
            offline: env::var("TODO_AGENT_OFFLINE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

impl Default for TodoApiConfig {
    fn default() -> Self {
        Self {
            base_url: env::var("TODO_API_URL")
                .unwrap_or_else(|_| "http://localhost:5001".to_string()),
            timeout_secs: 10,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_steps: env::var("TODO_AGENT_MAX_STEPS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("todo-agent")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    /// Priority: CLI args > config file > env vars > defaults
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();

        match Self::load_from_file() {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("Using default configuration: {}", e);
                Self::default()
            }
        }
    }

    /// Load configuration from file only
    pub fn load_from_file() -> Result<Self> {
        let config_path = Self::config_file();

        if !config_path.exists() {
            return Err(AgentError::config("Config file not found"));
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| AgentError::config(format!("Failed to read config: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text; missing sections take defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| AgentError::config(format!("Failed to parse config: {}", e)))
    }

    /// Reject settings the agent loop cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.agent.max_steps == 0 {
            return Err(AgentError::config("agent.max_steps must be at least 1"));
        }
        if self.llm.base_url.trim().is_empty() {
            return Err(AgentError::config("llm.base_url must not be empty"));
        }
        if self.todo_api.base_url.trim().is_empty() {
            return Err(AgentError::config("todo_api.base_url must not be empty"));
        }
        Ok(())
    }

    /// Full chat completions URL
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.llm.base_url.trim_end_matches('/'))
    }

    /// Generate a default config file content for display
    pub fn default_config_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config)
            .unwrap_or_else(|_| String::from("# Error generating config"))
    }
}
