//! Mistral client implementation
//!
//! Async HTTP client for an OpenAI-compatible `/chat/completions` endpoint.
//! Any failure on the way to a non-empty completion is reported as
//! `AdapterUnavailable` so the agent loop can fall back.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::core::{AgentError, Config, Result};
use crate::llm::traits::GenerationClient;

/// Chat completions client
#[derive(Clone)]
pub struct MistralClient {
    client: Client,
    url: String,
    api_key: Option<String>,
    model: String,
    system_prompt: String,
    temperature: f64,
    max_tokens: u32,
}

/// Chat completions request
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat completions response
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl MistralClient {
    /// Create a new client from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.llm.timeout_secs))
            .build()
            .map_err(|e| AgentError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.completions_url(),
            api_key: config.llm.api_key.clone(),
            model: config.llm.model.clone(),
            system_prompt: config.llm.system_prompt.clone(),
            temperature: config.llm.temperature,
            max_tokens: config.llm.max_tokens,
        })
    }

    /// Pull the first choice's text out of a response body
    fn extract_content(body: &str) -> Result<String> {
        let response: ChatResponse = serde_json::from_str(body)
            .map_err(|e| AgentError::adapter(format!("Failed to parse response: {}", e)))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| AgentError::adapter("empty completion"))
    }
}

#[async_trait]
impl GenerationClient for MistralClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!(url = %self.url, model = %self.model, "Sending chat completion request");

        let mut builder = self.client.post(&self.url).json(&request);
        if let Some(ref key) = self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                AgentError::adapter(format!("Request to {} timed out", self.url))
            } else if e.is_connect() {
                AgentError::adapter(format!("Cannot connect to {}", self.url))
            } else {
                AgentError::adapter(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AgentError::adapter(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AgentError::adapter(format!("Failed to read response: {}", e)))?;
        debug!(bytes = body.len(), "Received chat completion");

        Self::extract_content(&body)
    }

    fn name(&self) -> &str {
        "mistral"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let mut config = Config::default();
        config.llm.base_url = "https://llm.example.com/v1".to_string();
        let client = MistralClient::from_config(&config).unwrap();
        assert_eq!(client.url, "https://llm.example.com/v1/chat/completions");
    }

    #[test]
    fn test_extract_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Answer: done"}}]}"#;
        assert_eq!(MistralClient::extract_content(body).unwrap(), "Answer: done");
    }

    #[test]
    fn test_empty_choices_is_unavailable() {
        let err = MistralClient::extract_content(r#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, AgentError::AdapterUnavailable(_)));

        let err = MistralClient::extract_content("not json").unwrap_err();
        assert!(matches!(err, AgentError::AdapterUnavailable(_)));
    }

    #[test]
    fn test_request_shape() {
        let request = ChatRequest {
            model: "mistral",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            temperature: 0.7,
            max_tokens: 500,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 500);
    }
}
