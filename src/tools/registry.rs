//! Tool registry - manages and dispatches tool calls
//!
//! Tools are registered once, before the agent runs, and are read-only
//! afterwards. `invoke` never fails: every error or panic raised by a tool
//! is turned into observation text.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use tracing::{debug, warn};

use crate::core::{AgentError, Result};

/// A named capability the agent can call with a text input
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name used in `Action: name[input]`
    fn name(&self) -> &str;

    /// Description shown to the generation backend
    fn description(&self) -> &str;

    /// Run the tool. May fail; the registry contains the failure.
    async fn invoke(&self, input: &str) -> Result<String>;
}

/// Registry of available tools
#[derive(Default)]
pub struct ToolRegistry {
    /// Tools in registration order
    tools: Vec<Arc<dyn Tool>>,
    /// Position in `tools`, indexed by name
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Names must be unique.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let name = tool.name().to_string();
        if self.index.contains_key(&name) {
            return Err(AgentError::DuplicateTool(name));
        }
        self.index.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Look up a tool by name
    pub fn lookup(&self, name: &str) -> Result<Arc<dyn Tool>> {
        self.index
            .get(name)
            .map(|&i| Arc::clone(&self.tools[i]))
            .ok_or_else(|| AgentError::UnknownTool(name.to_string()))
    }

    /// Execute a tool and return its output as observation text.
    ///
    /// Unknown tools, tool errors, and tool panics all come back as
    /// `Error executing <name>: <message>`.
    pub async fn invoke(&self, name: &str, input: &str) -> String {
        let outcome = match self.lookup(name) {
            Ok(tool) => {
                debug!(tool = name, input, "Executing tool");
                match AssertUnwindSafe(tool.invoke(input)).catch_unwind().await {
                    Ok(result) => result,
                    Err(panic) => Err(AgentError::tool(panic_message(panic.as_ref()))),
                }
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(output) => output,
            Err(e) => {
                warn!(tool = name, error = %e, "Tool execution failed");
                format!("Error executing {}: {}", name, e)
            }
        }
    }

    /// Render `name: description` for every tool, in registration order
    pub fn describe_all(&self) -> String {
        self.tools
            .iter()
            .map(|t| format!("{}: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Names of all tools, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Check if a tool is registered
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("tool panicked: {}", s)
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("tool panicked: {}", s)
    } else {
        "tool panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Repeat the input"
        }

        async fn invoke(&self, input: &str) -> Result<String> {
            Ok(input.to_string())
        }
    }

    struct FailingTool;

    #[async_trait]
    impl Tool for FailingTool {
        fn name(&self) -> &str {
            "broken"
        }

        fn description(&self) -> &str {
            "Always fails"
        }

        async fn invoke(&self, _input: &str) -> Result<String> {
            Err(AgentError::tool("backend exploded"))
        }
    }

    struct PanickingTool;

    #[async_trait]
    impl Tool for PanickingTool {
        fn name(&self) -> &str {
            "panicky"
        }

        fn description(&self) -> &str {
            "Panics"
        }

        async fn invoke(&self, _input: &str) -> Result<String> {
            panic!("index out of bounds")
        }
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool)).unwrap();
        registry.register(Arc::new(FailingTool)).unwrap();
        registry.register(Arc::new(PanickingTool)).unwrap();
        registry
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = registry();
        let err = registry.register(Arc::new(EchoTool)).unwrap_err();
        assert!(matches!(err, AgentError::DuplicateTool(ref n) if n == "echo"));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_lookup_unknown() {
        let registry = registry();
        assert!(registry.lookup("echo").is_ok());
        assert!(matches!(
            registry.lookup("nope"),
            Err(AgentError::UnknownTool(_))
        ));
    }

    #[test]
    fn test_describe_all_in_registration_order() {
        let registry = registry();
        assert_eq!(
            registry.describe_all(),
            "echo: Repeat the input\nbroken: Always fails\npanicky: Panics"
        );
        assert_eq!(registry.names(), vec!["echo", "broken", "panicky"]);
    }

    #[tokio::test]
    async fn test_invoke_success() {
        let registry = registry();
        assert_eq!(registry.invoke("echo", "a[b]c").await, "a[b]c");
    }

    #[tokio::test]
    async fn test_invoke_failure_becomes_observation() {
        let registry = registry();
        let output = registry.invoke("broken", "").await;
        assert_eq!(output, "Error executing broken: backend exploded");
    }

    #[tokio::test]
    async fn test_invoke_unknown_becomes_observation() {
        let registry = registry();
        let output = registry.invoke("fly", "").await;
        assert!(output.starts_with("Error executing fly:"));
        assert!(output.contains("Unknown tool"));
    }

    #[tokio::test]
    async fn test_invoke_panic_is_contained() {
        let registry = registry();
        let output = registry.invoke("panicky", "").await;
        assert!(output.contains("Error executing panicky"));
        assert!(output.contains("index out of bounds"));
    }
}
