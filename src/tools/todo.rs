//! Todo tools
//!
//! HTTP client for the todo service plus the three built-in tools the agent
//! can call: `add_todo`, `delete_todo`, and `list_todos`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::core::{AgentError, Config, Result};
use crate::tools::registry::{Tool, ToolRegistry};

/// Name of the add-capability tool
pub const ADD_TODO: &str = "add_todo";
/// Name of the delete-capability tool
pub const DELETE_TODO: &str = "delete_todo";
/// Name of the list-capability tool
pub const LIST_TODOS: &str = "list_todos";

/// A todo item as served by the todo API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Serialize)]
struct NewTodo<'a> {
    title: &'a str,
}

/// Client for the todo CRUD service
#[derive(Clone)]
pub struct TodoApiClient {
    client: Client,
    base_url: String,
}

impl TodoApiClient {
    /// Create a client from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.todo_api.timeout_secs))
            .build()
            .map_err(|e| AgentError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.todo_api.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /todos`
    pub async fn create(&self, title: &str) -> Result<Todo> {
        let response = self
            .client
            .post(format!("{}/todos", self.base_url))
            .json(&NewTodo { title })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AgentError::tool(format!(
                "Error adding todo: HTTP {}",
                response.status().as_u16()
            )));
        }

        Ok(response.json().await?)
    }

    /// `DELETE /todos/{id}`. Returns `false` when the service answers 404.
    pub async fn delete(&self, id: u64) -> Result<bool> {
        let response = self
            .client
            .delete(format!("{}/todos/{}", self.base_url, id))
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            s if s.is_success() => Ok(true),
            s => Err(AgentError::tool(format!(
                "Error deleting todo: HTTP {}",
                s.as_u16()
            ))),
        }
    }

    /// `GET /todos`
    pub async fn list(&self) -> Result<Vec<Todo>> {
        let response = self
            .client
            .get(format!("{}/todos", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AgentError::tool(format!(
                "Error listing todos: HTTP {}",
                response.status().as_u16()
            )));
        }

        Ok(response.json().await?)
    }
}

/// Render todos the way the agent sees them
pub fn format_todo_list(todos: &[Todo]) -> String {
    if todos.is_empty() {
        return "No todos found. The list is empty.".to_string();
    }

    let lines: Vec<String> = todos
        .iter()
        .map(|t| {
            let status = if t.completed { "✓" } else { "○" };
            format!("{} [{}] {}", status, t.id, t.title)
        })
        .collect();

    format!("Current todos:\n{}", lines.join("\n"))
}

/// Accepts `3`, `#3`, or ` 3 `
fn parse_todo_id(input: &str) -> Result<u64> {
    let trimmed = input.trim().trim_start_matches('#');
    trimmed
        .parse()
        .map_err(|_| AgentError::tool(format!("'{}' is not a valid todo ID", input.trim())))
}

/// Tool for adding a todo
pub struct AddTodoTool {
    api: Arc<TodoApiClient>,
}

impl AddTodoTool {
    pub fn new(api: Arc<TodoApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Tool for AddTodoTool {
    fn name(&self) -> &str {
        ADD_TODO
    }

    fn description(&self) -> &str {
        "Add a new todo item. Input should be the title of the todo."
    }

    async fn invoke(&self, input: &str) -> Result<String> {
        let title = input.trim();
        if title.is_empty() {
            return Err(AgentError::tool("a todo title is required"));
        }

        let todo = self.api.create(title).await?;
        Ok(format!(
            "Successfully added todo: '{}' with ID {}",
            todo.title, todo.id
        ))
    }
}

/// Tool for deleting a todo by ID
pub struct DeleteTodoTool {
    api: Arc<TodoApiClient>,
}

impl DeleteTodoTool {
    pub fn new(api: Arc<TodoApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Tool for DeleteTodoTool {
    fn name(&self) -> &str {
        DELETE_TODO
    }

    fn description(&self) -> &str {
        "Delete a todo item. Input should be the ID of the todo to delete."
    }

    async fn invoke(&self, input: &str) -> Result<String> {
        let id = parse_todo_id(input)?;

        if self.api.delete(id).await? {
            Ok(format!("Successfully deleted todo with ID {}", id))
        } else {
            Ok(format!("Todo with ID {} not found", id))
        }
    }
}

/// Tool for listing all todos
pub struct ListTodosTool {
    api: Arc<TodoApiClient>,
}

impl ListTodosTool {
    pub fn new(api: Arc<TodoApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Tool for ListTodosTool {
    fn name(&self) -> &str {
        LIST_TODOS
    }

    fn description(&self) -> &str {
        "List all todo items. No input required."
    }

    async fn invoke(&self, _input: &str) -> Result<String> {
        let todos = self.api.list().await?;
        Ok(format_todo_list(&todos))
    }
}

impl ToolRegistry {
    /// Create a registry with the three todo tools
    pub fn with_todo_tools(api: Arc<TodoApiClient>) -> Result<Self> {
        let mut registry = Self::new();
        registry.register(Arc::new(AddTodoTool::new(Arc::clone(&api))))?;
        registry.register(Arc::new(DeleteTodoTool::new(Arc::clone(&api))))?;
        registry.register(Arc::new(ListTodosTool::new(api)))?;
        Ok(registry)
    }
}
