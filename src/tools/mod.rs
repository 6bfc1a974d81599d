//! Tools module - Tool implementations for the agent
//!
//! Contains the tool registry and the built-in todo tools.

pub mod registry;
pub mod todo;

pub use registry::{Tool, ToolRegistry};
pub use todo::{AddTodoTool, DeleteTodoTool, ListTodosTool, Todo, TodoApiClient};
