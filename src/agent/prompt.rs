//! Prompt template for the decision request sent each round

use crate::agent::loop_state::History;
use crate::tools::ToolRegistry;

/// Build the prompt for the next round
pub fn build_prompt(question: &str, tools: &ToolRegistry, history: &History) -> String {
    let tool_list = tools
        .describe_all()
        .lines()
        .map(|line| format!("- {}", line))
        .collect::<Vec<_>>()
        .join("\n");

    let mut prompt = format!(
        r#"You are a ReAct agent that helps manage a todo list application.

Available tools:
{}

To use a tool, format your response EXACTLY as:
Thought: [your reasoning about what to do next]
Action: tool_name[input]

When the task is complete, respond with:
Thought: [your reasoning]
Answer: [your final answer to the user]

Only one Action per response. After each Action you will receive an Observation.

Question: {}
"#,
        tool_list, question
    );

    if !history.is_empty() {
        prompt.push_str("\nPrevious steps:\n");
        prompt.push_str(&history.render());
        prompt.push('\n');
    }

    prompt.push_str("\nWhat is your next thought and action (or answer)?");
    prompt
}
