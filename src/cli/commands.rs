//! CLI commands
//!
//! Special commands that can be executed in the REPL.

use crate::agent::Agent;
use crate::core::{AgentResult, Config, Step};

/// Result of parsing a command
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Continue processing as a task for the agent
    Continue(String),
    /// Command was handled, show output
    Handled(String),
    /// Exit the REPL
    Exit,
}

/// Parse and handle special commands
pub fn handle_command(
    input: &str,
    agent: &Agent,
    config: &Config,
    last_result: Option<&AgentResult>,
) -> CommandResult {
    let input = input.trim();
    let cmd = input.split_whitespace().next().unwrap_or("").to_lowercase();

    match cmd.as_str() {
        "exit" | "quit" | "q" => CommandResult::Exit,

        "help" | "?" => CommandResult::Handled(help_text()),

        "tools" => CommandResult::Handled(format!(
            "Registered tools:\n{}",
            agent
                .tools()
                .describe_all()
                .lines()
                .map(|l| format!("  - {}", l))
                .collect::<Vec<_>>()
                .join("\n")
        )),

        "config" => CommandResult::Handled(render_config(config)),

        "history" => match last_result {
            Some(result) => CommandResult::Handled(format!(
                "{}\n({} rounds)",
                render_steps(&result.history),
                result.step_count
            )),
            None => CommandResult::Handled("No task has been run yet.".to_string()),
        },

        _ => {
            if input.starts_with('/') {
                CommandResult::Handled(format!(
                    "Unknown command: {}. Type 'help' for available commands.",
                    cmd
                ))
            } else {
                CommandResult::Continue(input.to_string())
            }
        }
    }
}

/// Render a transcript as numbered `kind: content` lines
pub fn render_steps(steps: &[Step]) -> String {
    steps
        .iter()
        .map(|s| format!("{:>3}. {:<11} {}", s.sequence_number, s.kind, s.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Output of a single-prompt run: the answer, preceded by the transcript
/// when `verbose`
pub fn render_result(result: &AgentResult, verbose: bool) -> String {
    if verbose {
        format!("{}\n\n{}", render_steps(&result.history), result.answer)
    } else {
        result.answer.clone()
    }
}

/// Config as TOML, with the API key masked
fn render_config(config: &Config) -> String {
    let mut shown = config.clone();
    if shown.llm.api_key.is_some() {
        shown.llm.api_key = Some("***".to_string());
    }
    toml::to_string_pretty(&shown).unwrap_or_else(|e| format!("Failed to render config: {}", e))
}

fn help_text() -> String {
    r#"Commands:
  help, ?        Show this help
  tools          List the tools the agent can call
  config         Show the active configuration
  history        Show the steps of the last task
  exit, quit, q  Leave

Anything else is sent to the agent as a task, e.g.
  add buy milk
  show me all the todos
  delete todo 3"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StepKind;
    use crate::llm::OfflineClient;
    use std::sync::Arc;

    fn agent() -> Agent {
        Agent::builder(Arc::new(OfflineClient::new())).build().unwrap()
    }

    #[test]
    fn test_exit_and_help() {
        let config = Config::default();
        assert_eq!(handle_command("quit", &agent(), &config, None), CommandResult::Exit);
        assert!(matches!(
            handle_command("help", &agent(), &config, None),
            CommandResult::Handled(_)
        ));
    }

    #[test]
    fn test_plain_text_is_a_task() {
        let config = Config::default();
        assert_eq!(
            handle_command("  add buy milk ", &agent(), &config, None),
            CommandResult::Continue("add buy milk".to_string())
        );
    }

    #[test]
    fn test_unknown_slash_command() {
        let config = Config::default();
        match handle_command("/frobnicate", &agent(), &config, None) {
            CommandResult::Handled(out) => assert!(out.contains("Unknown command")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_history_of_last_result() {
        let result = AgentResult {
            answer: "done".to_string(),
            history: vec![Step::new(1, StepKind::Answer, "done")],
            step_count: 1,
        };
        match handle_command("history", &agent(), &Config::default(), Some(&result)) {
            CommandResult::Handled(out) => {
                assert!(out.contains("answer"));
                assert!(out.contains("(1 rounds)"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_config_masks_api_key() {
        let mut config = Config::default();
        config.llm.api_key = Some("sk-SECRET".to_string());

        match handle_command("config", &agent(), &config, None) {
            CommandResult::Handled(out) => {
                assert!(!out.contains("sk-SECRET"));
                assert!(out.contains(r#"api_key = "***""#));
                assert!(out.contains("max_steps"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_render_result_prints_answer() {
        let result = AgentResult {
            answer: "Successfully deleted todo with ID 1".to_string(),
            history: vec![
                Step::new(1, StepKind::Thought, "I need to delete a todo item."),
                Step::new(2, StepKind::Answer, "Successfully deleted todo with ID 1"),
            ],
            step_count: 1,
        };

        assert_eq!(render_result(&result, false), "Successfully deleted todo with ID 1");

        let verbose = render_result(&result, true);
        assert!(verbose.contains("1. thought"));
        assert!(verbose.ends_with("\n\nSuccessfully deleted todo with ID 1"));
    }
}
