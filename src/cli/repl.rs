//! Interactive REPL for the todo agent
//!
//! Provides the main user interaction loop.

use std::io::{self, BufRead, Write};

use crate::agent::Agent;
use crate::cli::commands::{handle_command, render_steps, CommandResult};
use crate::core::{AgentResult, Config, Result};

/// Interactive REPL (Read-Eval-Print Loop)
pub struct Repl {
    agent: Agent,
    config: Config,
    last_result: Option<AgentResult>,
}

impl Repl {
    /// Create a REPL with custom configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self {
            agent: Agent::with_config(&config)?,
            config,
            last_result: None,
        })
    }

    /// Run the REPL
    pub async fn run(&mut self) -> Result<()> {
        self.print_banner();

        let stdin = io::stdin();
        let mut stdout = io::stdout();

        loop {
            print!("You: ");
            stdout.flush()?;

            let mut input = String::new();
            match stdin.lock().read_line(&mut input) {
                Ok(0) => {
                    // EOF (Ctrl+D)
                    println!("\nGoodbye!");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    eprintln!("Error reading input: {}", e);
                    continue;
                }
            }

            let input = input.trim();
            if input.is_empty() {
                continue;
            }

            match handle_command(input, &self.agent, &self.config, self.last_result.as_ref()) {
                CommandResult::Exit => {
                    println!("\nGoodbye!");
                    break;
                }
                CommandResult::Handled(output) => {
                    println!("{}\n", output);
                }
                CommandResult::Continue(task) => match self.agent.run(&task).await {
                    Ok(result) => {
                        println!("\n{}\n", render_steps(&result.history));
                        println!("Agent: {}\n", result.answer);
                        self.last_result = Some(result);
                    }
                    Err(e) => {
                        eprintln!("\nError: {}\n", e);
                    }
                },
            }
        }

        Ok(())
    }

    /// Print the startup banner
    fn print_banner(&self) {
        println!("\nTodo Agent - ReAct assistant for your todo list");
        println!("Backend:   {}", self.agent.backend_name());
        if !self.config.llm.offline {
            println!("Model:     {} @ {}", self.config.llm.model, self.config.llm.base_url);
        }
        println!("Todo API:  {}", self.config.todo_api.base_url);
        println!("Max steps: {}", self.agent.max_steps());
        println!();
        println!("Commands: help, tools, config, history, exit");
        println!("{}", "─".repeat(60));
    }
}
