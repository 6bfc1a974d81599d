//! Todo Agent
//!
//! Main entry point for the CLI application.

use clap::Parser;
use todo_agent::cli::render_result;
use todo_agent::{Agent, AgentError, Config, Repl};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Todo Agent - ReAct assistant for a todo list
#[derive(Parser, Debug)]
#[command(name = "todo-agent")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Single prompt mode (non-interactive)
    #[arg(long, short = 'p')]
    prompt: Option<String>,

    /// Maximum reasoning rounds
    #[arg(long, short = 'n')]
    max_steps: Option<usize>,

    /// Model name for the generation backend
    #[arg(long, short = 'm')]
    model: Option<String>,

    /// Base URL of the OpenAI-compatible generation backend
    #[arg(long)]
    llm_url: Option<String>,

    /// Base URL of the todo API
    #[arg(long)]
    todo_api: Option<String>,

    /// Skip the generation backend and use keyword heuristics only
    #[arg(long)]
    offline: bool,

    /// Print the result as JSON (single prompt mode)
    #[arg(long)]
    json: bool,

    /// Enable debug logging and print the full transcript
    #[arg(long, short = 'd')]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.debug {
        "todo_agent=debug"
    } else {
        "todo_agent=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Build configuration
    let mut config = Config::load();

    // Apply CLI overrides
    if let Some(max_steps) = args.max_steps {
        config.agent.max_steps = max_steps;
    }
    if let Some(model) = args.model {
        config.llm.model = model;
    }
    if let Some(url) = args.llm_url {
        config.llm.base_url = url;
    }
    if let Some(url) = args.todo_api {
        config.todo_api.base_url = url;
    }
    if args.offline {
        config.llm.offline = true;
    }

    config.validate()?;

    // Single prompt mode
    if let Some(prompt) = args.prompt {
        let agent = Agent::with_config(&config)?;

        let result = match agent.run(&prompt).await {
            Ok(result) => result,
            Err(AgentError::InvalidInput(msg)) => {
                eprintln!("Invalid input: {}", msg);
                std::process::exit(2);
            }
            Err(e) => return Err(e.into()),
        };

        if args.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", render_result(&result, args.debug));
        }
        return Ok(());
    }

    // Interactive REPL mode
    let mut repl = Repl::with_config(config)?;
    repl.run().await?;

    Ok(())
}
