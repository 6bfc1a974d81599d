//! Agent orchestrator
//!
//! Drives the ReAct loop (Thought → Action → Observation) for one task.
//! Each round asks the generation backend for a decision, falling back to
//! the keyword reasoner when the backend fails or replies off-grammar, then
//! either dispatches the chosen tool or finishes with an answer.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::agent::fallback::FallbackReasoner;
use crate::agent::loop_state::{answer_from_observation, AgentLoopState, History};
use crate::agent::parser::{parse_decision, Decision};
use crate::agent::prompt::build_prompt;
use crate::core::{AgentError, AgentResult, Config, Result, StepKind};
use crate::llm::{create_client, GenerationClient};
use crate::tools::{Tool, TodoApiClient, ToolRegistry};

const MAX_STEPS_PREFIX: &str = "I've reached the maximum number of steps. ";

/// Builder for creating an [`Agent`]
pub struct AgentBuilder {
    llm: Arc<dyn GenerationClient>,
    tools: ToolRegistry,
    max_steps: usize,
}

impl AgentBuilder {
    /// Start from a generation client, with no tools and a budget of 10 rounds
    pub fn new(llm: Arc<dyn GenerationClient>) -> Self {
        Self {
            llm,
            tools: ToolRegistry::new(),
            max_steps: 10,
        }
    }

    /// Register a tool. Fails if the name is already taken.
    pub fn tool(mut self, tool: Arc<dyn Tool>) -> Result<Self> {
        self.tools.register(tool)?;
        Ok(self)
    }

    /// Replace the tool set
    pub fn tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    /// Set the round budget
    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Build the agent
    pub fn build(self) -> Result<Agent> {
        if self.max_steps == 0 {
            return Err(AgentError::config("max_steps must be at least 1"));
        }

        Ok(Agent {
            llm: self.llm,
            tools: Arc::new(self.tools),
            fallback: FallbackReasoner::new(),
            max_steps: self.max_steps,
        })
    }
}

/// Main agent that orchestrates the generation backend and tools.
///
/// `run` takes `&self` and keeps all per-task state on its own stack, so one
/// agent can serve concurrent tasks.
pub struct Agent {
    /// Generation backend
    llm: Arc<dyn GenerationClient>,
    /// Tool registry, read-only after construction
    tools: Arc<ToolRegistry>,
    fallback: FallbackReasoner,
    /// Round budget
    max_steps: usize,
}

impl Agent {
    /// Create a builder around a generation client
    pub fn builder(llm: Arc<dyn GenerationClient>) -> AgentBuilder {
        AgentBuilder::new(llm)
    }

    /// Create an agent with the todo tools and the backend from configuration
    pub fn with_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let api = Arc::new(TodoApiClient::from_config(config)?);
        let tools = ToolRegistry::with_todo_tools(api)?;

        AgentBuilder::new(create_client(config)?)
            .tools(tools)
            .max_steps(config.agent.max_steps)
            .build()
    }

    /// Get the tool registry
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Get the round budget
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Get the generation backend name
    pub fn backend_name(&self) -> &str {
        self.llm.name()
    }

    /// Run the ReAct loop on a task.
    ///
    /// The loop ends when a decision carries an answer or the round budget is
    /// spent, in which case an answer is synthesized from the last
    /// observation. The only error returned is `InvalidInput` for an empty
    /// task.
    pub async fn run(&self, question: &str) -> Result<AgentResult> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AgentError::invalid_input("task must not be empty"));
        }

        let mut state = AgentLoopState::new(self.max_steps);
        info!(max_steps = state.max_rounds, "Starting reasoning loop");

        while state.should_continue() {
            state.next_round();
            debug!(round = state.round, "Requesting decision");

            let decision = self.decide(question, &state.history).await;

            state
                .history
                .push(StepKind::Thought, round_thought(&decision));

            match decision {
                Decision::Answer { answer, .. } => {
                    info!(round = state.round, "Final answer received");
                    state.finish(answer);
                }
                Decision::Action { name, input, .. } => {
                    info!(round = state.round, tool = %name, "Dispatching action");
                    state
                        .history
                        .push(StepKind::Action, format!("{}[{}]", name, input));
                    let observation = self.tools.invoke(&name, &input).await;
                    state.history.push(StepKind::Observation, observation);
                }
                Decision::ThoughtOnly { .. } => {
                    warn!(round = state.round, "Decision had neither action nor answer");
                    state.history.push(
                        StepKind::Observation,
                        "No action or answer was given. Respond with an Action or an Answer.",
                    );
                }
            }
        }

        let answer = match state.final_answer.take() {
            Some(answer) => answer,
            None => {
                info!(rounds = state.round, "Step budget exhausted, synthesizing answer");
                let answer = format!(
                    "{}{}",
                    MAX_STEPS_PREFIX,
                    answer_from_observation(state.history.last_observation())
                );
                state.finish(answer.clone());
                answer
            }
        };

        info!(
            rounds = state.round,
            steps = state.history.len(),
            "Reasoning loop complete"
        );

        Ok(AgentResult {
            answer,
            step_count: state.round,
            history: state.history.into_steps(),
        })
    }

    /// One backend attempt; any failure hands the round to the fallback reasoner
    async fn decide(&self, question: &str, history: &History) -> Decision {
        let prompt = build_prompt(question, &self.tools, history);

        let parsed = self
            .llm
            .generate(&prompt)
            .await
            .and_then(|raw| parse_decision(&raw));

        match parsed {
            Ok(decision) => decision,
            Err(e) => {
                warn!(
                    backend = self.llm.name(),
                    expected = e.triggers_fallback(),
                    error = %e,
                    "Using fallback reasoner"
                );
                self.fallback.decide(question, history)
            }
        }
    }
}

/// Every round opens with a thought; decisions without one get a stand-in
fn round_thought(decision: &Decision) -> String {
    match decision.thought() {
        Some(thought) => thought.to_string(),
        None => match decision {
            Decision::Action { name, .. } => format!("I will use {}.", name),
            _ => "I have the final answer.".to_string(),
        },
    }
}
