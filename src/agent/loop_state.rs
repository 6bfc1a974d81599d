//! Agent loop state management
//!
//! Tracks the round counter and the step history of one `run` invocation.
//! Nothing here is shared between invocations.

use crate::core::{Step, StepKind};

/// Ordered transcript of one run
#[derive(Debug, Clone, Default)]
pub struct History {
    steps: Vec<Step>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step, numbering it after the previous one (starting at 1)
    pub fn push(&mut self, kind: StepKind, content: impl Into<String>) {
        let sequence_number = self.steps.len() + 1;
        self.steps.push(Step::new(sequence_number, kind, content));
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// Content of the most recent observation
    pub fn last_observation(&self) -> Option<&str> {
        self.steps
            .iter()
            .rev()
            .find(|s| s.kind == StepKind::Observation)
            .map(|s| s.content.as_str())
    }

    /// Render as `Kind: content` lines, oldest first
    pub fn render(&self) -> String {
        self.steps
            .iter()
            .map(|s| format!("{}: {}", s.kind.label(), s.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

/// State of the agent reasoning loop
#[derive(Debug, Clone)]
pub struct AgentLoopState {
    /// Rounds completed so far
    pub round: usize,
    /// Maximum allowed rounds
    pub max_rounds: usize,
    /// Transcript so far
    pub history: History,
    /// Final answer once one has been produced
    pub final_answer: Option<String>,
}

impl AgentLoopState {
    /// Create a new loop state with the given round budget
    pub fn new(max_rounds: usize) -> Self {
        Self {
            round: 0,
            max_rounds,
            history: History::new(),
            final_answer: None,
        }
    }

    /// Check if the loop should continue
    pub fn should_continue(&self) -> bool {
        self.round < self.max_rounds && self.final_answer.is_none()
    }

    /// Increment the round counter
    pub fn next_round(&mut self) {
        self.round += 1;
    }

    /// Record the final answer as the closing step
    pub fn finish(&mut self, answer: impl Into<String>) {
        let answer = answer.into();
        self.history.push(StepKind::Answer, answer.clone());
        self.final_answer = Some(answer);
    }
}

/// Answer text derived from what the tools last reported
pub fn answer_from_observation(observation: Option<&str>) -> String {
    match observation {
        Some(obs) if obs.to_lowercase().contains("successfully") => obs.to_string(),
        Some(obs) => format!("Based on my actions: {}", obs),
        None => "I couldn't complete the requested task.".to_string(),
    }
}
