//! Shared types used across agent modules
//!
//! Steps of the reasoning transcript and the result handed back to callers.

use serde::{Deserialize, Serialize};

/// Kind of a transcript step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Thought,
    Action,
    Observation,
    Answer,
}

impl StepKind {
    /// Label used when rendering the transcript into a prompt
    pub fn label(&self) -> &'static str {
        match self {
            StepKind::Thought => "Thought",
            StepKind::Action => "Action",
            StepKind::Observation => "Observation",
            StepKind::Answer => "Answer",
        }
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            StepKind::Thought => "thought",
            StepKind::Action => "action",
            StepKind::Observation => "observation",
            StepKind::Answer => "answer",
        })
    }
}

/// One entry of the transcript. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// 1-based position within its history
    pub sequence_number: usize,
    /// What phase produced this step
    pub kind: StepKind,
    /// Text of the step
    pub content: String,
}

impl Step {
    pub(crate) fn new(sequence_number: usize, kind: StepKind, content: impl Into<String>) -> Self {
        Self {
            sequence_number,
            kind,
            content: content.into(),
        }
    }
}

/// Outcome of one `Agent::run` invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResult {
    /// Final answer text
    pub answer: String,
    /// Full transcript in insertion order
    pub history: Vec<Step>,
    /// Number of rounds executed
    pub step_count: usize,
}

impl AgentResult {
    /// Steps of a given kind, in order
    pub fn steps_of(&self, kind: StepKind) -> impl Iterator<Item = &Step> {
        self.history.iter().filter(move |s| s.kind == kind)
    }
}
