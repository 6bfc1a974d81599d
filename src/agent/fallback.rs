//! Fallback reasoner
//!
//! Deterministic stand-in for the generation backend. Keyword rules are
//! checked top to bottom and the first match wins:
//!
//! 1. the last round ran a tool: answer from its observation
//! 2. `add` / `create`: `add_todo` with the rest of the task as title
//! 3. `delete` / `remove` plus a numeric ID: `delete_todo`
//! 4. `list` / `show`: `list_todos`
//! 5. otherwise: answer that the task could not be interpreted

use crate::agent::loop_state::{answer_from_observation, History};
use crate::agent::parser::Decision;
use crate::core::StepKind;
use crate::tools::todo::{ADD_TODO, DELETE_TODO, LIST_TODOS};

const ADD_VERBS: &[&str] = &["add", "create"];
const DELETE_VERBS: &[&str] = &["delete", "remove"];
const LIST_VERBS: &[&str] = &["list", "show"];

/// Words skipped between the verb and the todo title
const TITLE_FILLER: &[&str] = &[
    "a", "an", "the", "new", "todo", "task", "item", "to", "called", "named", "titled",
];

const DEFAULT_TITLE: &str = "New todo item";

/// A word of the task, with the original spelling kept for titles
struct Word<'a> {
    lower: String,
    original: &'a str,
}

fn words(text: &str) -> Vec<Word<'_>> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .map(|w| Word {
            lower: w.to_lowercase(),
            original: w,
        })
        .collect()
}

fn position_of(words: &[Word<'_>], verbs: &[&str]) -> Option<usize> {
    words.iter().position(|w| verbs.contains(&w.lower.as_str()))
}

/// Observation of a tool call that closed the history, if any. Loop notes
/// after a thought-only round do not count.
fn last_tool_result(history: &History) -> Option<&str> {
    match history.steps() {
        [.., action, observation]
            if action.kind == StepKind::Action && observation.kind == StepKind::Observation =>
        {
            Some(observation.content.as_str())
        }
        _ => None,
    }
}

/// Keyword-driven decision maker used when the backend cannot be used
#[derive(Debug, Clone, Default)]
pub struct FallbackReasoner;

impl FallbackReasoner {
    pub fn new() -> Self {
        Self
    }

    /// Decide the next step from the task and what has happened so far.
    /// Never fails.
    pub fn decide(&self, task: &str, history: &History) -> Decision {
        if let Some(observation) = last_tool_result(history) {
            return Decision::Answer {
                thought: Some(
                    "The tool has reported back, so I can give the result.".to_string(),
                ),
                answer: answer_from_observation(Some(observation)),
            };
        }

        let words = words(task);

        if let Some(verb) = position_of(&words, ADD_VERBS) {
            let title: Vec<&str> = words[verb + 1..]
                .iter()
                .skip_while(|w| TITLE_FILLER.contains(&w.lower.as_str()))
                .map(|w| w.original)
                .collect();
            let title = if title.is_empty() {
                DEFAULT_TITLE.to_string()
            } else {
                title.join(" ")
            };
            return Decision::Action {
                thought: Some("I need to add a new todo item.".to_string()),
                name: ADD_TODO.to_string(),
                input: title,
            };
        }

        if position_of(&words, DELETE_VERBS).is_some() {
            if let Some(id) = words
                .iter()
                .find(|w| w.original.chars().all(|c| c.is_ascii_digit()))
            {
                return Decision::Action {
                    thought: Some("I need to delete a todo item.".to_string()),
                    name: DELETE_TODO.to_string(),
                    input: id.original.to_string(),
                };
            }
        }

        if position_of(&words, LIST_VERBS).is_some() {
            return Decision::Action {
                thought: Some("I need to list all todos.".to_string()),
                name: LIST_TODOS.to_string(),
                input: String::new(),
            };
        }

        Decision::Answer {
            thought: Some("I'm not sure what to do with this request.".to_string()),
            answer: format!(
                "I couldn't interpret the task \"{}\". Try asking me to add, delete, or list todos.",
                task.trim()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decide(task: &str) -> Decision {
        FallbackReasoner::new().decide(task, &History::new())
    }

    fn action(decision: &Decision) -> (&str, &str) {
        match decision {
            Decision::Action { name, input, .. } => (name.as_str(), input.as_str()),
            other => panic!("expected action, got {:?}", other),
        }
    }

    #[test]
    fn test_add_uses_remaining_text() {
        assert_eq!(action(&decide("add buy milk")), (ADD_TODO, "buy milk"));
        assert_eq!(
            action(&decide("Add a todo to buy groceries")),
            (ADD_TODO, "buy groceries")
        );
        assert_eq!(
            action(&decide("please create a task called Call Mom!")),
            (ADD_TODO, "Call Mom")
        );
    }

    #[test]
    fn test_add_without_title_uses_default() {
        assert_eq!(action(&decide("add")), (ADD_TODO, DEFAULT_TITLE));
    }

    #[test]
    fn test_add_wins_over_later_rules() {
        assert_eq!(
            action(&decide("add show tickets, then list")),
            (ADD_TODO, "show tickets then list")
        );
    }

    #[test]
    fn test_delete_needs_an_id() {
        assert_eq!(action(&decide("Delete todo with ID 1")), (DELETE_TODO, "1"));
        assert_eq!(action(&decide("remove #42 please")), (DELETE_TODO, "42"));
        // no ID, falls through to the list rule
        assert_eq!(
            action(&decide("remove the one I showed... show me the list")),
            (LIST_TODOS, "")
        );
    }

    #[test]
    fn test_list() {
        assert_eq!(action(&decide("Show me all the todos")), (LIST_TODOS, ""));
        assert_eq!(action(&decide("LIST")), (LIST_TODOS, ""));
    }

    #[test]
    fn test_unmatched_answers_directly() {
        match decide("what is the weather like?") {
            Decision::Answer { answer, .. } => assert!(answer.contains("couldn't interpret")),
            other => panic!("expected answer, got {:?}", other),
        }
        // keywords must be whole words
        assert!(matches!(decide("addition"), Decision::Answer { .. }));
    }

    #[test]
    fn test_answers_after_observation() {
        let mut history = History::new();
        history.push(StepKind::Thought, "I need to add a new todo item.");
        history.push(StepKind::Action, "add_todo[buy milk]");
        history.push(StepKind::Observation, "Successfully added todo: 'buy milk' with ID 3");

        match FallbackReasoner::new().decide("add buy milk", &history) {
            Decision::Answer { answer, .. } => {
                assert_eq!(answer, "Successfully added todo: 'buy milk' with ID 3")
            }
            other => panic!("expected answer, got {:?}", other),
        }
    }

    #[test]
    fn test_stall_note_is_not_a_tool_result() {
        let mut history = History::new();
        history.push(StepKind::Thought, "hmm");
        history.push(
            StepKind::Observation,
            "No action or answer was given. Respond with an Action or an Answer.",
        );

        let decision = FallbackReasoner::new().decide("add buy milk", &history);
        assert_eq!(action(&decision), (ADD_TODO, "buy milk"));
    }
}
