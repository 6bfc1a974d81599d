//! Decision parser
//!
//! Turns one raw backend reply into a [`Decision`]. The grammar is
//! line-oriented: a line whose trimmed start is `Thought:`, `Action:` or
//! `Answer:` (any case) opens a tag; untagged lines continue the open tag.
//! Text before the first tag is ignored, and nothing after an `Answer:`
//! section is read.

use crate::core::{AgentError, Result};

/// Structured result of parsing one backend reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Reasoning with no action and no answer
    ThoughtOnly { thought: String },
    /// Call a tool
    Action {
        thought: Option<String>,
        name: String,
        input: String,
    },
    /// Finish with an answer
    Answer {
        thought: Option<String>,
        answer: String,
    },
}

impl Decision {
    /// The thought accompanying this decision, if any
    pub fn thought(&self) -> Option<&str> {
        match self {
            Decision::ThoughtOnly { thought } => Some(thought),
            Decision::Action { thought, .. } | Decision::Answer { thought, .. } => {
                thought.as_deref()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Thought,
    Action,
    Answer,
}

const TAGS: [(Tag, &str); 3] = [
    (Tag::Thought, "thought:"),
    (Tag::Action, "action:"),
    (Tag::Answer, "answer:"),
];

/// A tag and the lines belonging to it; `lines[0]` is the tag line's remainder
struct Section<'a> {
    tag: Tag,
    lines: Vec<&'a str>,
}

fn split_tag(line: &str) -> Option<(Tag, &str)> {
    let trimmed = line.trim_start();
    TAGS.iter().find_map(|&(tag, prefix)| {
        let head = trimmed.get(..prefix.len())?;
        if head.eq_ignore_ascii_case(prefix) {
            Some((tag, &trimmed[prefix.len()..]))
        } else {
            None
        }
    })
}

fn sections(raw: &str) -> Vec<Section<'_>> {
    let mut sections: Vec<Section<'_>> = Vec::new();

    for line in raw.lines() {
        match split_tag(line) {
            Some((tag, rest)) => {
                if sections.last().is_some_and(|s| s.tag == Tag::Answer) {
                    break;
                }
                sections.push(Section {
                    tag,
                    lines: vec![rest],
                });
            }
            None => {
                if let Some(section) = sections.last_mut() {
                    section.lines.push(line);
                }
            }
        }
    }

    sections
}

fn join_trimmed(lines: &[&str]) -> String {
    lines
        .iter()
        .map(|l| l.trim())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Parse `identifier[input]`, taking the first `[` and the last `]`.
///
/// The action normally sits on its tag line; if the bracket opened there is
/// not closed on that line, following lines are joined until one closes it.
pub fn parse_action(lines: &[&str]) -> Result<(String, String)> {
    let mut content = lines.first().copied().unwrap_or_default().trim().to_string();

    if let Some(open) = content.find('[') {
        if !content[open..].contains(']') {
            for line in lines.iter().skip(1) {
                content.push('\n');
                content.push_str(line.trim());
                if line.contains(']') {
                    break;
                }
            }
        }
    }

    let (open, close) = match (content.find('['), content.rfind(']')) {
        (Some(open), Some(close)) if open < close => (open, close),
        _ => {
            return Err(AgentError::malformed(format!(
                "action '{}' is not of the form tool_name[input]",
                content
            )))
        }
    };

    let name = content[..open].trim();
    let is_identifier = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !is_identifier {
        return Err(AgentError::malformed(format!(
            "'{}' is not a valid tool name",
            name
        )));
    }

    if !content[close + 1..].trim().is_empty() {
        return Err(AgentError::malformed(format!(
            "unexpected text after action input in '{}'",
            content
        )));
    }

    Ok((name.to_string(), content[open + 1..close].trim().to_string()))
}

/// Parse a backend reply into a decision.
///
/// `Answer:` wins over `Action:` when both are present.
pub fn parse_decision(raw: &str) -> Result<Decision> {
    let sections = sections(raw);

    let thought = sections
        .iter()
        .find(|s| s.tag == Tag::Thought)
        .map(|s| join_trimmed(&s.lines))
        .filter(|t| !t.is_empty());

    if let Some(section) = sections.iter().find(|s| s.tag == Tag::Answer) {
        let answer = join_trimmed(&section.lines);
        if answer.is_empty() {
            return Err(AgentError::malformed("empty answer"));
        }
        return Ok(Decision::Answer { thought, answer });
    }

    if let Some(section) = sections.iter().find(|s| s.tag == Tag::Action) {
        let (name, input) = parse_action(&section.lines)?;
        return Ok(Decision::Action {
            thought,
            name,
            input,
        });
    }

    match thought {
        Some(thought) => Ok(Decision::ThoughtOnly { thought }),
        None => Err(AgentError::malformed(
            "no Thought, Action, or Answer tag found",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thought_and_action() {
        let decision = parse_decision("Thought: x\nAction: add_todo[buy milk]").unwrap();
        assert_eq!(
            decision,
            Decision::Action {
                thought: Some("x".to_string()),
                name: "add_todo".to_string(),
                input: "buy milk".to_string(),
            }
        );
    }

    #[test]
    fn test_nested_brackets_use_last_close() {
        let decision = parse_decision("Action: add_todo[a[nested]b]").unwrap();
        match decision {
            Decision::Action { name, input, .. } => {
                assert_eq!(name, "add_todo");
                assert_eq!(input, "a[nested]b");
            }
            other => panic!("expected action, got {:?}", other),
        }
    }

    #[test]
    fn test_answer_takes_precedence_over_action() {
        let decision = parse_decision("Action: foo[bar]\nAnswer: done").unwrap();
        assert_eq!(
            decision,
            Decision::Answer {
                thought: None,
                answer: "done".to_string(),
            }
        );
    }

    #[test]
    fn test_nothing_after_answer_is_read() {
        let decision =
            parse_decision("Thought: finished\nAnswer: all good\nAction: delete_todo[1]").unwrap();
        assert_eq!(
            decision,
            Decision::Answer {
                thought: Some("finished".to_string()),
                answer: "all good".to_string(),
            }
        );
    }

    #[test]
    fn test_no_tag_is_malformed() {
        let err = parse_decision("Sure! I will add that for you.").unwrap_err();
        assert!(matches!(err, AgentError::MalformedDecision(_)));
        assert!(parse_decision("").is_err());
    }

    #[test]
    fn test_bad_action_shape_is_malformed() {
        for raw in [
            "Action: add_todo buy milk",
            "Action: [buy milk]",
            "Action: add todo[buy milk]",
            "Action: add_todo]x[",
            "Action: add_todo[milk] and then some",
        ] {
            assert!(
                matches!(parse_decision(raw), Err(AgentError::MalformedDecision(_))),
                "{raw} should be malformed"
            );
        }
    }

    #[test]
    fn test_tags_case_insensitive_and_indented() {
        let decision = parse_decision("  THOUGHT: list first\n\taction: list_todos[]").unwrap();
        assert_eq!(
            decision,
            Decision::Action {
                thought: Some("list first".to_string()),
                name: "list_todos".to_string(),
                input: String::new(),
            }
        );
    }

    #[test]
    fn test_multiline_thought_and_preamble() {
        let raw = "Let me think.\nThought: the user wants milk\nso I add it\nAction: add_todo[milk]";
        let decision = parse_decision(raw).unwrap();
        assert_eq!(decision.thought(), Some("the user wants milk\nso I add it"));
    }

    #[test]
    fn test_action_input_spanning_lines() {
        let decision = parse_decision("Action: add_todo[first line\nsecond line]").unwrap();
        match decision {
            Decision::Action { input, .. } => assert_eq!(input, "first line\nsecond line"),
            other => panic!("expected action, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_chatter_after_action_line_ignored() {
        let decision =
            parse_decision("Thought: go\nAction: list_todos[]\nI will wait for results.").unwrap();
        assert!(matches!(decision, Decision::Action { ref name, .. } if name == "list_todos"));
    }

    #[test]
    fn test_thought_only() {
        let decision = parse_decision("Thought: hmm, not sure yet").unwrap();
        assert_eq!(
            decision,
            Decision::ThoughtOnly {
                thought: "hmm, not sure yet".to_string()
            }
        );
    }

    #[test]
    fn test_multiline_answer() {
        let decision = parse_decision("Answer: Current todos:\n○ [1] milk").unwrap();
        assert!(matches!(decision, Decision::Answer { ref answer, .. } if answer == "Current todos:\n○ [1] milk"));
    }

    #[test]
    fn test_empty_answer_is_malformed() {
        assert!(parse_decision("Answer:   ").is_err());
    }
}
