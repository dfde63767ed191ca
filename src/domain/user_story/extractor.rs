//! Heuristic extraction of the user story from free-form model output.
//!
//! The PO-Expert and TaskOverview agents answer in prose, so the story,
//! its acceptance criteria and the task table are recovered by looking for
//! fixed marker strings. Extraction never fails: a missing marker simply
//! leaves the corresponding field out.

use crate::domain::conversation::{ConversationHistory, Message};

use super::{TaskItem, UserStoryResult};

/// Markers that must all appear in an assistant message carrying a story.
pub const STORY_MARKERS: [&str; 3] = ["Como ", ", eu quero ", " para "];

/// Heading that introduces the acceptance criteria block.
pub const CRITERIA_HEADING: &str = "Critérios de Aceitação:";

/// Column names that identify a task table.
pub const TASK_TABLE_MARKERS: [&str; 3] = ["Discipline", "Task", "Effort"];

/// Literal token that marks the story as reviewed.
pub const REVIEWED_TOKEN: &str = "TRUE";

/// Turns a conversation history into an optional structured result.
///
/// Implementations must be pure: the same history always yields the same
/// result.
pub trait ResponseExtractor: Send + Sync {
    fn extract(&self, history: &ConversationHistory) -> Option<UserStoryResult>;
}

/// Marker-based extractor for Portuguese story output.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicExtractor;

impl HeuristicExtractor {
    pub fn new() -> Self {
        Self
    }

    fn is_story(message: &Message) -> bool {
        message.is_assistant() && STORY_MARKERS.iter().all(|m| message.content().contains(m))
    }

    fn is_task_table(message: &Message) -> bool {
        message.is_assistant()
            && TASK_TABLE_MARKERS
                .iter()
                .all(|m| message.content().contains(m))
    }

    fn is_reviewed(history: &ConversationHistory) -> bool {
        history.iter().any(|m| m.content().contains(REVIEWED_TOKEN))
    }

    fn acceptance_criteria(history: &ConversationHistory) -> Vec<String> {
        let Some(message) = history
            .iter()
            .rev()
            .find(|m| m.is_assistant() && m.content().contains(CRITERIA_HEADING))
        else {
            return Vec::new();
        };

        parse_criteria(message.content())
    }

    fn suggested_tasks(history: &ConversationHistory) -> Option<Vec<TaskItem>> {
        history
            .iter()
            .rev()
            .find(|m| Self::is_task_table(m))
            .map(|m| parse_task_table(m.content()))
    }
}

impl ResponseExtractor for HeuristicExtractor {
    fn extract(&self, history: &ConversationHistory) -> Option<UserStoryResult> {
        let story = history.iter().rev().find(|m| Self::is_story(m))?;

        Some(UserStoryResult {
            acceptance_criteria: Self::acceptance_criteria(history),
            suggested_tasks: Self::suggested_tasks(history),
            reviewed: Self::is_reviewed(history),
            ..UserStoryResult::new(story.content())
        })
    }
}

/// Lines following the criteria heading, trimmed, blanks and the bare
/// heading removed. Order and duplicates are preserved.
pub fn parse_criteria(text: &str) -> Vec<String> {
    let Some(start) = text.find(CRITERIA_HEADING) else {
        return Vec::new();
    };
    let heading = CRITERIA_HEADING.to_lowercase();

    text[start..]
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.to_lowercase() != heading)
        .map(str::to_string)
        .collect()
}

/// Rows of a pipe-delimited table. The header row (any line mentioning
/// `Discipline`) is skipped, as are rows with fewer than three non-empty
/// cells. Cells past the third are ignored.
pub fn parse_task_table(text: &str) -> Vec<TaskItem> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty() && !line.contains("Discipline") && line.contains('|'))
        .filter_map(|line| {
            let cells: Vec<&str> = line
                .split('|')
                .map(str::trim)
                .filter(|cell| !cell.is_empty())
                .collect();
            match cells.as_slice() {
                [discipline, task, effort, ..] => Some(TaskItem::new(*discipline, *task, *effort)),
                _ => None,
            }
        })
        .collect()
}
