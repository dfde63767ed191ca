//! Structured artifacts recovered from a conversation.

use serde::{Deserialize, Serialize};

/// One row of the suggested task table. All fields are free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    pub discipline: String,
    pub task: String,
    pub effort_hours: String,
}

impl TaskItem {
    pub fn new(
        discipline: impl Into<String>,
        task: impl Into<String>,
        effort_hours: impl Into<String>,
    ) -> Self {
        Self {
            discipline: discipline.into(),
            task: task.into(),
            effort_hours: effort_hours.into(),
        }
    }
}

/// The user story as currently visible in a session's history.
///
/// Always recomputed from history, never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStoryResult {
    /// Full text of the assistant message that carried the story.
    pub story_text: String,
    /// Acceptance criteria lines in their original order.
    pub acceptance_criteria: Vec<String>,
    /// Present only when some assistant message carried a task table.
    pub suggested_tasks: Option<Vec<TaskItem>>,
    pub reviewed: bool,
}

impl UserStoryResult {
    pub fn new(story_text: impl Into<String>) -> Self {
        Self {
            story_text: story_text.into(),
            acceptance_criteria: Vec::new(),
            suggested_tasks: None,
            reviewed: false,
        }
    }

    /// Replaces the reviewed flag.
    pub fn with_reviewed(mut self, reviewed: bool) -> Self {
        self.reviewed = reviewed;
        self
    }

    pub fn has_tasks(&self) -> bool {
        self.suggested_tasks.as_ref().is_some_and(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_result_has_no_extras() {
        let result = UserStoryResult::new("Como PO, eu quero X, para Y");
        assert!(result.acceptance_criteria.is_empty());
        assert!(result.suggested_tasks.is_none());
        assert!(!result.reviewed);
        assert!(!result.has_tasks());
    }

    #[test]
    fn with_reviewed_overrides_flag() {
        let result = UserStoryResult::new("s").with_reviewed(true);
        assert!(result.reviewed);
    }
}
