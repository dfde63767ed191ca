//! User story artifacts and their extraction from conversation history.

mod extractor;
mod result;
mod reviewed;

pub use extractor::{
    parse_criteria, parse_task_table, HeuristicExtractor, ResponseExtractor, CRITERIA_HEADING,
    REVIEWED_TOKEN, STORY_MARKERS, TASK_TABLE_MARKERS,
};
pub use result::{TaskItem, UserStoryResult};
pub use reviewed::ReviewedSource;
