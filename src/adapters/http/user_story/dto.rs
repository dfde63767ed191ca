//! HTTP DTOs for user story endpoints
//!
//! These types decouple the HTTP API from domain types. All fields are
//! camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::application::{ProcessMessageResult, SessionView};
use crate::domain::conversation::Message;
use crate::domain::user_story::{TaskItem, UserStoryResult};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to send a chat message
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    /// Missing is treated like empty and rejected with 400.
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for a chat message
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub message: String,
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_story: Option<UserStoryDto>,
}

impl From<ProcessMessageResult> for SendMessageResponse {
    fn from(result: ProcessMessageResult) -> Self {
        Self {
            message: result.reply,
            session_id: result.session_id.to_string(),
            user_story: result.user_story.map(UserStoryDto::from),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStoryDto {
    pub story_text: String,
    pub acceptance_criteria: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_tasks: Option<Vec<TaskItemDto>>,
    pub reviewed: bool,
}

impl From<UserStoryResult> for UserStoryDto {
    fn from(story: UserStoryResult) -> Self {
        Self {
            story_text: story.story_text,
            acceptance_criteria: story.acceptance_criteria,
            suggested_tasks: story
                .suggested_tasks
                .map(|tasks| tasks.into_iter().map(TaskItemDto::from).collect()),
            reviewed: story.reviewed,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskItemDto {
    pub discipline: String,
    pub task: String,
    pub effort_hours: String,
}

impl From<TaskItem> for TaskItemDto {
    fn from(item: TaskItem) -> Self {
        Self {
            discipline: item.discipline,
            task: item.task,
            effort_hours: item.effort_hours,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub role: String,
    pub content: String,
    pub timestamp: String,
}

impl From<&Message> for MessageDto {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role().as_str().to_string(),
            content: message.content().to_string(),
            timestamp: message.timestamp().to_string(),
        }
    }
}

/// Response for reading a session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
    pub messages: Vec<MessageDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_story: Option<UserStoryDto>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<SessionView> for SessionResponse {
    fn from(view: SessionView) -> Self {
        Self {
            session_id: view.session_id.to_string(),
            messages: view.history.iter().map(MessageDto::from).collect(),
            user_story: view.user_story.map(UserStoryDto::from),
            created_at: view.created_at.to_string(),
            updated_at: view.updated_at.to_string(),
        }
    }
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}
