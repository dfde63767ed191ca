//! HTTP adapters for the user story chat
//!
//! Exposes the chat endpoint and session transcript management.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{UserStoryAppState, EMPTY_MESSAGE_ERROR};
pub use routes::{chat_routes, session_routes};
