//! Route definitions for user story endpoints

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{end_session, get_session, send_message, UserStoryAppState};

/// Chat route. A turn is bounded by the pipeline's per-step deadlines, so
/// this route is kept out of the HTTP request timeout.
///
/// - `POST /api/user-story/send` - Send a chat message
pub fn chat_routes() -> Router<UserStoryAppState> {
    Router::new().route("/api/user-story/send", post(send_message))
}

/// Session transcript routes
///
/// - `GET /api/user-story/sessions/{session_id}` - Read a session transcript
/// - `DELETE /api/user-story/sessions/{session_id}` - End a session
pub fn session_routes() -> Router<UserStoryAppState> {
    Router::new().route(
        "/api/user-story/sessions/:session_id",
        get(get_session).delete(end_session),
    )
}
