//! HTTP handlers for user story endpoints
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tokio_util::sync::CancellationToken;

use crate::application::{
    EndSessionCommand, EndSessionError, EndSessionHandler, GetSessionError, GetSessionHandler,
    GetSessionQuery, OrchestrationPipeline, ProcessMessageCommand, ProcessMessageError,
    ProcessMessageHandler, SessionLocks,
};
use crate::domain::user_story::ReviewedSource;
use crate::ports::SessionStore;

use super::dto::{ErrorResponse, SendMessageRequest, SendMessageResponse, SessionResponse};

/// Message returned when the chat message is blank.
pub const EMPTY_MESSAGE_ERROR: &str = "A mensagem não pode estar vazia";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct UserStoryAppState {
    pub pipeline: Arc<OrchestrationPipeline>,
    pub locks: SessionLocks,
    pub reviewed_source: ReviewedSource,
    /// Cancelled on server shutdown; each turn runs on a child token.
    pub shutdown: CancellationToken,
}

impl UserStoryAppState {
    pub fn new(pipeline: Arc<OrchestrationPipeline>) -> Self {
        Self {
            pipeline,
            locks: SessionLocks::new(),
            reviewed_source: ReviewedSource::default(),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_reviewed_source(mut self, source: ReviewedSource) -> Self {
        self.reviewed_source = source;
        self
    }

    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    fn store(&self) -> Arc<dyn SessionStore> {
        self.pipeline.store().clone()
    }

    pub fn process_message_handler(&self) -> ProcessMessageHandler {
        ProcessMessageHandler::new(self.pipeline.clone(), self.locks.clone())
            .with_reviewed_source(self.reviewed_source)
    }

    pub fn get_session_handler(&self) -> GetSessionHandler {
        GetSessionHandler::new(self.store())
    }

    pub fn end_session_handler(&self) -> EndSessionHandler {
        EndSessionHandler::new(self.store(), self.locks.clone())
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(message)))
}

fn session_not_found(id: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::not_found("Session", id)),
    )
}

fn internal(message: impl Into<String>) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal(message)),
    )
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// Send a chat message
///
/// POST /api/user-story/send
pub async fn send_message(
    State(app_state): State<UserStoryAppState>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected chat request body");
        bad_request(rejection.body_text())
    })?;

    if req.message.trim().is_empty() {
        return Err(bad_request(EMPTY_MESSAGE_ERROR));
    }

    let cmd = ProcessMessageCommand {
        message: req.message,
        session_id: req.session_id,
    };

    let cancel = app_state.shutdown.child_token();
    let handler = app_state.process_message_handler();
    let result = handler.handle(cmd, &cancel).await.map_err(|e| match e {
        ProcessMessageError::Validation(_) => bad_request(EMPTY_MESSAGE_ERROR),
    })?;

    Ok::<_, ApiError>((StatusCode::OK, Json(SendMessageResponse::from(result))))
}

/// Get a session transcript
///
/// GET /api/user-story/sessions/{session_id}
pub async fn get_session(
    State(app_state): State<UserStoryAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    let handler = app_state.get_session_handler();
    let view = handler
        .handle(GetSessionQuery {
            session_id: session_id.clone(),
        })
        .await
        .map_err(|e| match e {
            GetSessionError::NotFound(_) => session_not_found(&session_id),
            GetSessionError::Validation(err) => bad_request(err.to_string()),
            GetSessionError::Store(err) => {
                tracing::error!(session_id = %session_id, error = %err, "Session lookup failed");
                internal("Session store unavailable")
            }
        })?;

    Ok::<_, ApiError>((StatusCode::OK, Json(SessionResponse::from(view))))
}

/// End a session
///
/// DELETE /api/user-story/sessions/{session_id}
pub async fn end_session(
    State(app_state): State<UserStoryAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    let handler = app_state.end_session_handler();
    handler
        .handle(EndSessionCommand {
            session_id: session_id.clone(),
        })
        .await
        .map_err(|e| match e {
            EndSessionError::NotFound(_) => session_not_found(&session_id),
            EndSessionError::Validation(err) => bad_request(err.to_string()),
            EndSessionError::Store(err) => {
                tracing::error!(session_id = %session_id, error = %err, "Session removal failed");
                internal("Session store unavailable")
            }
        })?;

    Ok::<_, ApiError>(StatusCode::NO_CONTENT)
}
