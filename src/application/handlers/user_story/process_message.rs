//! ProcessMessageHandler - the chat entry point.
//!
//! Validates the message, resolves the session id, runs one pipeline turn
//! under the session lock and derives the user story from the resulting
//! history. Pipeline failures never reach the caller: they are logged and
//! replaced by a fixed apology that still carries a usable session id.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::application::{OrchestrationPipeline, SessionLocks, TurnOutcome};
use crate::domain::foundation::{SessionId, ValidationError};
use crate::domain::user_story::{
    HeuristicExtractor, ResponseExtractor, ReviewedSource, UserStoryResult,
};

/// Reply sent when a turn could not be completed.
pub const APOLOGY_MESSAGE: &str =
    "Ocorreu um erro ao processar sua mensagem. Por favor, tente novamente.";

/// Reply sent when the PO-Expert answered with blank text.
pub const EMPTY_REPLY_MESSAGE: &str = "Não foi possível gerar uma resposta.";

/// Command to process one user message
#[derive(Debug, Clone)]
pub struct ProcessMessageCommand {
    pub message: String,
    /// Client-supplied session id. Absent or blank starts a new session.
    pub session_id: Option<String>,
}

impl ProcessMessageCommand {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            session_id: None,
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// Result of processing a message
#[derive(Debug, Clone)]
pub struct ProcessMessageResult {
    pub reply: String,
    pub session_id: SessionId,
    pub user_story: Option<UserStoryResult>,
}

/// Errors surfaced to the caller. Everything else becomes the apology reply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProcessMessageError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Handler composing session lookup, the agent pipeline and extraction.
pub struct ProcessMessageHandler {
    pipeline: Arc<OrchestrationPipeline>,
    locks: SessionLocks,
    extractor: Arc<dyn ResponseExtractor>,
    reviewed_source: ReviewedSource,
}

impl ProcessMessageHandler {
    pub fn new(pipeline: Arc<OrchestrationPipeline>, locks: SessionLocks) -> Self {
        Self {
            pipeline,
            locks,
            extractor: Arc::new(HeuristicExtractor::new()),
            reviewed_source: ReviewedSource::default(),
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn ResponseExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_reviewed_source(mut self, source: ReviewedSource) -> Self {
        self.reviewed_source = source;
        self
    }

    pub async fn handle(
        &self,
        cmd: ProcessMessageCommand,
        cancel: &CancellationToken,
    ) -> Result<ProcessMessageResult, ProcessMessageError> {
        if cmd.message.trim().is_empty() {
            return Err(ValidationError::empty_field("message").into());
        }

        let session_id = match cmd.session_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => SessionId::new(id)?,
            _ => SessionId::generate(),
        };

        let _guard = self.locks.acquire(&session_id).await;

        match self.pipeline.run_turn(&session_id, &cmd.message, cancel).await {
            Ok(outcome) => Ok(self.build_result(session_id, outcome)),
            Err(e) => {
                tracing::error!(
                    session_id = %session_id,
                    error = %e,
                    cancelled = e.is_cancelled(),
                    "Turn failed, replying with apology"
                );
                Ok(ProcessMessageResult {
                    reply: APOLOGY_MESSAGE.to_string(),
                    session_id,
                    user_story: None,
                })
            }
        }
    }

    fn build_result(&self, session_id: SessionId, outcome: TurnOutcome) -> ProcessMessageResult {
        let user_story = self.extractor.extract(&outcome.history).map(|story| {
            match self.reviewed_source {
                ReviewedSource::History => story,
                ReviewedSource::Verdict => story.with_reviewed(outcome.verdict.is_approved()),
            }
        });

        let reply = if outcome.reply.trim().is_empty() {
            EMPTY_REPLY_MESSAGE.to_string()
        } else {
            outcome.reply
        };

        ProcessMessageResult {
            reply,
            session_id,
            user_story,
        }
    }
}
