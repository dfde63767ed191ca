//! GetSessionHandler - Read a session's transcript and derived story

use std::sync::Arc;

use crate::domain::conversation::ConversationHistory;
use crate::domain::foundation::{SessionId, Timestamp, ValidationError};
use crate::domain::user_story::{HeuristicExtractor, ResponseExtractor, UserStoryResult};
use crate::ports::{SessionStore, SessionStoreError};

/// Query for one session
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: String,
}

/// Snapshot of a session
#[derive(Debug, Clone)]
pub struct SessionView {
    pub session_id: SessionId,
    pub history: ConversationHistory,
    pub user_story: Option<UserStoryResult>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GetSessionError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

pub struct GetSessionHandler {
    store: Arc<dyn SessionStore>,
    extractor: Arc<dyn ResponseExtractor>,
}

impl GetSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            extractor: Arc::new(HeuristicExtractor::new()),
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn ResponseExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<SessionView, GetSessionError> {
        let id = SessionId::new(query.session_id)?;

        let session = self
            .store
            .load(&id)
            .await?
            .ok_or_else(|| GetSessionError::NotFound(id.clone()))?;

        Ok(SessionView {
            user_story: self.extractor.extract(session.history()),
            session_id: id,
            history: session.history().clone(),
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        })
    }
}
