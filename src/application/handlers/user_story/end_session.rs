//! EndSessionHandler - Drop a session and its history

use std::sync::Arc;

use crate::application::SessionLocks;
use crate::domain::foundation::{SessionId, ValidationError};
use crate::ports::{SessionStore, SessionStoreError};

/// Command to end a session
#[derive(Debug, Clone)]
pub struct EndSessionCommand {
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EndSessionError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

pub struct EndSessionHandler {
    store: Arc<dyn SessionStore>,
    locks: SessionLocks,
}

impl EndSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>, locks: SessionLocks) -> Self {
        Self { store, locks }
    }

    /// Removes the session once any in-flight turn on it has finished.
    pub async fn handle(&self, cmd: EndSessionCommand) -> Result<(), EndSessionError> {
        let id = SessionId::new(cmd.session_id)?;
        let _guard = self.locks.acquire(&id).await;

        if self.store.remove(&id).await? {
            Ok(())
        } else {
            Err(EndSessionError::NotFound(id))
        }
    }
}
