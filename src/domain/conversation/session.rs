//! Session snapshot.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, Timestamp};

use super::ConversationHistory;

/// A conversation as held by the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    history: ConversationHistory,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Session {
    /// Creates an empty session.
    pub fn new(id: SessionId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            history: ConversationHistory::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the history and bumps `updated_at`.
    pub fn replace_history(&mut self, history: ConversationHistory) {
        self.history = history;
        self.updated_at = Timestamp::now();
    }

    /// Marks the session as used without changing it.
    pub fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}
