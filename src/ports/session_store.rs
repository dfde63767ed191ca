//! Session Store Port - Interface for keeping conversation histories.
//!
//! The store is the only shared mutable state in the service. Operations on
//! distinct session ids must not block each other; operations on the same id
//! are linearizable.

use async_trait::async_trait;

use crate::domain::conversation::{ConversationHistory, Session};
use crate::domain::foundation::SessionId;

/// Errors that can occur during session store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}

/// Port for storing and loading session histories
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the history for `id`, creating an empty session atomically
    /// when none exists.
    async fn get_or_create(&self, id: &SessionId) -> Result<ConversationHistory, SessionStoreError>;

    /// Returns a snapshot of the session, or `None` if unknown.
    async fn load(&self, id: &SessionId) -> Result<Option<Session>, SessionStoreError>;

    /// Overwrites the stored history. Saving the same history twice is a no-op
    /// apart from the updated timestamp.
    async fn save(&self, id: &SessionId, history: ConversationHistory) -> Result<(), SessionStoreError>;

    /// Check if a session exists
    async fn exists(&self, id: &SessionId) -> Result<bool, SessionStoreError>;

    /// Deletes a session.
    ///
    /// # Returns
    /// `false` if no session existed for `id`
    async fn remove(&self, id: &SessionId) -> Result<bool, SessionStoreError>;

    /// Number of live sessions.
    async fn count(&self) -> Result<usize, SessionStoreError>;
}
