//! In-Memory Session Store Adapter
//!
//! Keeps session histories in process memory. Sessions live until removed,
//! evicted for idleness by the sweeper, or pushed out by the session cap.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::conversation::{ConversationHistory, Session};
use crate::domain::foundation::{SessionId, Timestamp};
use crate::ports::{SessionStore, SessionStoreError};

/// Bounds applied to the in-memory store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionLimits {
    /// Sessions untouched for longer than this are evicted by the sweeper.
    pub idle_ttl: Option<Duration>,
    /// Admitting a session beyond this count evicts the least recently used one.
    pub max_sessions: Option<usize>,
}

/// In-memory storage for sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
    limits: SessionLimits,
}

impl InMemorySessionStore {
    /// Create an unbounded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with eviction limits
    pub fn with_limits(limits: SessionLimits) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            limits,
        }
    }

    pub fn limits(&self) -> SessionLimits {
        self.limits
    }

    /// Removes sessions idle for longer than the configured TTL.
    ///
    /// Returns the evicted ids. Does nothing when no TTL is configured.
    pub async fn evict_idle(&self) -> Vec<SessionId> {
        let Some(ttl) = self.limits.idle_ttl else {
            return Vec::new();
        };
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let cutoff = Timestamp::now().minus_secs(ttl_secs);
        self.evict_untouched_since(cutoff).await
    }

    /// Removes every session whose last update is before `cutoff`.
    pub async fn evict_untouched_since(&self, cutoff: Timestamp) -> Vec<SessionId> {
        let mut sessions = self.sessions.write().await;
        let expired: Vec<SessionId> = sessions
            .values()
            .filter(|s| s.updated_at().is_before(&cutoff))
            .map(|s| s.id().clone())
            .collect();

        for id in &expired {
            sessions.remove(id);
            tracing::info!(session_id = %id, "Session evicted after idle timeout");
        }
        expired
    }

    /// Evicts least recently used sessions until the cap holds, sparing `keep`.
    fn enforce_cap(&self, sessions: &mut HashMap<SessionId, Session>, keep: &SessionId) {
        let Some(max) = self.limits.max_sessions else {
            return;
        };
        while sessions.len() > max.max(1) {
            Self::evict_least_recent(sessions, keep);
        }
    }

    fn evict_least_recent(sessions: &mut HashMap<SessionId, Session>, keep: &SessionId) {
        let oldest = sessions
            .values()
            .filter(|s| s.id() != keep)
            .min_by_key(|s| s.updated_at())
            .map(|s| s.id().clone());

        if let Some(id) = oldest {
            sessions.remove(&id);
            tracing::info!(session_id = %id, "Session evicted to respect session cap");
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, id: &SessionId) -> Result<ConversationHistory, SessionStoreError> {
        if let Some(session) = self.sessions.read().await.get(id) {
            return Ok(session.history().clone());
        }

        let mut sessions = self.sessions.write().await;
        // Another request may have created it between the two locks.
        if let Some(session) = sessions.get_mut(id) {
            session.touch();
            return Ok(session.history().clone());
        }

        sessions.insert(id.clone(), Session::new(id.clone()));
        tracing::info!(session_id = %id, "Session created");
        self.enforce_cap(&mut sessions, id);

        Ok(ConversationHistory::new())
    }

    async fn load(&self, id: &SessionId) -> Result<Option<Session>, SessionStoreError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn save(&self, id: &SessionId, history: ConversationHistory) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(id) {
            session.replace_history(history);
            return Ok(());
        }

        // Evicted while its turn was running: the turn's result still wins,
        // but the cap applies as for a new session.
        let mut session = Session::new(id.clone());
        session.replace_history(history);
        sessions.insert(id.clone(), session);
        self.enforce_cap(&mut sessions, id);
        Ok(())
    }

    async fn exists(&self, id: &SessionId) -> Result<bool, SessionStoreError> {
        Ok(self.sessions.read().await.contains_key(id))
    }

    async fn remove(&self, id: &SessionId) -> Result<bool, SessionStoreError> {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            tracing::info!(session_id = %id, "Session removed");
        }
        Ok(removed)
    }

    async fn count(&self) -> Result<usize, SessionStoreError> {
        Ok(self.sessions.read().await.len())
    }
}
