//! Health check adapters.
//!
//! - `LivenessCheck` - always healthy while the process can answer ("self")
//! - `SessionStoreCheck` - reports whether the session store answers

use async_trait::async_trait;
use std::sync::Arc;

use crate::ports::{HealthCheck, HealthCheckResult, SessionStore, LIVE_TAG};

/// Trivial check registered under the name `self`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LivenessCheck;

#[async_trait]
impl HealthCheck for LivenessCheck {
    fn name(&self) -> &str {
        "self"
    }

    fn tags(&self) -> &[&'static str] {
        &[LIVE_TAG]
    }

    async fn check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy("Process is running")
    }
}

/// Probes the session store by counting sessions.
pub struct SessionStoreCheck {
    store: Arc<dyn SessionStore>,
}

impl SessionStoreCheck {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl HealthCheck for SessionStoreCheck {
    fn name(&self) -> &str {
        "session_store"
    }

    async fn check(&self) -> HealthCheckResult {
        match self.store.count().await {
            Ok(count) => HealthCheckResult::healthy(format!("{} active sessions", count)),
            Err(e) => HealthCheckResult::unhealthy(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::foundation::SessionId;
    use crate::ports::HealthStatus;

    #[tokio::test]
    async fn liveness_is_always_healthy() {
        let check = LivenessCheck;
        assert_eq!(check.name(), "self");
        assert!(check.tags().contains(&LIVE_TAG));
        assert_eq!(check.check().await.status, HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn session_store_check_reports_count() {
        let store = Arc::new(InMemorySessionStore::new());
        store.get_or_create(&SessionId::generate()).await.unwrap();

        let result = SessionStoreCheck::new(store).check().await;
        assert_eq!(result.status, HealthStatus::Healthy);
        assert_eq!(result.description.as_deref(), Some("1 active sessions"));
    }
}
