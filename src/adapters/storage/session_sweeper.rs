//! Background sweeper that evicts idle sessions.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::InMemorySessionStore;

/// Periodically evicts sessions idle beyond the store's TTL.
pub struct SessionSweeper {
    store: Arc<InMemorySessionStore>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl SessionSweeper {
    #[must_use]
    pub fn new(store: Arc<InMemorySessionStore>, interval: Duration, shutdown: CancellationToken) -> Self {
        Self {
            store,
            interval,
            shutdown,
        }
    }

    /// Spawn the sweep loop as a tokio task.
    #[must_use]
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    async fn run(&self) {
        if self.store.limits().idle_ttl.is_none() {
            info!("Session expiry disabled, sweeper not started");
            return;
        }

        info!(interval = ?self.interval, "Starting session sweeper");

        loop {
            tokio::select! {
                () = tokio::time::sleep(self.interval) => {
                    let evicted = self.store.evict_idle().await;
                    if evicted.is_empty() {
                        debug!("Session sweep found nothing to evict");
                    } else {
                        info!(evicted = evicted.len(), "Session sweep completed");
                    }
                }
                () = self.shutdown.cancelled() => {
                    info!("Session sweeper shutting down");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::SessionLimits;
    use crate::domain::foundation::SessionId;
    use crate::ports::SessionStore;

    #[tokio::test]
    async fn sweeper_evicts_expired_sessions() {
        let store = Arc::new(InMemorySessionStore::with_limits(SessionLimits {
            idle_ttl: Some(Duration::ZERO),
            max_sessions: None,
        }));
        store.get_or_create(&SessionId::generate()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;

        let shutdown = CancellationToken::new();
        let handle = SessionSweeper::new(store.clone(), Duration::from_millis(10), shutdown.clone()).spawn();

        tokio::time::sleep(Duration::from_millis(100)).await;
        shutdown.cancel();
        handle.await.unwrap();

        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn sweeper_exits_immediately_without_ttl() {
        let store = Arc::new(InMemorySessionStore::new());
        let handle = SessionSweeper::new(store, Duration::from_millis(10), CancellationToken::new()).spawn();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper should return")
            .unwrap();
    }

    #[tokio::test]
    async fn sweeper_stops_on_shutdown() {
        let store = Arc::new(InMemorySessionStore::with_limits(SessionLimits {
            idle_ttl: Some(Duration::from_secs(3600)),
            max_sessions: None,
        }));
        let shutdown = CancellationToken::new();
        let handle = SessionSweeper::new(store, Duration::from_secs(3600), shutdown.clone()).spawn();

        shutdown.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper should stop")
            .unwrap();
    }
}
