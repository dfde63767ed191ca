//! Per-session turn serialization.
//!
//! Two turns on the same session would otherwise both read the stored history,
//! run their agents, and the later save would drop the earlier turn. Each
//! session id maps to its own async mutex; different ids never contend.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::SessionId;

/// Keyed lock table.
#[derive(Debug, Clone, Default)]
pub struct SessionLocks {
    locks: Arc<DashMap<SessionId, Arc<Mutex<()>>>>,
}

/// Held for the duration of a turn. Dropping it releases the session and
/// frees the table entry when nobody else is waiting on it.
pub struct SessionGuard {
    id: SessionId,
    locks: Arc<DashMap<SessionId, Arc<Mutex<()>>>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other turn holds `id`.
    pub async fn acquire(&self, id: &SessionId) -> SessionGuard {
        let mutex = self
            .locks
            .entry(id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let guard = mutex.lock_owned().await;

        SessionGuard {
            id: id.clone(),
            locks: self.locks.clone(),
            guard: Some(guard),
        }
    }

    /// Number of sessions with a live lock entry.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        // Release the mutex first so its Arc is only held by the table
        // and by any waiters.
        self.guard.take();
        self.locks
            .remove_if(&self.id, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn sid(s: &str) -> SessionId {
        SessionId::new(s).unwrap()
    }

    #[tokio::test]
    async fn entry_is_removed_after_release() {
        let locks = SessionLocks::new();
        {
            let _guard = locks.acquire(&sid("a")).await;
            assert_eq!(locks.len(), 1);
        }
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn same_session_is_serialized() {
        let locks = SessionLocks::new();
        let active = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let locks = locks.clone();
                let active = active.clone();
                let max_seen = max_seen.clone();
                tokio::spawn(async move {
                    let _guard = locks.acquire(&sid("same")).await;
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    max_seen.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    active.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();
        for h in handles {
            h.await.unwrap();
        }

        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn distinct_sessions_do_not_block() {
        let locks = SessionLocks::new();
        let _a = locks.acquire(&sid("a")).await;

        let b = tokio::time::timeout(Duration::from_millis(100), locks.acquire(&sid("b"))).await;
        assert!(b.is_ok());
    }

    #[tokio::test]
    async fn waiter_keeps_entry_alive() {
        let locks = SessionLocks::new();
        let first = locks.acquire(&sid("a")).await;

        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _g = locks.acquire(&sid("a")).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(first);
        // The waiter still holds the mutex Arc, so the entry survived.
        waiter.await.unwrap();
        assert!(locks.is_empty());
    }
}
