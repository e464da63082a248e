//! Periodic purge of expired sessions.
//!
//! Validation already treats expired sessions as absent. The reaper only
//! keeps the table from growing.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::error::AuthError;

use super::manager::SessionManager;

/// Background reaper for expired sessions.
#[derive(Debug, Clone)]
pub struct SessionCleanup {
    manager: Arc<SessionManager>,
    interval: Duration,
}

impl SessionCleanup {
    /// Creates a reaper that runs every `interval`.
    pub fn new(manager: Arc<SessionManager>, interval: Duration) -> Self {
        Self { manager, interval }
    }

    /// Runs one cleanup cycle and returns the number of sessions removed.
    pub async fn run_cleanup(&self) -> Result<u64, AuthError> {
        let purged = self.manager.purge_expired().await?;
        if purged > 0 {
            info!(purged, "Expired sessions purged");
        } else {
            debug!("No expired sessions to purge");
        }
        Ok(purged)
    }

    /// Run until `cancel` flips to `true` or its sender is dropped.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        info!(interval_secs = self.interval.as_secs(), "Session cleanup started");

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.run_cleanup().await {
                        error!(error = %e, "Session cleanup failed");
                    }
                }
            }
        }

        info!("Session cleanup stopped");
    }

    /// Spawn [`run`](Self::run) on the Tokio runtime.
    pub fn spawn(self, cancel: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(cancel).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use gatehouse_core::config::SessionConfig;
    use gatehouse_core::traits::ManualClock;
    use gatehouse_entity::session::ClientMetadata;
    use gatehouse_entity::user::{CreateUser, UserRole};

    use crate::store::{MemoryStore, UserWriter};

    async fn setup() -> (MemoryStore, Arc<ManualClock>, Arc<SessionManager>) {
        let store = MemoryStore::new();
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let manager = Arc::new(SessionManager::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            clock.clone(),
            &SessionConfig::default(),
        )
        .unwrap());
        let user = store
            .create(&CreateUser {
                email: "a@x.com".to_string(),
                username: "a".to_string(),
                first_name: "A".to_string(),
                last_name: "X".to_string(),
                password_hash: "hash".to_string(),
                role: UserRole::User,
            })
            .await
            .unwrap();
        manager
            .create(user.id, &ClientMetadata::default())
            .await
            .unwrap();
        (store, clock, manager)
    }

    #[tokio::test]
    async fn test_run_cleanup_removes_only_expired() {
        let (store, clock, manager) = setup().await;
        let cleanup = SessionCleanup::new(manager, Duration::from_secs(60));

        assert_eq!(cleanup.run_cleanup().await.unwrap(), 0);
        assert_eq!(store.session_count().await, 1);

        clock.advance(chrono::Duration::hours(24));
        assert_eq!(cleanup.run_cleanup().await.unwrap(), 1);
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_spawned_reaper_stops_on_cancel() {
        let (store, clock, manager) = setup().await;
        clock.advance(chrono::Duration::hours(48));

        let (tx, rx) = watch::channel(false);
        let handle = SessionCleanup::new(manager, Duration::from_millis(10)).spawn(rx);

        // The first tick fires immediately.
        for _ in 0..100 {
            if store.session_count().await == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(store.session_count().await, 0);

        tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
