//! Background purge of elapsed holds
//!
//! Expiry is always enforced lazily at access time. The sweeper only keeps
//! memory bounded when nobody touches a conference for a while.

use super::memory::MemoryStorage;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Handle to a running sweeper task
#[derive(Debug)]
pub struct SweeperHandle {
    shutdown_tx: broadcast::Sender<()>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stop the sweeper and wait for it to exit
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        match tokio::time::timeout(Duration::from_secs(5), self.task).await {
            Ok(Ok(())) => info!("sweeper stopped"),
            Ok(Err(e)) => warn!(error = %e, "sweeper task failed"),
            Err(_) => warn!("sweeper shutdown timed out"),
        }
    }
}

/// Spawn a task calling `purge_expired` every `period`
///
/// Must be called from within a tokio runtime.
pub fn spawn_sweeper(storage: Arc<MemoryStorage>, period: Duration) -> SweeperHandle {
    let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        info!(period_ms = period.as_millis(), "sweeper started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let purged = storage.purge_expired();
                    debug!(purged, "sweep finished");
                }
                _ = shutdown_rx.recv() => break,
            }
        }
    });

    SweeperHandle { shutdown_tx, task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestEngine;
    use chrono::TimeDelta;

    #[tokio::test]
    async fn test_sweeper_purges_without_access() {
        let t = TestEngine::with_capacity(5);
        let alice = t.user("alice@example.com");
        t.storage.create_reservation(&alice, &t.conf, 2).unwrap();
        assert_eq!(t.storage.stored_reservations(), 1);

        let handle = spawn_sweeper(t.storage.clone(), Duration::from_millis(10));
        t.clock.advance(TimeDelta::seconds(16));

        for _ in 0..100 {
            if t.storage.stored_reservations() == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(t.storage.stored_reservations(), 0);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_sweeper_leaves_active_holds() {
        let t = TestEngine::with_capacity(5);
        let alice = t.user("alice@example.com");
        t.storage.create_reservation(&alice, &t.conf, 2).unwrap();

        let handle = spawn_sweeper(t.storage.clone(), Duration::from_millis(5));
        tokio::time::sleep(Duration::from_millis(30)).await;
        handle.shutdown().await;

        assert_eq!(t.storage.stored_reservations(), 1);
    }
}
