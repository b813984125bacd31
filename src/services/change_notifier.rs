//! Catalog change notification
//!
//! Every catalog mutation bumps a millisecond version stamp and broadcasts a
//! [`CatalogEvent`] to subscribers (web clients polling the version, the sync
//! loop, tests).

use chrono::Utc;
use serde::Serialize;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::broadcast;
use tracing::debug;

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CatalogEvent {
    ChannelsUpdated { version: i64 },
}

impl CatalogEvent {
    pub fn version(&self) -> i64 {
        match self {
            CatalogEvent::ChannelsUpdated { version } => *version,
        }
    }
}

pub struct ChangeNotifier {
    sender: broadcast::Sender<CatalogEvent>,
    version: AtomicI64,
}

impl ChangeNotifier {
    pub fn new(initial_version: i64) -> Self {
        let (sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            sender,
            version: AtomicI64::new(initial_version),
        }
    }

    /// Stamp a new version and broadcast it. Returns the new version.
    pub fn notify(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let previous = self
            .version
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                Some(now.max(current + 1))
            })
            .unwrap_or_else(|current| current);
        let version = now.max(previous + 1);

        // No subscribers is fine
        let receivers = self
            .sender
            .send(CatalogEvent::ChannelsUpdated { version })
            .unwrap_or(0);
        debug!("Catalog version {} sent to {} subscribers", version, receivers);
        version
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.sender.subscribe()
    }

    pub fn version(&self) -> i64 {
        self.version.load(Ordering::SeqCst)
    }

    /// Query parameter appended to catalog URLs so clients skip stale caches
    pub fn version_param(&self) -> String {
        format!("v={}", self.version())
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions_strictly_increase() {
        let notifier = ChangeNotifier::new(0);
        let mut last = notifier.version();
        for _ in 0..100 {
            let next = notifier.notify();
            assert!(next > last);
            assert_eq!(notifier.version(), next);
            last = next;
        }
    }

    #[test]
    fn test_future_initial_version_still_increases() {
        let far_future = Utc::now().timestamp_millis() + 60_000;
        let notifier = ChangeNotifier::new(far_future);
        assert_eq!(notifier.notify(), far_future + 1);
    }

    #[tokio::test]
    async fn test_subscribers_receive_event() {
        let notifier = ChangeNotifier::default();
        let mut rx = notifier.subscribe();
        let version = notifier.notify();
        assert_eq!(
            rx.recv().await.unwrap(),
            CatalogEvent::ChannelsUpdated { version }
        );
    }

    #[test]
    fn test_version_param() {
        let notifier = ChangeNotifier::new(42);
        assert_eq!(notifier.version_param(), "v=42");
    }
}
