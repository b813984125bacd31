//! Catalog sync poller
//!
//! When several processes share one catalog file (a running server and the
//! `import` CLI, for instance) the server polls the file and reloads it when
//! another writer stored a newer version.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, trace};

use super::catalog::CatalogService;

pub struct CatalogSyncPoller {
    catalog: Arc<CatalogService>,
    poll_interval: Duration,
}

impl CatalogSyncPoller {
    pub fn new(catalog: Arc<CatalogService>, poll_interval: Duration) -> Self {
        Self {
            catalog,
            poll_interval,
        }
    }

    /// Run in the background until `shutdown` flips to true or its sender
    /// is dropped
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "Starting catalog sync poller (every {}ms)",
            self.poll_interval.as_millis()
        );

        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    trace!("Sync tick - checking catalog store");
                    if let Err(e) = self.catalog.sync_from_store().await {
                        error!("Failed to sync catalog from store: {}", e);
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Catalog sync poller stopped");
                        return;
                    }
                }
            }
        }
    }
}
