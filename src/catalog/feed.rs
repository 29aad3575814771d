//! Live catalog feed
//!
//! Publishes a new `Arc<CatalogSnapshot>` whenever the source revision moves.
//! Readers grab the current snapshot and compute against it; nothing is
//! mutated in place.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::snapshot::CatalogSnapshot;
use super::source::{CatalogError, CatalogSource};

pub struct CatalogFeed {
    sender: watch::Sender<Arc<CatalogSnapshot>>,
}

impl CatalogFeed {
    pub fn new(initial: CatalogSnapshot) -> Self {
        let (sender, _receiver) = watch::channel(Arc::new(initial));
        Self { sender }
    }

    /// The latest published snapshot
    pub fn current(&self) -> Arc<CatalogSnapshot> {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<CatalogSnapshot>> {
        self.sender.subscribe()
    }

    /// Publish a snapshot unless it carries the revision already published
    pub fn publish(&self, snapshot: CatalogSnapshot) -> bool {
        if snapshot.revision == self.current().revision {
            return false;
        }
        tracing::info!(
            revision = snapshot.revision,
            recipes = snapshot.recipes.len(),
            ingredients = snapshot.ingredients.len(),
            suggestions = snapshot.suggestions.len(),
            "Publishing catalog snapshot"
        );
        self.sender.send_replace(Arc::new(snapshot));
        true
    }

    /// Reload from the source if its revision changed; returns whether a snapshot was published
    pub async fn refresh(&self, source: &dyn CatalogSource) -> Result<bool, CatalogError> {
        let revision = source.revision().await?;
        if revision == self.current().revision {
            return Ok(false);
        }
        let snapshot = source.load().await?;
        Ok(self.publish(snapshot))
    }

    /// Poll the source every `interval`; the task runs until aborted
    pub fn spawn_refresh_loop(
        self: Arc<Self>,
        source: Arc<dyn CatalogSource>,
        interval: Duration,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(e) = self.refresh(source.as_ref()).await {
                    tracing::warn!("Catalog refresh failed: {}", e);
                }
            }
        })
    }
}
