use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::db::RateJournal;
use crate::external::rate_provider::RateProvider;

/// Background polling task: one fetch-and-append pass per tick, for the
/// process lifetime, until the cancellation token fires.
pub struct IngestService {
    provider: Arc<dyn RateProvider>,
    journal: Arc<dyn RateJournal>,
    interval: Duration,
}

impl IngestService {
    pub fn new(
        provider: Arc<dyn RateProvider>,
        journal: Arc<dyn RateJournal>,
        interval: Duration,
    ) -> Self {
        Self {
            provider,
            journal,
            interval,
        }
    }

    /// Runs until `cancel` fires. A cancellation that lands mid-poll lets
    /// the in-flight fetch and its appends finish before the loop returns;
    /// a poll that overruns the interval delays the next tick rather than
    /// overlapping it.
    pub async fn run(self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The interval yields immediately once; consume that tick so the
        // first poll fires one full period after startup.
        ticker.tick().await;

        info!("Rate ingestion started, polling every {:?}", self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => self.poll_once().await,
                _ = cancel.cancelled() => {
                    info!("Rate ingestion stopped");
                    return;
                }
            }
        }
    }

    async fn poll_once(&self) {
        let rates = match self.provider.fetch_rates().await {
            Ok(rates) => rates,
            Err(e) => {
                // The next scheduled tick is the retry.
                warn!("Rate fetch failed: {}", e);
                return;
            }
        };

        let total = rates.len();
        let mut stored = 0usize;
        for rate in &rates {
            match self.journal.append(rate).await {
                Ok(()) => stored += 1,
                Err(e) => error!("Failed to append rate for {}: {}", rate.title, e),
            }
        }

        info!("Poll complete: stored {}/{} rates", stored, total);
    }
}
