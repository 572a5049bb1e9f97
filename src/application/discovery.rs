//! Discovery Monitor
//!
//! The polling loop tying the pipeline together: fetch the boosted feed,
//! look up the best pool for each unseen token, filter, score, and alert.
//! Per-token processing is isolated; one bad token never aborts a cycle, and
//! no error in here is fatal to the process.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock, Semaphore};
use tokio::task::JoinSet;

use crate::adapters::dexscreener::{DexClient, MarketDataError};
use crate::domain::alert::{format_alert, format_new_listing};
use crate::domain::feeds::BoostedTokenRef;
use crate::domain::filter::{RejectReason, TokenFilter, Verdict};
use crate::domain::scoring::PotentialScorer;
use crate::domain::seen::{Feed, SeenTokenTracker};
use crate::domain::snapshot::{select_best_pool, PoolSnapshot};
use crate::ports::notifier::Notifier;

/// Discovery loop configuration
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Seconds slept between cycles; cycle duration adds on top, no drift
    /// correction
    pub poll_interval_secs: u64,
    /// Minimum score required to trigger an alert
    pub score_threshold: f64,
    /// Also announce every new latest-listings profile
    pub announce_new_listings: bool,
    /// Concurrent pool lookups per cycle; 1 = strictly sequential
    pub max_concurrent_lookups: usize,
    /// Per-feed capacity of the seen-token tracker
    pub seen_capacity: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 60,
            score_threshold: 10.0,
            announce_new_listings: false,
            max_concurrent_lookups: 1,
            seen_capacity: SeenTokenTracker::DEFAULT_CAPACITY,
        }
    }
}

/// Outcome of assessing one token's pools
#[derive(Debug, Clone)]
pub enum Assessment {
    /// No pools returned for the token
    NoPools,
    /// Best pool failed the filter
    Rejected { reason: RejectReason },
    /// Passed the filter but scored under the alert threshold
    BelowThreshold { score: f64 },
    /// Filter passed and the score cleared the threshold
    Promising { score: f64, message: String },
}

/// Polling orchestrator over the discovery feeds
pub struct DiscoveryMonitor {
    config: MonitorConfig,
    client: DexClient,
    filter: TokenFilter,
    scorer: PotentialScorer,
    notifier: Arc<dyn Notifier>,
    seen: Mutex<SeenTokenTracker>,
    shutdown_requested: Arc<RwLock<bool>>,
}

impl DiscoveryMonitor {
    pub fn new(
        config: MonitorConfig,
        client: DexClient,
        filter: TokenFilter,
        scorer: PotentialScorer,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let seen = SeenTokenTracker::new(config.seen_capacity);
        Self {
            config,
            client,
            filter,
            scorer,
            notifier,
            seen: Mutex::new(seen),
            shutdown_requested: Arc::new(RwLock::new(false)),
        }
    }

    /// Run cycles until [`stop`](Self::stop) is called. Sleeps the fixed
    /// interval between cycles regardless of how long a cycle took.
    pub async fn run(&self) {
        tracing::info!(
            "Starting discovery monitor - interval: {}s, score threshold: {}, notifier: {}",
            self.config.poll_interval_secs,
            self.config.score_threshold,
            self.notifier.name()
        );

        let poll_interval = Duration::from_secs(self.config.poll_interval_secs);

        loop {
            self.run_cycle().await;
            if *self.shutdown_requested.read().await {
                break;
            }
            tokio::time::sleep(poll_interval).await;
            if *self.shutdown_requested.read().await {
                break;
            }
        }

        tracing::info!("Discovery monitor stopped");
    }

    /// Request a graceful stop at the next checkpoint.
    pub async fn stop(&self) {
        tracing::info!("Stop requested");
        *self.shutdown_requested.write().await = true;
    }

    /// One full polling cycle over the enabled feeds. Feed-level failures
    /// yield zero candidates, never an error.
    pub async fn run_cycle(&self) {
        if self.config.announce_new_listings {
            self.process_latest_profiles().await;
        }
        self.process_boosted_tokens().await;
    }

    /// Announce unseen entries from the latest-listings feed.
    async fn process_latest_profiles(&self) {
        let profiles = match self.client.latest_profiles().await {
            Ok(profiles) => profiles,
            Err(e) => {
                tracing::warn!("Latest-listings fetch failed: {e}");
                return;
            }
        };

        let mut announced = 0usize;
        for profile in profiles {
            if profile.token_address.is_empty() {
                continue;
            }
            if self
                .seen
                .lock()
                .await
                .has_seen(Feed::Latest, &profile.token_address)
            {
                continue;
            }

            let message = format_new_listing(&profile);
            self.deliver(&message).await;
            self.seen
                .lock()
                .await
                .mark_seen(Feed::Latest, &profile.token_address);
            announced += 1;
        }

        if announced > 0 {
            tracing::info!("Announced {announced} new listings");
        }
    }

    /// Run the full pipeline over unseen boosted tokens.
    async fn process_boosted_tokens(&self) {
        let tokens = match self.client.boosted_tokens().await {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::warn!("Boosted-tokens fetch failed: {e}");
                return;
            }
        };

        let fresh: Vec<BoostedTokenRef> = {
            let seen = self.seen.lock().await;
            tokens
                .into_iter()
                .filter(|t| t.is_complete() && !seen.has_seen(Feed::Boosted, &t.token_address))
                .collect()
        };

        if fresh.is_empty() {
            tracing::debug!("No unseen boosted tokens this cycle");
            return;
        }
        tracing::info!("Processing {} unseen boosted tokens", fresh.len());

        if self.config.max_concurrent_lookups <= 1 {
            for token in fresh {
                let lookup = self
                    .client
                    .token_pools(&token.chain_id, &token.token_address)
                    .await;
                self.handle_lookup(&token, lookup).await;
            }
        } else {
            // Fan the pool lookups out; verdict handling and seen-set
            // mutation stay serialized on this task.
            let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_lookups));
            let mut lookups: JoinSet<(
                BoostedTokenRef,
                Result<Vec<PoolSnapshot>, MarketDataError>,
            )> = JoinSet::new();

            for token in fresh {
                let client = self.client.clone();
                let semaphore = Arc::clone(&semaphore);
                lookups.spawn(async move {
                    // The semaphore is never closed, so acquisition cannot fail
                    let _permit = semaphore.acquire_owned().await.ok();
                    let pools = client
                        .token_pools(&token.chain_id, &token.token_address)
                        .await;
                    (token, pools)
                });
            }

            while let Some(joined) = lookups.join_next().await {
                match joined {
                    Ok((token, lookup)) => self.handle_lookup(&token, lookup).await,
                    Err(e) => tracing::error!("Pool lookup task failed: {e}"),
                }
            }
        }
    }

    /// Per-token boundary. A completed pipeline marks the token seen whatever
    /// the verdict; a failed lookup leaves it unmarked so the next cycle
    /// retries it.
    async fn handle_lookup(
        &self,
        token: &BoostedTokenRef,
        lookup: Result<Vec<PoolSnapshot>, MarketDataError>,
    ) {
        match lookup {
            Ok(pools) => {
                match self.assess(&pools) {
                    Assessment::Promising { score, message } => {
                        tracing::info!(
                            "Alerting on {} (score {score:.2})",
                            token.token_address
                        );
                        self.deliver(&message).await;
                    }
                    Assessment::BelowThreshold { score } => {
                        tracing::debug!(
                            "{} scored {score:.2}, below threshold",
                            token.token_address
                        );
                    }
                    Assessment::Rejected { reason } => {
                        tracing::debug!("{} filtered out: {reason}", token.token_address);
                    }
                    Assessment::NoPools => {
                        tracing::debug!("{} has no pools yet", token.token_address);
                    }
                }
                self.seen
                    .lock()
                    .await
                    .mark_seen(Feed::Boosted, &token.token_address);
            }
            Err(e) => {
                tracing::warn!("Pool lookup for {} failed: {e}", token.token_address);
            }
        }
    }

    /// Assess one token's pools: select the best, filter, score.
    pub fn assess(&self, pools: &[PoolSnapshot]) -> Assessment {
        let Some(best) = select_best_pool(pools) else {
            return Assessment::NoPools;
        };

        match self.filter.evaluate(best) {
            Verdict::Rejected(reason) => Assessment::Rejected { reason },
            Verdict::Pass => {
                let score = self.scorer.score(best);
                if score >= self.config.score_threshold {
                    Assessment::Promising {
                        score,
                        message: format_alert(best, score),
                    }
                } else {
                    Assessment::BelowThreshold { score }
                }
            }
        }
    }

    /// Delivery is fire-and-forget: failures are logged and the alert is
    /// dropped, never retried.
    async fn deliver(&self, message: &str) {
        if let Err(e) = self.notifier.send(message).await {
            tracing::error!(
                "Notifier {} failed to deliver alert: {e}",
                self.notifier.name()
            );
        }
    }

    /// Number of addresses currently tracked for a feed
    pub async fn seen_count(&self, feed: Feed) -> usize {
        self.seen.lock().await.len(feed)
    }
}
