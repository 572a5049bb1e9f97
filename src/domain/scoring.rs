//! Potential Scorer
//!
//! Single momentum score over a configurable set of weighted snapshot
//! metrics. Each component is normalized against its cap into [0, 100] before
//! weighting, so one runaway metric cannot drown the rest; the total itself
//! is unbounded. The metric set is deployment configuration, not fixed
//! business logic.

use serde::{Deserialize, Serialize};

use super::snapshot::PoolSnapshot;

/// Snapshot metric a score component can read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    VolumeM5,
    VolumeH1,
    VolumeH6,
    VolumeH24,
    PriceChangeM5,
    PriceChangeH1,
    PriceChangeH6,
    PriceChangeH24,
    BuysM5,
    BuysH1,
    BuysH24,
    SellsM5,
    SellsH1,
    SellsH24,
    /// 24h buys minus sells; negative imbalance scores zero after clamping
    NetBuysH24,
    LiquidityUsd,
    Fdv,
}

impl Metric {
    /// Extract this metric's raw value from a snapshot
    pub fn value(&self, snapshot: &PoolSnapshot) -> f64 {
        match self {
            Metric::VolumeM5 => snapshot.volume.m5,
            Metric::VolumeH1 => snapshot.volume.h1,
            Metric::VolumeH6 => snapshot.volume.h6,
            Metric::VolumeH24 => snapshot.volume.h24,
            Metric::PriceChangeM5 => snapshot.price_change.m5,
            Metric::PriceChangeH1 => snapshot.price_change.h1,
            Metric::PriceChangeH6 => snapshot.price_change.h6,
            Metric::PriceChangeH24 => snapshot.price_change.h24,
            Metric::BuysM5 => snapshot.txns.m5.buys as f64,
            Metric::BuysH1 => snapshot.txns.h1.buys as f64,
            Metric::BuysH24 => snapshot.txns.h24.buys as f64,
            Metric::SellsM5 => snapshot.txns.m5.sells as f64,
            Metric::SellsH1 => snapshot.txns.h1.sells as f64,
            Metric::SellsH24 => snapshot.txns.h24.sells as f64,
            Metric::NetBuysH24 => {
                snapshot.txns.h24.buys as f64 - snapshot.txns.h24.sells as f64
            }
            Metric::LiquidityUsd => snapshot.liquidity.usd,
            Metric::Fdv => snapshot.fdv,
        }
    }
}

/// One weighted, capped score component
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ScoreComponent {
    pub metric: Metric,
    /// Relative weight; weights need not sum to 1
    pub weight: f64,
    /// Metric value treated as "maximal" (100%) when normalizing
    pub cap: f64,
}

/// Metric set the scorer runs over
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub components: Vec<ScoreComponent>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            components: vec![
                ScoreComponent {
                    metric: Metric::VolumeH24,
                    weight: 0.30,
                    cap: 50_000.0,
                },
                ScoreComponent {
                    metric: Metric::PriceChangeH24,
                    weight: 0.25,
                    cap: 100.0,
                },
                ScoreComponent {
                    metric: Metric::BuysH24,
                    weight: 0.20,
                    cap: 1_000.0,
                },
                ScoreComponent {
                    metric: Metric::LiquidityUsd,
                    weight: 0.15,
                    cap: 100_000.0,
                },
                ScoreComponent {
                    metric: Metric::Fdv,
                    weight: 0.10,
                    cap: 1_000_000.0,
                },
            ],
        }
    }
}

/// Normalize a raw metric value against its cap into [0, 100].
///
/// A non-positive cap disables the component (returns 0) rather than
/// dividing by zero.
pub fn normalize(value: f64, cap: f64) -> f64 {
    if cap <= 0.0 {
        return 0.0;
    }
    (value / cap).clamp(0.0, 1.0) * 100.0
}

/// Computes the weighted momentum score for a snapshot
#[derive(Debug, Clone)]
pub struct PotentialScorer {
    config: ScoringConfig,
}

impl PotentialScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Weighted sum of clamped normalized components, rounded to two
    /// decimal places. Higher is better; a 0.0 just means "not promising".
    pub fn score(&self, snapshot: &PoolSnapshot) -> f64 {
        let total: f64 = self
            .config
            .components
            .iter()
            .map(|c| c.weight * normalize(c.metric.value(snapshot), c.cap))
            .sum();

        (total * 100.0).round() / 100.0
    }
}
