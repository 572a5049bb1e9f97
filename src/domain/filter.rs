//! Token Filter
//!
//! Ordered chain of conjunctive gates over a pool snapshot. The first failing
//! gate short-circuits the rest; the ordering only matters for which reject
//! reason gets reported, never for the pass/fail outcome. All thresholds come
//! from [`FilterConfig`] handed to the constructor, no ambient globals.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::snapshot::PoolSnapshot;

/// Minimum combined m5 transactions before a volume spike stops looking like
/// wash trading.
const MANIPULATION_MIN_TXNS_M5: u32 = 10;

/// Fraction of 24h volume that, when concentrated into 5 minutes, marks a
/// suspicious spike.
const MANIPULATION_VOLUME_FRACTION: f64 = 0.5;

/// Threshold set for the filter gates
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Minimum pool liquidity in USD
    pub min_liquidity_usd: f64,
    /// Minimum 24h trading volume in USD
    pub min_volume_24h_usd: f64,
    /// Maximum FDV / liquidity ratio
    pub max_fdv_ratio: f64,
    /// Maximum pool age in hours
    pub max_age_hours: f64,
    /// Minimum 5-minute price change in percent
    pub min_price_change_m5_pct: f64,
    /// Minimum buy transactions over 24h
    pub min_buys_24h: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_liquidity_usd: 10_000.0,
            min_volume_24h_usd: 10_000.0,
            max_fdv_ratio: 50.0,
            max_age_hours: 2.0,
            min_price_change_m5_pct: 25.0,
            min_buys_24h: 20,
        }
    }
}

/// Why a snapshot was rejected, in gate order
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    LowLiquidity { liquidity_usd: f64 },
    LowVolume { volume_h24: f64 },
    ExcessiveValuation { fdv_ratio: f64 },
    FewBuys { buys_h24: u32 },
    TooOld { age_hours: f64 },
    WeakMomentum { price_change_m5: f64 },
    SuspectedManipulation { volume_m5: f64, txns_m5: u32 },
    NoSocials,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LowLiquidity { liquidity_usd } => {
                write!(f, "liquidity too low (${liquidity_usd:.0})")
            }
            Self::LowVolume { volume_h24 } => {
                write!(f, "24h volume too low (${volume_h24:.0})")
            }
            Self::ExcessiveValuation { fdv_ratio } => {
                write!(f, "fdv/liquidity ratio too high ({fdv_ratio:.1})")
            }
            Self::FewBuys { buys_h24 } => {
                write!(f, "too few 24h buys ({buys_h24})")
            }
            Self::TooOld { age_hours } => {
                write!(f, "pool too old ({age_hours:.1}h)")
            }
            Self::WeakMomentum { price_change_m5 } => {
                write!(f, "5m price change too weak ({price_change_m5:.1}%)")
            }
            Self::SuspectedManipulation { volume_m5, txns_m5 } => {
                write!(
                    f,
                    "suspected manipulation (${volume_m5:.0} over {txns_m5} txns in 5m)"
                )
            }
            Self::NoSocials => write!(f, "no social accounts"),
        }
    }
}

/// Filter outcome, carrying the reject reason for diagnostics
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Pass,
    Rejected(RejectReason),
}

impl Verdict {
    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// Gate chain deciding whether a snapshot is a credible momentum candidate
#[derive(Debug, Clone)]
pub struct TokenFilter {
    config: FilterConfig,
}

impl TokenFilter {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Evaluate all gates against the current wall clock.
    pub fn evaluate(&self, snapshot: &PoolSnapshot) -> Verdict {
        self.evaluate_at(snapshot, Utc::now().timestamp_millis())
    }

    /// Evaluate all gates with an explicit "now" in epoch milliseconds.
    pub fn evaluate_at(&self, snapshot: &PoolSnapshot, now_ms: i64) -> Verdict {
        let liquidity_usd = snapshot.liquidity.usd;
        if liquidity_usd < self.config.min_liquidity_usd {
            return Verdict::Rejected(RejectReason::LowLiquidity { liquidity_usd });
        }

        let volume_h24 = snapshot.volume.h24;
        if volume_h24 < self.config.min_volume_24h_usd {
            return Verdict::Rejected(RejectReason::LowVolume { volume_h24 });
        }

        let fdv_ratio = snapshot.fdv_ratio();
        if fdv_ratio > self.config.max_fdv_ratio {
            return Verdict::Rejected(RejectReason::ExcessiveValuation { fdv_ratio });
        }

        let buys_h24 = snapshot.txns.h24.buys;
        if buys_h24 < self.config.min_buys_24h {
            return Verdict::Rejected(RejectReason::FewBuys { buys_h24 });
        }

        let age_hours = snapshot.age_hours(now_ms);
        if age_hours > self.config.max_age_hours {
            return Verdict::Rejected(RejectReason::TooOld { age_hours });
        }

        let price_change_m5 = snapshot.price_change.m5;
        if price_change_m5 < self.config.min_price_change_m5_pct {
            return Verdict::Rejected(RejectReason::WeakMomentum { price_change_m5 });
        }

        // A 5m volume spike carried by a handful of transactions is almost
        // always a bot painting the chart.
        let volume_m5 = snapshot.volume.m5;
        let txns_m5 = snapshot.txns.m5.total();
        if volume_m5 > MANIPULATION_VOLUME_FRACTION * volume_h24
            && txns_m5 < MANIPULATION_MIN_TXNS_M5
        {
            return Verdict::Rejected(RejectReason::SuspectedManipulation { volume_m5, txns_m5 });
        }

        if !snapshot.has_socials() {
            return Verdict::Rejected(RejectReason::NoSocials);
        }

        Verdict::Pass
    }

    /// Boolean convenience over [`evaluate`](Self::evaluate)
    pub fn passes(&self, snapshot: &PoolSnapshot) -> bool {
        self.evaluate(snapshot).passed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::{
        BaseToken, Liquidity, PairInfo, PriceChangeWindows, SocialRef, TxnCount, TxnWindows,
        VolumeWindows,
    };

    const NOW_MS: i64 = 1_700_000_000_000;

    /// Snapshot that clears every default gate with room to spare
    fn passing_snapshot() -> PoolSnapshot {
        PoolSnapshot {
            chain_id: "solana".to_string(),
            base_token: BaseToken {
                address: "Mint111".to_string(),
                name: "Test".to_string(),
                symbol: "TST".to_string(),
            },
            liquidity: Liquidity { usd: 150_000.0 },
            fdv: 2_000_000.0,
            volume: VolumeWindows {
                m5: 1_000.0,
                h1: 8_000.0,
                h6: 30_000.0,
                h24: 60_000.0,
            },
            price_change: PriceChangeWindows {
                m5: 30.0,
                h1: 45.0,
                h6: 80.0,
                h24: 120.0,
            },
            txns: TxnWindows {
                m5: TxnCount { buys: 40, sells: 12 },
                h1: TxnCount {
                    buys: 200,
                    sells: 90,
                },
                h24: TxnCount {
                    buys: 1_200,
                    sells: 600,
                },
            },
            // Half an hour old
            pair_created_at: Some(NOW_MS - 30 * 60 * 1000),
            info: Some(PairInfo {
                socials: vec![SocialRef {
                    kind: Some("twitter".to_string()),
                    url: None,
                }],
            }),
        }
    }

    fn default_filter() -> TokenFilter {
        TokenFilter::new(FilterConfig::default())
    }

    #[test]
    fn test_passing_snapshot_passes() {
        let verdict = default_filter().evaluate_at(&passing_snapshot(), NOW_MS);
        assert_eq!(verdict, Verdict::Pass);
    }

    #[test]
    fn test_liquidity_floor_short_circuits() {
        // Everything else perfect, liquidity alone must sink it
        let mut snapshot = passing_snapshot();
        snapshot.liquidity.usd = 500.0;

        let config = FilterConfig {
            min_liquidity_usd: 100_000.0,
            ..FilterConfig::default()
        };
        let verdict = TokenFilter::new(config).evaluate_at(&snapshot, NOW_MS);
        assert_eq!(
            verdict,
            Verdict::Rejected(RejectReason::LowLiquidity { liquidity_usd: 500.0 })
        );
    }

    #[test]
    fn test_volume_floor() {
        let mut snapshot = passing_snapshot();
        snapshot.volume.h24 = 9_999.0;

        let verdict = default_filter().evaluate_at(&snapshot, NOW_MS);
        assert!(matches!(
            verdict,
            Verdict::Rejected(RejectReason::LowVolume { .. })
        ));
    }

    #[test]
    fn test_valuation_sanity() {
        let mut snapshot = passing_snapshot();
        // ratio = 60M / 150k = 400 > 50
        snapshot.fdv = 60_000_000.0;

        let verdict = default_filter().evaluate_at(&snapshot, NOW_MS);
        assert!(matches!(
            verdict,
            Verdict::Rejected(RejectReason::ExcessiveValuation { .. })
        ));
    }

    #[test]
    fn test_buy_activity_floor() {
        let mut snapshot = passing_snapshot();
        snapshot.txns.h24.buys = 5;

        let verdict = default_filter().evaluate_at(&snapshot, NOW_MS);
        assert_eq!(
            verdict,
            Verdict::Rejected(RejectReason::FewBuys { buys_h24: 5 })
        );
    }

    #[test]
    fn test_freshness_gate() {
        let mut snapshot = passing_snapshot();
        // Three hours old against a two-hour cutoff
        snapshot.pair_created_at = Some(NOW_MS - 3 * 3600 * 1000);

        let verdict = default_filter().evaluate_at(&snapshot, NOW_MS);
        assert!(matches!(
            verdict,
            Verdict::Rejected(RejectReason::TooOld { .. })
        ));
    }

    #[test]
    fn test_unknown_creation_time_counts_as_stale() {
        let mut snapshot = passing_snapshot();
        snapshot.pair_created_at = None;

        let verdict = default_filter().evaluate_at(&snapshot, NOW_MS);
        assert!(matches!(
            verdict,
            Verdict::Rejected(RejectReason::TooOld { .. })
        ));
    }

    #[test]
    fn test_momentum_gate() {
        let mut snapshot = passing_snapshot();
        snapshot.price_change.m5 = 10.0;

        let verdict = default_filter().evaluate_at(&snapshot, NOW_MS);
        assert_eq!(
            verdict,
            Verdict::Rejected(RejectReason::WeakMomentum {
                price_change_m5: 10.0
            })
        );
    }

    #[test]
    fn test_manipulation_gate_fails_thin_spike() {
        let mut snapshot = passing_snapshot();
        // 60% of 24h volume in 5 minutes over 5 transactions
        snapshot.volume.m5 = 6_000.0;
        snapshot.volume.h24 = 10_000.0;
        snapshot.txns.m5 = TxnCount { buys: 3, sells: 2 };

        let verdict = default_filter().evaluate_at(&snapshot, NOW_MS);
        assert_eq!(
            verdict,
            Verdict::Rejected(RejectReason::SuspectedManipulation {
                volume_m5: 6_000.0,
                txns_m5: 5
            })
        );
    }

    #[test]
    fn test_manipulation_gate_passes_busy_spike() {
        let mut snapshot = passing_snapshot();
        // Same spike, but 40 transactions behind it
        snapshot.volume.m5 = 6_000.0;
        snapshot.volume.h24 = 10_000.0;
        snapshot.txns.m5 = TxnCount {
            buys: 20,
            sells: 20,
        };

        let verdict = default_filter().evaluate_at(&snapshot, NOW_MS);
        assert_eq!(verdict, Verdict::Pass);
    }

    #[test]
    fn test_social_presence_gate() {
        let mut snapshot = passing_snapshot();
        snapshot.info = Some(PairInfo { socials: vec![] });
        assert_eq!(
            default_filter().evaluate_at(&snapshot, NOW_MS),
            Verdict::Rejected(RejectReason::NoSocials)
        );

        snapshot.info = None;
        assert_eq!(
            default_filter().evaluate_at(&snapshot, NOW_MS),
            Verdict::Rejected(RejectReason::NoSocials)
        );
    }

    #[test]
    fn test_all_default_snapshot_fails_on_first_gate() {
        // A snapshot decoded from an empty document trips the liquidity floor
        let verdict = default_filter().evaluate_at(&PoolSnapshot::default(), NOW_MS);
        assert_eq!(
            verdict,
            Verdict::Rejected(RejectReason::LowLiquidity { liquidity_usd: 0.0 })
        );
    }

    #[test]
    fn test_passes_convenience() {
        // `passes` uses the wall clock, so use an effectively fresh pool
        let mut snapshot = passing_snapshot();
        snapshot.pair_created_at = Some(Utc::now().timestamp_millis());
        assert!(default_filter().passes(&snapshot));
    }

    #[test]
    fn test_reject_reason_display() {
        let reason = RejectReason::LowLiquidity {
            liquidity_usd: 500.0,
        };
        assert!(reason.to_string().contains("liquidity"));

        let reason = RejectReason::SuspectedManipulation {
            volume_m5: 6_000.0,
            txns_m5: 5,
        };
        assert!(reason.to_string().contains("manipulation"));
    }
}
