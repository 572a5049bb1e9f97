//! Pool Snapshot Model
//!
//! Typed representation of a DexScreener trading-pool document. The upstream
//! API omits fields freely, so every field either carries a zero default or an
//! explicit `Option`, resolved once at deserialization. Downstream filtering
//! and scoring never touch raw JSON.

use serde::{Deserialize, Serialize};

/// Base token identity inside a pool document
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BaseToken {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

/// USD value locked in the pool
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct Liquidity {
    #[serde(default)]
    pub usd: f64,
}

/// Rolling-window trading volume in USD
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct VolumeWindows {
    #[serde(default)]
    pub m5: f64,
    #[serde(default)]
    pub h1: f64,
    #[serde(default)]
    pub h6: f64,
    #[serde(default)]
    pub h24: f64,
}

/// Rolling-window price change in percent
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct PriceChangeWindows {
    #[serde(default)]
    pub m5: f64,
    #[serde(default)]
    pub h1: f64,
    #[serde(default)]
    pub h6: f64,
    #[serde(default)]
    pub h24: f64,
}

/// Buy/sell transaction counts for one window
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct TxnCount {
    #[serde(default)]
    pub buys: u32,
    #[serde(default)]
    pub sells: u32,
}

impl TxnCount {
    /// Total transactions in the window
    pub fn total(&self) -> u32 {
        self.buys + self.sells
    }
}

/// Transaction counts across the windows the pipeline reads
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct TxnWindows {
    #[serde(default)]
    pub m5: TxnCount,
    #[serde(default)]
    pub h1: TxnCount,
    #[serde(default)]
    pub h24: TxnCount,
}

/// Social account reference; presence is the signal, content is unused
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SocialRef {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Supplemental pool info block
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PairInfo {
    #[serde(default)]
    pub socials: Vec<SocialRef>,
}

/// One trading-pool snapshot for a token, the unit the filter and scorer
/// operate on.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSnapshot {
    #[serde(default)]
    pub chain_id: String,
    #[serde(default)]
    pub base_token: BaseToken,
    #[serde(default)]
    pub liquidity: Liquidity,
    /// Fully-diluted valuation in USD, 0 when the feed omits it
    #[serde(default)]
    pub fdv: f64,
    #[serde(default)]
    pub volume: VolumeWindows,
    #[serde(default)]
    pub price_change: PriceChangeWindows,
    #[serde(default)]
    pub txns: TxnWindows,
    /// Pool creation time in epoch milliseconds; `None` when unknown
    #[serde(default)]
    pub pair_created_at: Option<i64>,
    #[serde(default)]
    pub info: Option<PairInfo>,
}

impl PoolSnapshot {
    /// Pool age in hours relative to `now_ms` (epoch milliseconds).
    /// An unknown creation time counts as infinitely old.
    pub fn age_hours(&self, now_ms: i64) -> f64 {
        match self.pair_created_at {
            Some(created_ms) => (now_ms - created_ms) as f64 / 1000.0 / 3600.0,
            None => f64::INFINITY,
        }
    }

    /// FDV over liquidity, with the denominator floored at one dollar so a
    /// zero-liquidity pool yields a huge ratio instead of a division blowup.
    pub fn fdv_ratio(&self) -> f64 {
        self.fdv / self.liquidity.usd.max(1.0)
    }

    /// Whether the pool advertises at least one social account
    pub fn has_socials(&self) -> bool {
        self.info
            .as_ref()
            .map(|info| !info.socials.is_empty())
            .unwrap_or(false)
    }
}

/// Pick the pool with the largest USD liquidity to represent a token.
///
/// Returns `None` on an empty slice. Ties break toward the earliest element,
/// matching feed order.
pub fn select_best_pool(pools: &[PoolSnapshot]) -> Option<&PoolSnapshot> {
    pools.iter().fold(None, |best, pool| match best {
        Some(current) if pool.liquidity.usd > current.liquidity.usd => Some(pool),
        Some(current) => Some(current),
        None => Some(pool),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_with_liquidity(address: &str, usd: f64) -> PoolSnapshot {
        PoolSnapshot {
            base_token: BaseToken {
                address: address.to_string(),
                ..BaseToken::default()
            },
            liquidity: Liquidity { usd },
            ..PoolSnapshot::default()
        }
    }

    #[test]
    fn test_select_best_pool_picks_highest_liquidity() {
        let pools = vec![
            pool_with_liquidity("a", 5.0),
            pool_with_liquidity("b", 80.0),
            pool_with_liquidity("c", 80.0),
            pool_with_liquidity("d", 3.0),
        ];

        // First of the tied maxima wins
        let best = select_best_pool(&pools).unwrap();
        assert_eq!(best.base_token.address, "b");
    }

    #[test]
    fn test_select_best_pool_empty() {
        assert!(select_best_pool(&[]).is_none());
    }

    #[test]
    fn test_select_best_pool_single() {
        let pools = vec![pool_with_liquidity("only", 1.0)];
        assert_eq!(
            select_best_pool(&pools).unwrap().base_token.address,
            "only"
        );
    }

    #[test]
    fn test_deserialize_sparse_document() {
        // Upstream regularly omits most fields; everything must default
        let snapshot: PoolSnapshot = serde_json::from_str(
            r#"{"chainId":"solana","baseToken":{"address":"So1ababa","symbol":"ABA"}}"#,
        )
        .unwrap();

        assert_eq!(snapshot.chain_id, "solana");
        assert_eq!(snapshot.base_token.symbol, "ABA");
        assert_eq!(snapshot.liquidity.usd, 0.0);
        assert_eq!(snapshot.fdv, 0.0);
        assert_eq!(snapshot.volume.h24, 0.0);
        assert_eq!(snapshot.txns.m5.total(), 0);
        assert!(snapshot.pair_created_at.is_none());
        assert!(!snapshot.has_socials());
    }

    #[test]
    fn test_deserialize_full_document() {
        let snapshot: PoolSnapshot = serde_json::from_str(
            r#"{
                "chainId": "solana",
                "baseToken": {"address": "Mint111", "name": "Test", "symbol": "TST"},
                "liquidity": {"usd": 150000.0},
                "fdv": 2000000.0,
                "volume": {"m5": 1000.0, "h1": 8000.0, "h6": 30000.0, "h24": 60000.0},
                "priceChange": {"m5": 30.0, "h1": 45.0, "h6": 80.0, "h24": 120.0},
                "txns": {
                    "m5": {"buys": 40, "sells": 12},
                    "h1": {"buys": 200, "sells": 90},
                    "h24": {"buys": 1200, "sells": 600}
                },
                "pairCreatedAt": 1700000000000,
                "info": {"socials": [{"type": "twitter", "url": "https://x.com/test"}]}
            }"#,
        )
        .unwrap();

        assert_eq!(snapshot.liquidity.usd, 150_000.0);
        assert_eq!(snapshot.price_change.m5, 30.0);
        assert_eq!(snapshot.txns.h24.buys, 1200);
        assert_eq!(snapshot.pair_created_at, Some(1_700_000_000_000));
        assert!(snapshot.has_socials());
    }

    #[test]
    fn test_age_hours() {
        let mut snapshot = PoolSnapshot::default();
        assert!(snapshot.age_hours(1_700_000_000_000).is_infinite());

        // Created 30 minutes before "now"
        snapshot.pair_created_at = Some(1_700_000_000_000 - 30 * 60 * 1000);
        let age = snapshot.age_hours(1_700_000_000_000);
        assert!((age - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_fdv_ratio_floors_liquidity() {
        let snapshot = PoolSnapshot {
            fdv: 2_000_000.0,
            liquidity: Liquidity { usd: 0.0 },
            ..PoolSnapshot::default()
        };
        assert_eq!(snapshot.fdv_ratio(), 2_000_000.0);

        let snapshot = PoolSnapshot {
            fdv: 2_000_000.0,
            liquidity: Liquidity { usd: 150_000.0 },
            ..PoolSnapshot::default()
        };
        assert!((snapshot.fdv_ratio() - 13.333).abs() < 0.001);
    }

    #[test]
    fn test_has_socials_requires_nonempty_list() {
        let mut snapshot = PoolSnapshot::default();
        assert!(!snapshot.has_socials());

        snapshot.info = Some(PairInfo { socials: vec![] });
        assert!(!snapshot.has_socials());

        snapshot.info = Some(PairInfo {
            socials: vec![SocialRef {
                kind: Some("twitter".to_string()),
                url: None,
            }],
        });
        assert!(snapshot.has_socials());
    }
}
