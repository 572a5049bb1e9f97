//! Discovery Feed Records
//!
//! Lightweight entries produced by the latest-listings and boosted-tokens
//! feeds. Both are consumed within a single processing pass.

use serde::{Deserialize, Serialize};

/// Entry from the latest-listings feed
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenProfile {
    #[serde(default)]
    pub chain_id: String,
    #[serde(default)]
    pub token_address: String,
    /// Display URL for the listing
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Pointer from the boosted-tokens feed, used to look up full pool data
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoostedTokenRef {
    #[serde(default)]
    pub chain_id: String,
    #[serde(default)]
    pub token_address: String,
}

impl BoostedTokenRef {
    /// A ref without both coordinates cannot be looked up
    pub fn is_complete(&self) -> bool {
        !self.chain_id.is_empty() && !self.token_address.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boosted_ref_completeness() {
        let complete = BoostedTokenRef {
            chain_id: "solana".to_string(),
            token_address: "Mint111".to_string(),
        };
        assert!(complete.is_complete());

        let missing_chain = BoostedTokenRef {
            chain_id: String::new(),
            token_address: "Mint111".to_string(),
        };
        assert!(!missing_chain.is_complete());
    }

    #[test]
    fn test_profile_deserialize_defaults() {
        let profile: TokenProfile =
            serde_json::from_str(r#"{"chainId":"base","tokenAddress":"0xabc","url":"u"}"#)
                .unwrap();
        assert_eq!(profile.chain_id, "base");
        assert!(profile.description.is_none());
    }

    #[test]
    fn test_boosted_feed_array() {
        let refs: Vec<BoostedTokenRef> = serde_json::from_str(
            r#"[{"chainId":"solana","tokenAddress":"A"},{"tokenAddress":"B"}]"#,
        )
        .unwrap();
        assert_eq!(refs.len(), 2);
        assert!(refs[0].is_complete());
        assert!(!refs[1].is_complete());
    }
}
