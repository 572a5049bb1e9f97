//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching config.toml
//! structure. Secrets (telegram credentials) may live in the environment
//! instead of the file; accessors fall back to env vars.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adapters::dexscreener::FeedEndpoints;
use crate::application::discovery::MonitorConfig;
use crate::domain::filter::FilterConfig;
use crate::domain::scoring::{ScoreComponent, ScoringConfig};

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub feeds: FeedEndpoints,
    pub filter: FilterConfig,
    pub scoring: ScoringSection,
    pub monitor: MonitorSection,
    pub telegram: TelegramSection,
}

/// Scoring configuration section
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoringSection {
    /// Minimum score required to trigger an alert
    pub score_threshold: f64,
    /// Metric set; each entry is {metric, weight, cap}
    pub metrics: Vec<ScoreComponent>,
}

impl Default for ScoringSection {
    fn default() -> Self {
        Self {
            score_threshold: 10.0,
            metrics: ScoringConfig::default().components,
        }
    }
}

/// Discovery loop configuration section
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorSection {
    /// Seconds slept between polling cycles
    pub poll_interval_secs: u64,
    /// Also announce every new latest-listings profile
    pub announce_new_listings: bool,
    /// Concurrent pool lookups per cycle; 1 keeps the reference
    /// strictly-sequential behavior
    pub max_concurrent_lookups: usize,
    /// Per-feed capacity of the seen-token tracker
    pub seen_capacity: usize,
}

impl Default for MonitorSection {
    fn default() -> Self {
        Self {
            poll_interval_secs: 60,
            announce_new_listings: false,
            max_concurrent_lookups: 1,
            seen_capacity: 10_000,
        }
    }
}

/// Telegram delivery configuration section
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TelegramSection {
    /// Deliver alerts via Telegram; off means console output
    pub enabled: bool,
    /// Bot token; prefer the TELEGRAM_BOT_TOKEN env var
    pub bot_token: String,
    /// Target chat id; prefer the TELEGRAM_CHAT_ID env var
    pub chat_id: String,
}

impl TelegramSection {
    /// Bot token with environment variable fallback
    pub fn get_bot_token(&self) -> Option<String> {
        if !self.bot_token.is_empty() {
            return Some(self.bot_token.clone());
        }
        std::env::var("TELEGRAM_BOT_TOKEN").ok().filter(|v| !v.is_empty())
    }

    /// Chat id with environment variable fallback
    pub fn get_chat_id(&self) -> Option<String> {
        if !self.chat_id.is_empty() {
            return Some(self.chat_id.clone());
        }
        std::env::var("TELEGRAM_CHAT_ID").ok().filter(|v| !v.is_empty())
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate feeds
        if self.feeds.latest_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "feeds.latest_url cannot be empty".to_string(),
            ));
        }
        if self.feeds.boosted_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "feeds.boosted_url cannot be empty".to_string(),
            ));
        }
        if self.feeds.pools_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "feeds.pools_url cannot be empty".to_string(),
            ));
        }

        // Validate filter thresholds
        if self.filter.min_liquidity_usd < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "filter.min_liquidity_usd must be >= 0, got {}",
                self.filter.min_liquidity_usd
            )));
        }
        if self.filter.min_volume_24h_usd < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "filter.min_volume_24h_usd must be >= 0, got {}",
                self.filter.min_volume_24h_usd
            )));
        }
        if self.filter.max_fdv_ratio <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "filter.max_fdv_ratio must be > 0, got {}",
                self.filter.max_fdv_ratio
            )));
        }
        if self.filter.max_age_hours <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "filter.max_age_hours must be > 0, got {}",
                self.filter.max_age_hours
            )));
        }

        // Validate scoring
        if !self.scoring.score_threshold.is_finite() {
            return Err(ConfigError::ValidationError(
                "scoring.score_threshold must be finite".to_string(),
            ));
        }
        for component in &self.scoring.metrics {
            if !component.weight.is_finite() {
                return Err(ConfigError::ValidationError(format!(
                    "scoring weight for {:?} must be finite",
                    component.metric
                )));
            }
            if !component.cap.is_finite() {
                return Err(ConfigError::ValidationError(format!(
                    "scoring cap for {:?} must be finite",
                    component.metric
                )));
            }
        }

        // Validate monitor
        if self.monitor.poll_interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "monitor.poll_interval_secs must be > 0".to_string(),
            ));
        }
        if self.monitor.max_concurrent_lookups == 0 {
            return Err(ConfigError::ValidationError(
                "monitor.max_concurrent_lookups must be > 0".to_string(),
            ));
        }
        if self.monitor.seen_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "monitor.seen_capacity must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Filter thresholds for the gate chain
    pub fn filter_config(&self) -> FilterConfig {
        self.filter.clone()
    }

    /// Metric set for the scorer
    pub fn scoring_config(&self) -> ScoringConfig {
        ScoringConfig {
            components: self.scoring.metrics.clone(),
        }
    }

    /// Feed endpoints for the DexScreener client
    pub fn feed_endpoints(&self) -> FeedEndpoints {
        self.feeds.clone()
    }
}

// Conversion from Config to the discovery loop config
impl From<&Config> for MonitorConfig {
    fn from(config: &Config) -> Self {
        MonitorConfig {
            poll_interval_secs: config.monitor.poll_interval_secs,
            score_threshold: config.scoring.score_threshold,
            announce_new_listings: config.monitor.announce_new_listings,
            max_concurrent_lookups: config.monitor.max_concurrent_lookups,
            seen_capacity: config.monitor.seen_capacity,
        }
    }
}
