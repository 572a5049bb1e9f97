//! Adapters Layer - External System Implementations
//!
//! This module contains implementations against external systems:
//! - DexScreener: discovery feed HTTP client
//! - Telegram: alert delivery via the Bot API
//! - CLI: command-line interface handlers

pub mod cli;
pub mod dexscreener;
pub mod telegram;

pub use cli::CliApp;
pub use dexscreener::{DexClient, FeedEndpoints, MarketDataError};
pub use telegram::TelegramNotifier;
