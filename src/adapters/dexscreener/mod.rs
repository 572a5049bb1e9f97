//! DexScreener Adapter
//!
//! Read-only HTTP client for the three public discovery endpoints:
//! latest token profiles, boosted tokens, and per-token pool lookup.

mod client;

pub use client::{DexClient, FeedEndpoints, MarketDataError};
