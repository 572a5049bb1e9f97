//! Domain Layer - Core pipeline logic
//!
//! Pure types and decisions with no I/O: the typed pool snapshot, best-pool
//! selection, the filter gate chain, the potential scorer, the per-feed
//! seen-token tracker, and alert formatting. External interactions happen
//! through the ports and adapters layers.

pub mod alert;
pub mod feeds;
pub mod filter;
pub mod scoring;
pub mod seen;
pub mod snapshot;

pub use alert::{format_alert, format_new_listing, EXPLORER_BASE_URL};
pub use feeds::{BoostedTokenRef, TokenProfile};
pub use filter::{FilterConfig, RejectReason, TokenFilter, Verdict};
pub use scoring::{normalize, Metric, PotentialScorer, ScoreComponent, ScoringConfig};
pub use seen::{Feed, SeenTokenTracker};
pub use snapshot::{select_best_pool, PoolSnapshot};
