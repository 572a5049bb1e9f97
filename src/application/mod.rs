//! Application Layer - Use-case orchestration
//!
//! Hosts the discovery monitor, the polling loop that drives the whole
//! fetch → select → filter → score → alert pipeline.

pub mod discovery;

pub use discovery::{Assessment, DiscoveryMonitor, MonitorConfig};
