//! Notifier Port
//!
//! Outbound interface for alert delivery. The discovery loop treats delivery
//! as fire-and-forget: a failed send is logged and dropped, never retried.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors a notifier implementation can surface
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Network-level failure talking to the transport
    #[error("Transport error: {0}")]
    Transport(String),

    /// Transport answered with a non-success status
    #[error("Delivery rejected ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// Notifier misconfigured (missing token, chat id, ...)
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Delivers a formatted text payload to wherever alerts go
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Name of this notifier for logging
    fn name(&self) -> &str;

    /// Deliver one payload
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}

/// Notifier that prints payloads to stdout; used by dry runs and single-cycle
/// scans.
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    fn name(&self) -> &str {
        "console"
    }

    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        println!("{text}\n");
        Ok(())
    }
}

/// Recording notifier for tests: stores every payload it receives.
pub struct RecordingNotifier {
    sent: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Payloads received so far
    pub async fn sent(&self) -> Vec<String> {
        self.sent.lock().await.clone()
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        self.sent.lock().await.push(text.to_string());
        Ok(())
    }
}
