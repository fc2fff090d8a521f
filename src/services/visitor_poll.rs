//! Periodic active-visitor polling.
//!
//! Polling is an explicit task: [`start_polling`] spawns it and returns a
//! [`PollHandle`]; the task runs until the handle is stopped or dropped.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;

/// Default poll interval in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Poller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PollConfig {
    /// Seconds between fetches. Zero is treated as one.
    pub interval_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

/// Handle to a running poll task.
///
/// Dropping the handle stops the task.
pub struct PollHandle {
    cancel_token: CancellationToken,
    latest: watch::Receiver<Option<u64>>,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Most recent successfully fetched count.
    pub fn latest(&self) -> Option<u64> {
        *self.latest.borrow()
    }

    /// A receiver notified on every new count.
    pub fn subscribe(&self) -> watch::Receiver<Option<u64>> {
        self.latest.clone()
    }

    /// Stop polling. Idempotent.
    pub fn stop(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Stop and wait for the task to exit.
    pub async fn shutdown(mut self) {
        self.stop();
        if let Err(e) = (&mut self.task).await {
            log::warn!("[poll] Poll task ended abnormally: {}", e);
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

/// Start fetching the visitor count every `config.interval_secs`.
///
/// The first fetch happens immediately. Failed fetches are logged and the
/// last good count is kept.
pub fn start_polling<F, Fut>(config: &PollConfig, mut fetch: F) -> PollHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<u64, AppError>> + Send + 'static,
{
    let cancel_token = CancellationToken::new();
    let cancel_clone = cancel_token.clone();
    let (tx, rx) = watch::channel(None);
    let period = Duration::from_secs(config.interval_secs.max(1));

    let task = tokio::spawn(async move {
        let mut interval = time::interval(period);
        log::info!("[poll] Visitor polling started, interval={}s", period.as_secs());

        loop {
            tokio::select! {
                _ = cancel_clone.cancelled() => break,
                _ = interval.tick() => {
                    let result = tokio::select! {
                        _ = cancel_clone.cancelled() => break,
                        result = fetch() => result,
                    };
                    match result {
                        Ok(count) => {
                            tx.send_replace(Some(count));
                        }
                        Err(e) => log::warn!("[poll] Visitor count fetch failed: {}", e),
                    }
                }
            }
        }

        log::info!("[poll] Visitor polling stopped");
    });

    PollHandle {
        cancel_token,
        latest: rx,
        task,
    }
}
