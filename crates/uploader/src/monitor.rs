//! Sample-driven progress monitoring to a terminal outcome.

use std::time::Duration;

use coslift_protocol::messages::TransferEvent;
use coslift_protocol::types::TransferState;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::error::UploadError;

/// Watchdog: stop observing a transfer after this much elapsed time.
pub const WATCHDOG_TIMEOUT: Duration = Duration::from_secs(300);

const MB: f64 = 1024.0 * 1024.0;

/// One interpreted status update.
///
/// Produced per received event; never persisted beyond the run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSample {
    pub transfer_id: String,
    pub state: TransferState,
    pub bytes_transferred: i64,
    pub elapsed: Duration,
}

/// How monitoring ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorOutcome {
    Completed,
    Failed,
    /// Observation gave up; the remote transfer may still be running.
    TimedOut,
}

/// Consumes status events for one transfer until a terminal state or the
/// watchdog fires.
///
/// The elapsed timer starts when the monitor is constructed, i.e. at
/// submission time. The watchdog is evaluated once per received event,
/// never on a separate timer: if the daemon stops emitting events on a
/// live connection, the monitor blocks on the stream.
pub struct ProgressMonitor {
    started: tokio::time::Instant,
    watchdog: Duration,
    total_bytes: u64,
}

impl ProgressMonitor {
    /// Creates a monitor; `total_bytes` is the known size of the batch,
    /// used only for the progress line denominator.
    pub fn new(total_bytes: u64) -> Self {
        Self {
            started: tokio::time::Instant::now(),
            watchdog: WATCHDOG_TIMEOUT,
            total_bytes,
        }
    }

    /// Overrides the watchdog threshold.
    pub fn with_watchdog(mut self, watchdog: Duration) -> Self {
        self.watchdog = watchdog;
        self
    }

    /// Interprets a raw daemon event into a sample.
    ///
    /// An event without an embedded info payload reports zero bytes —
    /// an uninformative tick, not an error.
    pub fn interpret(&self, event: &TransferEvent) -> ProgressSample {
        ProgressSample {
            transfer_id: event.transfer_id.clone(),
            state: TransferState::from_code(event.status),
            bytes_transferred: event
                .transfer_info
                .as_ref()
                .map(|info| info.bytes_transferred)
                .unwrap_or(0),
            elapsed: self.started.elapsed(),
        }
    }

    /// Drives the event stream to a terminal outcome.
    ///
    /// Returns an error only when the stream ends before any terminal
    /// state was seen — a dropped subscription is fatal and is not
    /// re-registered.
    pub async fn run(
        self,
        events: &mut mpsc::Receiver<TransferEvent>,
    ) -> Result<MonitorOutcome, UploadError> {
        let total_mb = self.total_bytes as f64 / MB;

        while let Some(event) = events.recv().await {
            let sample = self.interpret(&event);
            let done_mb = sample.bytes_transferred as f64 / MB;
            info!(
                "[{}s] Transfer {}: {} - {:.1} MB of {:.1} MB",
                sample.elapsed.as_secs(),
                sample.transfer_id,
                sample.state,
                done_mb,
                total_mb
            );

            match sample.state {
                TransferState::Completed => {
                    info!(transfer = %sample.transfer_id, "transfer completed");
                    return Ok(MonitorOutcome::Completed);
                }
                TransferState::Failed => {
                    warn!(transfer = %sample.transfer_id, "transfer failed");
                    return Ok(MonitorOutcome::Failed);
                }
                _ => {}
            }

            if sample.elapsed > self.watchdog {
                warn!(
                    "watchdog fired after {}s; the transfer may still be running remotely",
                    sample.elapsed.as_secs()
                );
                return Ok(MonitorOutcome::TimedOut);
            }
        }

        Err(UploadError::Monitoring(
            "status stream ended before a terminal state".into(),
        ))
    }
}
