//! Transfer session lifecycle: validate, submit, monitor.

use coslift_protocol::messages::{
    RegistrationRequest, StartTransferRequest, TransferConfig, TransferEvent, TransferType,
};
use coslift_protocol::spec::TransferSpec;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::UploadConfig;
use crate::daemon::DaemonConnection;
use crate::error::UploadError;
use crate::monitor::{MonitorOutcome, ProgressMonitor};

/// One upload run against the daemon.
///
/// Borrows the connection exclusively for the duration of the run; no
/// concurrent submissions are supported within one process invocation.
pub struct UploadSession<'a> {
    conn: &'a dyn DaemonConnection,
    config: &'a UploadConfig,
}

impl<'a> UploadSession<'a> {
    pub fn new(conn: &'a dyn DaemonConnection, config: &'a UploadConfig) -> Self {
        Self { conn, config }
    }

    /// Checks that every required identity field is present.
    ///
    /// Called only immediately before a real submission — a dry run must
    /// succeed with incomplete configuration so an operator can inspect
    /// the generated document before credentials are finalized.
    pub fn validate_for_submission(&self) -> Result<(), UploadError> {
        let missing = self.config.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(UploadError::Configuration(missing))
        }
    }

    /// Serializes the spec document and starts the transfer.
    ///
    /// Returns the daemon-assigned transfer ID. A remote rejection
    /// carries the daemon's message verbatim so the caller can apply
    /// heuristic hinting.
    pub async fn submit(&self, spec: &TransferSpec) -> Result<String, UploadError> {
        let request = StartTransferRequest {
            transfer_type: TransferType::FileRegular,
            config: TransferConfig::default(),
            transfer_spec: serde_json::to_string(spec)?,
        };

        let response = self.conn.start_transfer(&request).await?;
        info!(transfer = %response.transfer_id, "transfer started");
        Ok(response.transfer_id)
    }

    /// Registers interest in exactly one transfer ID and opens the
    /// status-event subscription.
    pub async fn monitor(
        &self,
        transfer_id: &str,
    ) -> Result<mpsc::Receiver<TransferEvent>, UploadError> {
        debug!(transfer = %transfer_id, "registering monitor subscription");
        self.conn
            .monitor_transfers(&RegistrationRequest::for_transfer(transfer_id))
            .await
    }

    /// Full submit-and-monitor pipeline.
    ///
    /// `total_bytes` is the known batch size, used for progress lines.
    pub async fn run(
        &self,
        spec: &TransferSpec,
        total_bytes: u64,
    ) -> Result<MonitorOutcome, UploadError> {
        self.validate_for_submission()?;

        let transfer_id = self.submit(spec).await?;
        // The elapsed timer starts at submission time.
        let monitor = ProgressMonitor::new(total_bytes);
        let mut events = self.monitor(&transfer_id).await?;
        monitor.run(&mut events).await
    }
}
