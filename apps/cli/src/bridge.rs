//! Bridges the WebSocket client to the upload logic's transport seam.

use std::future::Future;
use std::pin::Pin;

use coslift_daemon_client::{ClientError, TransferdClient};
use coslift_protocol::messages::{
    RegistrationRequest, StartTransferRequest, StartTransferResponse, TransferEvent,
};
use coslift_uploader::{DaemonConnection, UploadError};
use tokio::sync::mpsc;

/// Adapts [`TransferdClient`] to [`DaemonConnection`].
pub struct DaemonBridge {
    client: TransferdClient,
}

impl DaemonBridge {
    pub fn new(client: TransferdClient) -> Self {
        Self { client }
    }
}

impl DaemonConnection for DaemonBridge {
    fn start_transfer(
        &self,
        request: &StartTransferRequest,
    ) -> Pin<Box<dyn Future<Output = Result<StartTransferResponse, UploadError>> + Send + '_>>
    {
        let request = request.clone();
        Box::pin(async move {
            self.client
                .start_transfer(&request)
                .await
                .map_err(submission_error)
        })
    }

    fn monitor_transfers(
        &self,
        request: &RegistrationRequest,
    ) -> Pin<
        Box<dyn Future<Output = Result<mpsc::Receiver<TransferEvent>, UploadError>> + Send + '_>,
    > {
        let request = request.clone();
        Box::pin(async move {
            self.client
                .monitor_transfers(&request)
                .await
                .map_err(|e| UploadError::Monitoring(e.to_string()))
        })
    }
}

/// Maps client failures during submission, keeping the daemon's own
/// message verbatim so hint matching works on it.
fn submission_error(e: ClientError) -> UploadError {
    match e {
        ClientError::Daemon { message, .. } => UploadError::Submission(message),
        other => UploadError::Submission(other.to_string()),
    }
}
