//! Transport seam between upload logic and the daemon client.

use std::future::Future;
use std::pin::Pin;

use coslift_protocol::messages::{
    RegistrationRequest, StartTransferRequest, StartTransferResponse, TransferEvent,
};
use tokio::sync::mpsc;

use crate::error::UploadError;

/// Abstract connection to the local transfer daemon.
///
/// The CLI implements this trait on top of the WebSocket client. Using a
/// trait keeps session and monitoring logic decoupled from transport and
/// testable with scripted mocks.
pub trait DaemonConnection: Send + Sync {
    /// Starts a transfer and returns the daemon's response.
    fn start_transfer(
        &self,
        request: &StartTransferRequest,
    ) -> Pin<Box<dyn Future<Output = Result<StartTransferResponse, UploadError>> + Send + '_>>;

    /// Opens a status-event subscription scoped by the request's filters.
    ///
    /// The returned receiver is a lazy sequence: events arrive as the
    /// daemon emits them and stop when the connection drops. A dropped
    /// stream is not re-registered automatically.
    fn monitor_transfers(
        &self,
        request: &RegistrationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<mpsc::Receiver<TransferEvent>, UploadError>> + Send + '_>>;
}
