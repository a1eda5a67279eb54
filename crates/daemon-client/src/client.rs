//! Connection handle for the local transfer daemon.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{Mutex, mpsc, oneshot};
use tokio_tungstenite::tungstenite;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use coslift_protocol::constants::{
    MessageType, WS_MAX_MESSAGE_SIZE, WS_PING_PERIOD, WS_REQUEST_TIMEOUT,
};
use coslift_protocol::envelope::Message;
use coslift_protocol::messages::{
    RegistrationRequest, StartTransferRequest, StartTransferResponse, TransferEvent,
};

use crate::router::{PendingMap, SubscriptionMap};

/// Errors from the daemon client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("WebSocket error: {0}")]
    Ws(#[from] tungstenite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request timed out")]
    Timeout,

    #[error("connection closed")]
    Closed,

    #[error("response missing payload")]
    MissingPayload,

    #[error("{message}")]
    Daemon { code: i32, message: String },
}

/// WebSocket client connected to a transfer daemon.
///
/// The daemon is assumed local and already running; a failed connect is
/// a setup error the caller treats as fatal, never retried. The handle
/// is exclusively owned by one upload run.
pub struct TransferdClient {
    write_tx: mpsc::Sender<tungstenite::Message>,
    pending: PendingMap,
    subscriptions: SubscriptionMap,
    cancel: CancellationToken,
    _read_handle: tokio::task::JoinHandle<()>,
    _write_handle: tokio::task::JoinHandle<()>,
    _ping_handle: tokio::task::JoinHandle<()>,
}

impl TransferdClient {
    /// Connects to the daemon at `host` (a `host:port` pair).
    pub async fn connect(host: &str) -> Result<Self, ClientError> {
        let url = format!("ws://{host}");
        let mut ws_config = tungstenite::protocol::WebSocketConfig::default();
        ws_config.max_message_size = Some(WS_MAX_MESSAGE_SIZE);
        ws_config.max_frame_size = Some(WS_MAX_MESSAGE_SIZE);

        let (ws_stream, _) =
            tokio_tungstenite::connect_async_with_config(&url, Some(ws_config), false).await?;
        info!(%host, "connected to transfer daemon");
        let (mut write, read) = ws_stream.split();

        let (write_tx, mut write_rx) = mpsc::channel::<tungstenite::Message>(256);
        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
        let subscriptions: SubscriptionMap = Arc::new(Mutex::new(HashMap::new()));
        let cancel = CancellationToken::new();

        let write_handle = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        frame = write_rx.recv() => {
                            match frame {
                                Some(frame) => {
                                    if let Err(e) = write.send(frame).await {
                                        error!("WebSocket write error: {e}");
                                        break;
                                    }
                                }
                                None => break,
                            }
                        }
                    }
                }
                let _ = write.send(tungstenite::Message::Close(None)).await;
            })
        };

        let read_handle = {
            let pending = pending.clone();
            let subscriptions = subscriptions.clone();
            let write_tx = write_tx.clone();
            let cancel = cancel.clone();
            tokio::spawn(crate::router::read_loop(
                read,
                pending,
                subscriptions,
                write_tx,
                cancel,
            ))
        };

        let ping_handle = {
            let write_tx = write_tx.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(WS_PING_PERIOD);
                interval.tick().await; // Skip the immediate first tick.
                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = interval.tick() => {
                            let ping = tungstenite::Message::Ping(vec![].into());
                            if write_tx.send(ping).await.is_err() {
                                break;
                            }
                        }
                    }
                }
            })
        };

        Ok(Self {
            write_tx,
            pending,
            subscriptions,
            cancel,
            _read_handle: read_handle,
            _write_handle: write_handle,
            _ping_handle: ping_handle,
        })
    }

    /// Sends a request and waits for the correlated response.
    pub async fn send_request<T: serde::Serialize>(
        &self,
        msg_type: MessageType,
        payload: Option<&T>,
    ) -> Result<Message, ClientError> {
        let id = uuid::Uuid::new_v4().to_string();
        let msg = Message::new(&id, msg_type, payload)?;
        let json = serde_json::to_string(&msg)?;

        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(id.clone(), tx);

        self.write_tx
            .send(tungstenite::Message::Text(json.into()))
            .await
            .map_err(|_| ClientError::Closed)?;

        let result = tokio::time::timeout(WS_REQUEST_TIMEOUT, rx).await;

        // Clean up the pending entry on any exit path.
        self.pending.lock().await.remove(&id);

        match result {
            Ok(Ok(resp)) => {
                if let Some(err) = &resp.error {
                    return Err(ClientError::Daemon {
                        code: err.code,
                        message: err.message.clone(),
                    });
                }
                Ok(resp)
            }
            Ok(Err(_)) => Err(ClientError::Closed),
            Err(_) => Err(ClientError::Timeout),
        }
    }

    /// Starts a transfer and returns the daemon's response.
    pub async fn start_transfer(
        &self,
        request: &StartTransferRequest,
    ) -> Result<StartTransferResponse, ClientError> {
        let resp = self
            .send_request(MessageType::StartTransfer, Some(request))
            .await?;
        resp.parse_payload()?.ok_or(ClientError::MissingPayload)
    }

    /// Registers a monitoring subscription and returns the event stream.
    ///
    /// Events for every transfer ID named in the request's filters are
    /// routed into the returned receiver. The stream ends when the
    /// connection drops; it is never re-registered automatically.
    pub async fn monitor_transfers(
        &self,
        request: &RegistrationRequest,
    ) -> Result<mpsc::Receiver<TransferEvent>, ClientError> {
        let ids: Vec<String> = request
            .filters
            .iter()
            .flat_map(|f| f.transfer_id.iter().cloned())
            .collect();

        let (tx, rx) = mpsc::channel(64);
        {
            let mut subs = self.subscriptions.lock().await;
            for id in &ids {
                subs.insert(id.clone(), tx.clone());
            }
        }

        match self
            .send_request(MessageType::MonitorTransfers, Some(request))
            .await
        {
            Ok(_ack) => Ok(rx),
            Err(e) => {
                let mut subs = self.subscriptions.lock().await;
                for id in &ids {
                    subs.remove(id);
                }
                Err(e)
            }
        }
    }

    /// Tears down the connection and all IO tasks.
    pub fn close(&self) {
        debug!("closing daemon connection");
        self.cancel.cancel();
    }
}

impl Drop for TransferdClient {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
