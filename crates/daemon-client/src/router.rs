//! Inbound message routing for the daemon connection.
//!
//! A single read loop owns the WebSocket receive half and dispatches
//! every frame: responses go to the pending-request map by envelope `id`,
//! `transferEvent` pushes go to the subscription registered for their
//! transfer ID, everything else is keepalive traffic.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::StreamExt;
use tokio::sync::{Mutex, mpsc, oneshot};
use tokio_tungstenite::tungstenite;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use coslift_protocol::constants::{MessageType, WS_MAX_MESSAGE_SIZE, WS_PONG_WAIT};
use coslift_protocol::envelope::Message;
use coslift_protocol::messages::TransferEvent;

pub(crate) type PendingMap = Arc<Mutex<HashMap<String, oneshot::Sender<Message>>>>;
pub(crate) type SubscriptionMap = Arc<Mutex<HashMap<String, mpsc::Sender<TransferEvent>>>>;

/// Reads frames from the WebSocket until cancellation, close, or a dead
/// connection.
///
/// Dead-connection detection: any inbound frame resets a deadline of
/// [`WS_PONG_WAIT`]; if nothing arrives in that window after our pings,
/// the connection is considered dead and the loop exits. On exit the
/// subscription map is cleared, which ends every monitoring stream.
pub(crate) async fn read_loop<S>(
    mut read: S,
    pending: PendingMap,
    subscriptions: SubscriptionMap,
    write_tx: mpsc::Sender<tungstenite::Message>,
    cancel: CancellationToken,
) where
    S: StreamExt<Item = Result<tungstenite::Message, tungstenite::Error>> + Unpin,
{
    let deadline = tokio::time::sleep(WS_PONG_WAIT);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,

            () = &mut deadline => {
                warn!("no traffic within pong deadline, connection dead");
                break;
            }

            frame = read.next() => {
                match frame {
                    Some(Ok(frame)) => {
                        deadline.as_mut().reset(tokio::time::Instant::now() + WS_PONG_WAIT);

                        match frame {
                            tungstenite::Message::Text(text) => {
                                dispatch_text(&text, &pending, &subscriptions).await;
                            }
                            tungstenite::Message::Ping(data) => {
                                trace!("ping from daemon");
                                let _ = write_tx.send(tungstenite::Message::Pong(data)).await;
                            }
                            tungstenite::Message::Pong(_) => {
                                trace!("pong from daemon");
                            }
                            tungstenite::Message::Close(_) => {
                                debug!("daemon sent close frame");
                                break;
                            }
                            _ => {} // Binary — the daemon never sends it.
                        }
                    }
                    Some(Err(e)) => {
                        warn!("WebSocket read error: {e}");
                        break;
                    }
                    None => {
                        debug!("WebSocket stream ended");
                        break;
                    }
                }
            }
        }
    }

    // Dropping the senders ends every monitoring stream; consumers see
    // the channel close and treat it as a fatal monitoring condition.
    subscriptions.lock().await.clear();
    pending.lock().await.clear();
}

/// Routes a single text frame.
async fn dispatch_text(text: &str, pending: &PendingMap, subscriptions: &SubscriptionMap) {
    if text.len() > WS_MAX_MESSAGE_SIZE {
        warn!("message too large ({} bytes), dropping", text.len());
        return;
    }

    let msg: Message = match serde_json::from_str(text) {
        Ok(m) => m,
        Err(e) => {
            warn!("failed to parse daemon message: {e}");
            return;
        }
    };

    trace!(msg_type = ?msg.msg_type, id = %msg.id, "frame from daemon");

    // Response to a pending request?
    if let Some(tx) = pending.lock().await.remove(&msg.id) {
        let _ = tx.send(msg);
        return;
    }

    // Status push for a monitored transfer?
    if msg.msg_type == MessageType::TransferEvent {
        let event: TransferEvent = match msg.parse_payload() {
            Ok(Some(event)) => event,
            Ok(None) => {
                warn!(id = %msg.id, "transfer event without payload, dropping");
                return;
            }
            Err(e) => {
                warn!("failed to parse transfer event: {e}");
                return;
            }
        };

        let mut subs = subscriptions.lock().await;
        match subs.get(&event.transfer_id) {
            Some(tx) => {
                if tx.send(event.clone()).await.is_err() {
                    // Consumer dropped its receiver, stop routing to it.
                    subs.remove(&event.transfer_id);
                }
            }
            None => {
                trace!(transfer = %event.transfer_id, "event for unmonitored transfer, dropping");
            }
        }
        return;
    }

    debug!(msg_type = ?msg.msg_type, id = %msg.id, "unroutable message, dropping");
}
