//! Protocol constants: message types, timeouts, daemon status codes.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Maximum accepted WebSocket message size (8 MiB).
pub const WS_MAX_MESSAGE_SIZE: usize = 8 * 1024 * 1024;

/// How long to wait for the daemon to answer a request.
pub const WS_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Keepalive ping interval.
pub const WS_PING_PERIOD: Duration = Duration::from_secs(20);

/// Deadline for any inbound traffic after a ping before the connection
/// is considered dead.
pub const WS_PONG_WAIT: Duration = Duration::from_secs(30);

// Daemon transfer status codes (transferd SDK numbering).
pub const STATUS_UNKNOWN: i32 = 0;
pub const STATUS_QUEUED: i32 = 1;
pub const STATUS_RUNNING: i32 = 2;
pub const STATUS_COMPLETED: i32 = 3;
pub const STATUS_FAILED: i32 = 4;
pub const STATUS_CANCELED: i32 = 5;
pub const STATUS_PAUSED: i32 = 6;

/// Type discriminator for envelope messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    #[serde(rename = "startTransfer")]
    StartTransfer,
    #[serde(rename = "startTransferResponse")]
    StartTransferResponse,
    #[serde(rename = "monitorTransfers")]
    MonitorTransfers,
    #[serde(rename = "monitorAck")]
    MonitorAck,
    #[serde(rename = "transferEvent")]
    TransferEvent,
    #[serde(rename = "ping")]
    Ping,
    #[serde(rename = "pong")]
    Pong,
    #[serde(rename = "error")]
    Error,
}
