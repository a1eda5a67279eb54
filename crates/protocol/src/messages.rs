//! Request, response, and event payloads for the two daemon operations.

use serde::{Deserialize, Serialize};

/// Category of transfer the daemon should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferType {
    #[serde(rename = "FILE_REGULAR")]
    FileRegular,
    #[serde(rename = "FILE_PERSISTENT")]
    FilePersistent,
}

/// Execution parameters for a transfer. Default values let the daemon
/// pick its own tuning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferConfig {
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub loglevel: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fasp_log_dir: String,
}

fn is_zero_i32(v: &i32) -> bool {
    *v == 0
}

/// Starts a transfer. The spec document travels as an opaque JSON string;
/// the daemon parses it on its side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTransferRequest {
    pub transfer_type: TransferType,
    pub config: TransferConfig,
    pub transfer_spec: String,
}

/// Daemon-assigned identifier for a started transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTransferResponse {
    pub transfer_id: String,
}

/// Scopes a monitoring subscription to specific transfer IDs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationFilter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transfer_id: Vec<String>,
}

/// Registers interest in transfer status events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<RegistrationFilter>,
}

impl RegistrationRequest {
    /// Builds a registration scoped to exactly one transfer ID.
    pub fn for_transfer(transfer_id: impl Into<String>) -> Self {
        Self {
            filters: vec![RegistrationFilter {
                transfer_id: vec![transfer_id.into()],
            }],
        }
    }
}

/// Byte-level progress embedded in an event. Absent on uninformative
/// ticks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferInfo {
    #[serde(default)]
    pub bytes_transferred: i64,
}

/// Status update pushed by the daemon for a monitored transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferEvent {
    pub transfer_id: String,
    pub status: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_info: Option<TransferInfo>,
}
