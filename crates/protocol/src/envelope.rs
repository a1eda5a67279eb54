//! JSON envelope framing every daemon message.

use serde::{Deserialize, Serialize};

use crate::constants::MessageType;

/// Error details carried in an envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaemonError {
    pub code: i32,
    pub message: String,
}

/// Envelope for all daemon communication.
///
/// `payload` uses `serde_json::value::RawValue` so the typed payload is
/// only deserialized once the message has been routed by `id`/`type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(rename = "type")]
    pub msg_type: MessageType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Box<serde_json::value::RawValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<DaemonError>,
}

impl Message {
    /// Creates a message with the given type and payload.
    pub fn new<T: Serialize>(
        id: impl Into<String>,
        msg_type: MessageType,
        payload: Option<&T>,
    ) -> Result<Self, serde_json::Error> {
        let raw = match payload {
            Some(p) => {
                let json = serde_json::to_string(p)?;
                Some(serde_json::value::RawValue::from_string(json)?)
            }
            None => None,
        };
        Ok(Self {
            id: id.into(),
            msg_type,
            payload: raw,
            error: None,
        })
    }

    /// Deserializes the payload into the given type.
    pub fn parse_payload<T: for<'de> Deserialize<'de>>(
        &self,
    ) -> Result<Option<T>, serde_json::Error> {
        match &self.payload {
            Some(raw) => Ok(Some(serde_json::from_str(raw.get())?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::StartTransferResponse;

    #[test]
    fn new_with_payload() {
        let payload = serde_json::json!({"transferId": "t-1"});
        let msg = Message::new("m-1", MessageType::StartTransfer, Some(&payload)).unwrap();
        assert_eq!(msg.id, "m-1");
        assert_eq!(msg.msg_type, MessageType::StartTransfer);
        assert!(msg.payload.is_some());
        assert!(msg.error.is_none());
    }

    #[test]
    fn new_without_payload() {
        let msg = Message::new::<()>("m-2", MessageType::Ping, None).unwrap();
        assert!(msg.payload.is_none());
    }

    #[test]
    fn parse_typed_payload() {
        let resp = StartTransferResponse {
            transfer_id: "abc-123".into(),
        };
        let msg = Message::new("m-3", MessageType::StartTransferResponse, Some(&resp)).unwrap();
        let parsed: Option<StartTransferResponse> = msg.parse_payload().unwrap();
        assert_eq!(parsed.unwrap().transfer_id, "abc-123");
    }

    #[test]
    fn omits_null_fields() {
        let msg = Message::new::<()>("m-4", MessageType::Pong, None).unwrap();
        let json = serde_json::to_string(&msg).unwrap();
        assert!(!json.contains("payload"));
        assert!(!json.contains("error"));
    }

    #[test]
    fn error_envelope_roundtrip() {
        let json = r#"{"id":"m-5","type":"error","error":{"code":400,"message":"bad spec"}}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.msg_type, MessageType::Error);
        let err = msg.error.unwrap();
        assert_eq!(err.code, 400);
        assert_eq!(err.message, "bad spec");
    }
}
