//! Wire protocol types for the local transfer daemon.
//!
//! The daemon speaks JSON envelopes over a WebSocket: every frame is a
//! [`envelope::Message`] carrying a typed payload. Two operations matter
//! to us: `startTransfer` (one-shot request/response) and
//! `monitorTransfers` (register a filter, then receive `transferEvent`
//! pushes for the matching transfer).
//!
//! The transfer-spec document itself ([`spec::TransferSpec`]) is opaque to
//! the envelope layer — it travels as a JSON string inside
//! [`messages::StartTransferRequest`] and its field-level shape is a
//! compatibility contract with the daemon.

pub mod constants;
pub mod envelope;
pub mod messages;
pub mod spec;
pub mod types;

pub use constants::MessageType;
pub use envelope::Message;
pub use messages::{
    RegistrationFilter, RegistrationRequest, StartTransferRequest, StartTransferResponse,
    TransferEvent, TransferInfo, TransferType,
};
pub use spec::TransferSpec;
pub use types::TransferState;
