//! WebSocket client for the local transfer daemon.
//!
//! Implements the request-response pattern with UUID correlation plus
//! per-transfer event subscriptions for monitoring, with ping/pong
//! keepalive and dead-connection detection.

pub mod client;
pub(crate) mod router;

pub use client::{ClientError, TransferdClient};
