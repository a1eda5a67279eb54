//! Upload orchestration pipeline: discover → build spec → submit → monitor.
//!
//! This crate implements the **business logic** for uploading video files
//! to COS through the local transfer daemon. It is a library crate with no
//! transport dependency — the CLI provides a [`DaemonConnection`]
//! implementation that bridges to the actual WebSocket client.
//!
//! # Pipeline
//!
//! 1. **Discover** — `coslift-discovery` finds and validates source files
//! 2. **Build** — [`spec::build_transfer_spec`] produces the daemon document
//! 3. **Submit** — [`UploadSession`] validates credentials and starts the transfer
//! 4. **Monitor** — [`ProgressMonitor`] consumes status events to a terminal outcome

pub mod config;
pub mod daemon;
pub mod error;
pub mod monitor;
pub mod session;
pub mod spec;

// Re-export primary types for convenience.
pub use config::UploadConfig;
pub use daemon::DaemonConnection;
pub use error::{UploadError, destination_hint};
pub use monitor::{MonitorOutcome, ProgressMonitor, ProgressSample, WATCHDOG_TIMEOUT};
pub use session::UploadSession;
pub use spec::build_transfer_spec;
