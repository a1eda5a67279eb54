//! Semantic interpretation of daemon status codes.

use std::fmt;

use crate::constants::{
    STATUS_COMPLETED, STATUS_FAILED, STATUS_PAUSED, STATUS_QUEUED, STATUS_RUNNING,
};

/// Semantic state of a transfer as seen by this client.
///
/// The daemon's status codes are an open-ended integer domain; codes we
/// do not recognize map to [`TransferState::Unknown`] rather than being
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferState {
    /// Accepted by the daemon, no status event seen yet.
    Submitted,
    Queued,
    Running,
    Completed,
    Failed,
    Paused,
    /// Local observation gave up; the remote transfer may still be running.
    TimedOut,
    Unknown(i32),
}

impl TransferState {
    /// Maps a raw daemon status code to a semantic state.
    pub fn from_code(code: i32) -> Self {
        match code {
            STATUS_QUEUED => Self::Queued,
            STATUS_RUNNING => Self::Running,
            STATUS_COMPLETED => Self::Completed,
            STATUS_FAILED => Self::Failed,
            STATUS_PAUSED => Self::Paused,
            other => Self::Unknown(other),
        }
    }

    /// True when no further status events are expected.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::TimedOut)
    }
}

impl fmt::Display for TransferState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submitted => write!(f, "Submitted"),
            Self::Queued => write!(f, "Queued"),
            Self::Running => write!(f, "Running"),
            Self::Completed => write!(f, "Completed"),
            Self::Failed => write!(f, "Failed"),
            Self::Paused => write!(f, "Paused"),
            Self::TimedOut => write!(f, "Timed out"),
            Self::Unknown(code) => write!(f, "Unknown ({code})"),
        }
    }
}
