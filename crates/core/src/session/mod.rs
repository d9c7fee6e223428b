//! The singleton relay session and its supervisor.
//!
//! At most one relay process exists at a time. The supervisor owns the
//! session record, serializes every mutation of it, and reacts to process
//! exit asynchronously; see [`StreamSupervisor`].

mod cleanup;
mod supervisor;

pub use cleanup::remove_upload;
pub use supervisor::StreamSupervisor;

use serde::Serialize;

/// Lifecycle phase of the relay session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Starting,
    Running,
    Stopping,
    Crashed,
}

impl Phase {
    /// Whether a relay process is registered in this phase.
    pub fn is_active(self) -> bool {
        matches!(self, Phase::Starting | Phase::Running | Phase::Stopping)
    }
}

/// Read-only view of the session state, safe to expose to any caller.
///
/// Deliberately narrow: no stream key, no asset path, no process id.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub is_streaming: bool,
    pub has_stream_key: bool,
}

/// Result of a stop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// An active relay was signaled to terminate.
    Stopped,
    /// There was nothing to stop.
    NoActiveSession,
}
