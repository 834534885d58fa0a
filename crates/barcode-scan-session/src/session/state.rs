use serde::{Deserialize, Serialize};

/// Lifecycle state of a scan session.
///
/// ```text
/// Idle -> [AwaitingPermission] -> Starting -> Scanning -> Stopping -> Terminated
///   ^                                                        |
///   +---------------------- pause ---------------------------+
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    AwaitingPermission,
    Starting,
    Scanning,
    Stopping,
    Terminated,
}

impl SessionState {
    /// States in which the native camera may be running.
    #[inline]
    pub fn camera_live(self) -> bool {
        matches!(self, SessionState::Starting | SessionState::Scanning)
    }

    #[inline]
    pub fn is_terminated(self) -> bool {
        self == SessionState::Terminated
    }
}

/// Why the camera is being stopped; decides where `Stopping` leads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum StopReason {
    /// Backgrounded: back to `Idle`, no result.
    Pause,
    /// A result is queued (scan, cancel, error).
    Finish,
    /// The host view is going away.
    Teardown,
}

impl StopReason {
    /// Combine with a later request; finishing or teardown outranks a pause.
    #[inline]
    pub(crate) fn merge(self, later: StopReason) -> StopReason {
        self.max(later)
    }
}
