//! Blocking driver for hosts without their own event loop.

use barcode_scan_core::ScanResult;
use barcode_scan_session::{CameraCapability, HostChannel, ScanSession, SessionState};
use log::{debug, warn};
use std::time::{Duration, Instant};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Longest single wait between deadline checks.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveError {
    #[error("scan session still {state:?} after {waited:?}")]
    TimedOut { state: SessionState, waited: Duration },
}

/// Apply engine events until the session terminates or `timeout` passes.
///
/// Returns the reported result, or `None` for a session torn down without
/// one. On timeout the session is left as it is; the caller decides whether
/// to cancel it.
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip(session)))]
pub fn run_until_terminated<C, H>(
    session: &mut ScanSession<C, H>,
    timeout: Duration,
) -> Result<Option<ScanResult>, DriveError>
where
    C: CameraCapability,
    H: HostChannel,
{
    let started = Instant::now();
    let deadline = started + timeout;
    session.pump();
    while !session.is_terminated() {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            warn!("scan session did not finish within {timeout:?}");
            return Err(DriveError::TimedOut {
                state: session.state(),
                waited: started.elapsed(),
            });
        }
        if session.wait_event(remaining.min(POLL_INTERVAL)) {
            session.pump();
        }
    }
    debug!("scan session finished after {:?}", started.elapsed());
    Ok(session.pending_result().cloned())
}
