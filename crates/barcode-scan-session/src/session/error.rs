use super::SessionState;
use crate::CameraError;
use barcode_scan_core::{ConfigError, FormatTableError};

/// Errors returned to the code driving a session.
///
/// Fatal ones have already been reported to the host as an `Error` result
/// by the time the caller sees them.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    FormatTable(#[from] FormatTableError),
    #[error(transparent)]
    Camera(#[from] CameraError),
    #[error("session is not scanning (state: {0:?})")]
    NotScanning(SessionState),
}
