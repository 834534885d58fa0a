//! Delegate-style metadata scanner surface (MTBBarcodeScanner-like).

use crate::MetadataObjectType;
use barcode_scan_core::ScanRect;
use barcode_scan_session::{CameraError, PermissionStatus};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureCamera {
    Back,
    Front,
}

/// One machine-readable code from a metadata batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataCode {
    pub object_type: MetadataObjectType,
    pub string_value: Option<String>,
}

/// Invoked once the capture session is running.
pub type DidStartBlock = Box<dyn FnOnce() + Send>;
/// Invoked once the capture session has stopped.
pub type DidStopBlock = Box<dyn FnOnce() + Send>;
/// Invoked for each batch of codes found in a frame.
pub type ResultBlock = Box<dyn FnMut(Vec<MetadataCode>) + Send>;

/// A capture-session backed scanner that reports metadata objects through
/// callbacks.
pub trait MetadataScanner: Send {
    /// Limit the metadata object types; `None` means every supported type.
    fn configure(&mut self, types: Option<Vec<MetadataObjectType>>);

    fn start_scanning(
        &mut self,
        camera: CaptureCamera,
        did_start: DidStartBlock,
        result: ResultBlock,
    ) -> Result<(), CameraError>;

    fn stop_scanning(&mut self, did_stop: DidStopBlock);

    fn is_scanning(&self) -> bool;

    /// Region of interest in preview-layer coordinates; an empty rectangle
    /// means the whole preview.
    fn set_scan_rect(&mut self, rect: ScanRect);

    fn has_torch(&self) -> bool;

    fn set_torch(&mut self, on: bool) -> Result<(), CameraError>;

    fn permission(&self) -> PermissionStatus;

    fn request_permission(&mut self, on_result: Box<dyn FnOnce(bool) + Send>);
}
