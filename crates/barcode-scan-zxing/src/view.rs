//! The view surface a ZXing-style scanner widget exposes.

use crate::ZxingFormat;
use barcode_scan_session::{CameraError, PermissionStatus};

/// One decode delivered by the widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResult {
    pub format: ZxingFormat,
    pub text: String,
}

/// Callback the widget invokes per decode. `None` means the widget fired
/// without any decoded data.
pub type ResultHandler = Box<dyn FnMut(Option<RawResult>) + Send>;

/// A scanner widget that decodes frames itself and filters by format.
///
/// Camera ids follow the platform convention: `None` lets the widget pick,
/// `Some(0)` is the back camera and `Some(1)` the front camera.
pub trait ScannerView: Send {
    /// Restrict decoding; never called with an empty list.
    fn set_formats(&mut self, formats: &[ZxingFormat]);

    fn set_auto_focus(&mut self, enabled: bool);

    fn set_aspect_tolerance(&mut self, tolerance: f32);

    fn set_result_handler(&mut self, handler: ResultHandler);

    fn start_camera(&mut self, camera_id: Option<i32>) -> Result<(), CameraError>;

    /// Stops the preview synchronously.
    fn stop_camera(&mut self);

    fn has_flash(&self) -> bool;

    fn set_flash(&mut self, on: bool);

    fn permission(&self) -> PermissionStatus;

    fn request_permission(&mut self, on_result: Box<dyn FnOnce(bool) + Send>);
}
