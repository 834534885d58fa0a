use crate::scanner::{CaptureCamera, MetadataCode, MetadataScanner, ResultBlock};
use crate::{MetadataObjectType, FORMAT_TABLE};
use barcode_scan_core::{CameraOptions, CameraSelection, FormatRestriction, ScanRect, Symbology};
use barcode_scan_session::{CameraCapability, CameraError, EventSink, PermissionStatus};
use log::debug;

/// [`CameraCapability`] over a delegate-callback [`MetadataScanner`].
///
/// Start and stop completion come from the scanner's own callbacks, on
/// whatever thread it uses.
pub struct AvCapability<S: MetadataScanner> {
    scanner: S,
    camera: CaptureCamera,
    events: Option<EventSink<MetadataObjectType>>,
}

impl<S: MetadataScanner> AvCapability<S> {
    pub fn new(scanner: S) -> Self {
        Self {
            scanner,
            camera: CaptureCamera::Back,
            events: None,
        }
    }

    #[inline]
    pub fn scanner(&self) -> &S {
        &self.scanner
    }

    #[inline]
    pub fn scanner_mut(&mut self) -> &mut S {
        &mut self.scanner
    }

    pub fn into_inner(self) -> S {
        self.scanner
    }
}

fn capture_camera(selection: CameraSelection) -> CaptureCamera {
    match selection {
        CameraSelection::Front => CaptureCamera::Front,
        CameraSelection::Default | CameraSelection::Back => CaptureCamera::Back,
    }
}

// Only the first code of a batch counts.
fn result_block(events: EventSink<MetadataObjectType>) -> ResultBlock {
    Box::new(move |codes: Vec<MetadataCode>| {
        if let Some(code) = codes.into_iter().next() {
            events.detected(code.object_type, code.string_value);
        }
    })
}

impl<S: MetadataScanner> CameraCapability for AvCapability<S> {
    type Format = MetadataObjectType;

    fn format_table(&self) -> &'static [(Symbology, MetadataObjectType)] {
        &FORMAT_TABLE
    }

    fn permission(&self) -> PermissionStatus {
        self.scanner.permission()
    }

    fn request_permission(&mut self, events: EventSink<MetadataObjectType>) {
        self.scanner.request_permission(events.permission_callback());
    }

    fn open(&mut self, options: &CameraOptions) -> Result<(), CameraError> {
        self.camera = capture_camera(options.camera);
        debug!(
            "capture camera {:?}; auto focus and aspect tolerance are managed by the platform",
            self.camera
        );
        Ok(())
    }

    fn set_restriction(&mut self, restriction: &FormatRestriction<MetadataObjectType>) {
        self.scanner
            .configure(restriction.formats().map(|types| types.to_vec()));
    }

    fn supports_scan_rect(&self) -> bool {
        true
    }

    fn set_scan_rect(&mut self, rect: ScanRect) {
        self.scanner.set_scan_rect(rect);
    }

    fn start(&mut self, events: EventSink<MetadataObjectType>) -> Result<(), CameraError> {
        if self.scanner.is_scanning() {
            debug!("scanner still running, stopping before restart");
            self.scanner.stop_scanning(Box::new(|| {}));
        }
        let started = events.clone();
        self.scanner.start_scanning(
            self.camera,
            Box::new(move || started.started()),
            result_block(events.clone()),
        )?;
        self.events = Some(events);
        Ok(())
    }

    fn stop(&mut self) {
        match self.events.take() {
            Some(events) => self.scanner.stop_scanning(Box::new(move || events.stopped())),
            None => {
                debug!("stop without a running capture session");
                self.scanner.stop_scanning(Box::new(|| {}));
            }
        }
    }

    fn has_torch(&self) -> bool {
        self.scanner.has_torch()
    }

    fn set_torch(&mut self, on: bool) -> Result<(), CameraError> {
        if !self.scanner.has_torch() {
            return Err(CameraError::TorchUnavailable);
        }
        self.scanner.set_torch(on)
    }
}
