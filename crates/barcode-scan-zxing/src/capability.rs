use crate::view::{RawResult, ResultHandler, ScannerView};
use crate::{ZxingFormat, FORMAT_TABLE};
use barcode_scan_core::{CameraOptions, CameraSelection, FormatRestriction, Symbology};
use barcode_scan_session::{CameraCapability, CameraError, EventSink, PermissionStatus};
use log::debug;

/// Error text for a widget callback that carried no decoded data.
pub const NO_DATA_SCANNED: &str = "No data was scanned";

/// [`CameraCapability`] over a format-filtered [`ScannerView`].
///
/// The widget starts and stops synchronously, so `Started` and `Stopped`
/// are emitted right after the corresponding call returns.
pub struct ZxingCapability<V: ScannerView> {
    view: V,
    camera_id: Option<i32>,
    events: Option<EventSink<ZxingFormat>>,
}

impl<V: ScannerView> ZxingCapability<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            camera_id: None,
            events: None,
        }
    }

    #[inline]
    pub fn view(&self) -> &V {
        &self.view
    }

    #[inline]
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_inner(self) -> V {
        self.view
    }
}

fn camera_id(selection: CameraSelection) -> Option<i32> {
    match selection {
        CameraSelection::Default => None,
        CameraSelection::Back => Some(0),
        CameraSelection::Front => Some(1),
    }
}

fn result_handler(events: EventSink<ZxingFormat>) -> ResultHandler {
    Box::new(move |raw: Option<RawResult>| match raw {
        Some(RawResult { format, text }) => events.detected(format, Some(text)),
        None => events.failed(CameraError::Native(NO_DATA_SCANNED.to_string())),
    })
}

impl<V: ScannerView> CameraCapability for ZxingCapability<V> {
    type Format = ZxingFormat;

    fn format_table(&self) -> &'static [(Symbology, ZxingFormat)] {
        &FORMAT_TABLE
    }

    fn permission(&self) -> PermissionStatus {
        self.view.permission()
    }

    fn request_permission(&mut self, events: EventSink<ZxingFormat>) {
        self.view.request_permission(events.permission_callback());
    }

    fn open(&mut self, options: &CameraOptions) -> Result<(), CameraError> {
        self.view.set_auto_focus(options.auto_focus);
        if options.aspect_tolerance > 0.0 {
            self.view.set_aspect_tolerance(options.aspect_tolerance as f32);
        }
        self.camera_id = camera_id(options.camera);
        Ok(())
    }

    fn set_restriction(&mut self, restriction: &FormatRestriction<ZxingFormat>) {
        match restriction.formats() {
            Some(formats) => self.view.set_formats(formats),
            None => debug!("no format restriction, widget decodes everything"),
        }
    }

    fn start(&mut self, events: EventSink<ZxingFormat>) -> Result<(), CameraError> {
        self.view.set_result_handler(result_handler(events.clone()));
        self.view.start_camera(self.camera_id)?;
        events.started();
        self.events = Some(events);
        Ok(())
    }

    fn stop(&mut self) {
        self.view.stop_camera();
        match self.events.take() {
            Some(events) => events.stopped(),
            None => debug!("stop without a running camera"),
        }
    }

    fn has_torch(&self) -> bool {
        self.view.has_flash()
    }

    fn set_torch(&mut self, on: bool) -> Result<(), CameraError> {
        if !self.view.has_flash() {
            return Err(CameraError::TorchUnavailable);
        }
        self.view.set_flash(on);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barcode_scan_session::{CapabilityEvent, Detection};

    #[derive(Default)]
    struct RecordingView {
        formats: Option<Vec<ZxingFormat>>,
        auto_focus: Option<bool>,
        tolerance: Option<f32>,
        started_with: Option<Option<i32>>,
        stopped: usize,
        handler: Option<ResultHandler>,
        fail_start: bool,
    }

    impl ScannerView for RecordingView {
        fn set_formats(&mut self, formats: &[ZxingFormat]) {
            self.formats = Some(formats.to_vec());
        }
        fn set_auto_focus(&mut self, enabled: bool) {
            self.auto_focus = Some(enabled);
        }
        fn set_aspect_tolerance(&mut self, tolerance: f32) {
            self.tolerance = Some(tolerance);
        }
        fn set_result_handler(&mut self, handler: ResultHandler) {
            self.handler = Some(handler);
        }
        fn start_camera(&mut self, camera_id: Option<i32>) -> Result<(), CameraError> {
            if self.fail_start {
                return Err(CameraError::Unavailable("in use".into()));
            }
            self.started_with = Some(camera_id);
            Ok(())
        }
        fn stop_camera(&mut self) {
            self.stopped += 1;
        }
        fn has_flash(&self) -> bool {
            false
        }
        fn set_flash(&mut self, _on: bool) {}
        fn permission(&self) -> PermissionStatus {
            PermissionStatus::Granted
        }
        fn request_permission(&mut self, on_result: Box<dyn FnOnce(bool) + Send>) {
            on_result(true);
        }
    }

    fn options(camera: CameraSelection, aspect_tolerance: f64) -> CameraOptions {
        CameraOptions {
            camera,
            auto_focus: true,
            aspect_tolerance,
        }
    }

    #[test]
    fn open_configures_the_widget() {
        let mut cap = ZxingCapability::new(RecordingView::default());
        cap.open(&options(CameraSelection::Front, 0.5)).expect("open");
        cap.set_restriction(&FormatRestriction::Only(vec![ZxingFormat::QrCode]));
        let (events, rx) = EventSink::channel();
        cap.start(events).expect("start");

        let view = cap.view();
        assert_eq!(view.auto_focus, Some(true));
        assert_eq!(view.tolerance, Some(0.5));
        assert_eq!(view.started_with, Some(Some(1)));
        assert_eq!(view.formats, Some(vec![ZxingFormat::QrCode]));
        assert_eq!(rx.try_recv().ok(), Some(CapabilityEvent::Started));
    }

    #[test]
    fn defaults_leave_the_widget_alone() {
        let mut cap = ZxingCapability::new(RecordingView::default());
        cap.open(&options(CameraSelection::Default, 0.0)).expect("open");
        cap.set_restriction(&FormatRestriction::All);
        let (events, _rx) = EventSink::channel();
        cap.start(events).expect("start");

        assert_eq!(cap.view().tolerance, None);
        assert_eq!(cap.view().formats, None);
        assert_eq!(cap.view().started_with, Some(None));
    }

    #[test]
    fn widget_callbacks_become_events() {
        let mut cap = ZxingCapability::new(RecordingView::default());
        cap.open(&options(CameraSelection::Back, 0.0)).expect("open");
        let (events, rx) = EventSink::channel();
        cap.start(events).expect("start");

        let handler = cap.view_mut().handler.as_mut().expect("handler installed");
        handler(Some(RawResult {
            format: ZxingFormat::Ean13,
            text: "4006381333931".into(),
        }));
        handler(None);
        cap.stop();

        let got: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            got,
            vec![
                CapabilityEvent::Started,
                CapabilityEvent::Detected(Detection {
                    format: ZxingFormat::Ean13,
                    value: Some("4006381333931".into()),
                }),
                CapabilityEvent::Failed(CameraError::Native(NO_DATA_SCANNED.into())),
                CapabilityEvent::Stopped,
            ]
        );
        assert_eq!(cap.view().stopped, 1);
    }

    #[test]
    fn failed_start_emits_nothing() {
        let mut cap = ZxingCapability::new(RecordingView {
            fail_start: true,
            ..RecordingView::default()
        });
        let (events, rx) = EventSink::channel();
        assert_eq!(
            cap.start(events),
            Err(CameraError::Unavailable("in use".into()))
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn torch_needs_a_flash() {
        let mut cap = ZxingCapability::new(RecordingView::default());
        assert!(!cap.has_torch());
        assert_eq!(cap.set_torch(true), Err(CameraError::TorchUnavailable));
    }
}
