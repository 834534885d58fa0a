//! End-to-end sessions over both engine adapters, with engine callbacks
//! arriving on their own threads.

use barcode_scan::avfoundation::{
    AvCapability, CaptureCamera, DidStartBlock, DidStopBlock, MetadataCode, MetadataObjectType,
    MetadataScanner, ResultBlock,
};
use barcode_scan::core::{wire, ScanRect, PERMISSION_NOT_GRANTED};
use barcode_scan::session::{
    CameraError, ChannelHost, HostMessage, HostReceiver, PermissionStatus,
};
use barcode_scan::zxing::{RawResult, ResultHandler, ScannerView, ZxingCapability, ZxingFormat};
use barcode_scan::{
    run_until_terminated, DriveError, ScanResult, ScanSession, SessionSettings, SessionState,
    Symbology, Viewport,
};
use prost::Message;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

fn viewport() -> Viewport {
    Viewport::new(390.0, 844.0)
}

#[derive(Default)]
struct ViewLog {
    formats: Option<Vec<ZxingFormat>>,
    camera_id: Option<Option<i32>>,
    stops: usize,
}

/// Widget that "decodes" a scripted frame on a worker thread.
struct ThreadedView {
    log: Arc<Mutex<ViewLog>>,
    decode: Option<Option<RawResult>>,
    handler: Option<ResultHandler>,
}

impl ThreadedView {
    fn new(decode: Option<Option<RawResult>>) -> (Self, Arc<Mutex<ViewLog>>) {
        let log = Arc::new(Mutex::new(ViewLog::default()));
        let view = Self {
            log: Arc::clone(&log),
            decode,
            handler: None,
        };
        (view, log)
    }
}

impl ScannerView for ThreadedView {
    fn set_formats(&mut self, formats: &[ZxingFormat]) {
        self.log.lock().expect("log").formats = Some(formats.to_vec());
    }
    fn set_auto_focus(&mut self, _enabled: bool) {}
    fn set_aspect_tolerance(&mut self, _tolerance: f32) {}
    fn set_result_handler(&mut self, handler: ResultHandler) {
        self.handler = Some(handler);
    }
    fn start_camera(&mut self, camera_id: Option<i32>) -> Result<(), CameraError> {
        self.log.lock().expect("log").camera_id = Some(camera_id);
        if let (Some(decode), Some(mut handler)) = (self.decode.take(), self.handler.take()) {
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(10));
                handler(decode);
            });
        }
        Ok(())
    }
    fn stop_camera(&mut self) {
        self.log.lock().expect("log").stops += 1;
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

/// Capture-session scanner whose callbacks all fire on worker threads.
struct ThreadedScanner {
    permission: PermissionStatus,
    grant: bool,
    codes: Option<Vec<MetadataCode>>,
    scanning: bool,
}

impl ThreadedScanner {
    fn new(codes: Option<Vec<MetadataCode>>) -> Self {
        Self {
            permission: PermissionStatus::Granted,
            grant: true,
            codes,
            scanning: false,
        }
    }
}

impl MetadataScanner for ThreadedScanner {
    fn configure(&mut self, _types: Option<Vec<MetadataObjectType>>) {}
    fn start_scanning(
        &mut self,
        _camera: CaptureCamera,
        did_start: DidStartBlock,
        mut result: ResultBlock,
    ) -> Result<(), CameraError> {
        self.scanning = true;
        let codes = self.codes.take();
        thread::spawn(move || {
            did_start();
            if let Some(codes) = codes {
                thread::sleep(Duration::from_millis(10));
                result(codes);
            }
        });
        Ok(())
    }
    fn stop_scanning(&mut self, did_stop: DidStopBlock) {
        self.scanning = false;
        thread::spawn(did_stop);
    }
    fn is_scanning(&self) -> bool {
        self.scanning
    }
    fn set_scan_rect(&mut self, _rect: ScanRect) {}
    fn has_torch(&self) -> bool {
        false
    }
    fn set_torch(&mut self, _on: bool) -> Result<(), CameraError> {
        Err(CameraError::TorchUnavailable)
    }
    fn permission(&self) -> PermissionStatus {
        self.permission
    }
    fn request_permission(&mut self, on_result: Box<dyn FnOnce(bool) + Send>) {
        let grant = self.grant;
        thread::spawn(move || on_result(grant));
    }
}

fn config(use_camera: i32, restrict: &[Symbology]) -> Vec<u8> {
    wire::Configuration {
        use_camera,
        restrict_format: restrict.iter().map(|s| *s as i32).collect(),
        ..Default::default()
    }
    .encode_to_vec()
}

fn reported_once(rx: &HostReceiver) -> ScanResult {
    let messages = rx.drain();
    assert_eq!(messages.len(), 2, "one result then dismiss: {messages:?}");
    assert_eq!(messages[1], HostMessage::Dismissed);
    match &messages[0] {
        HostMessage::Result(bytes) => ScanResult::decode(bytes).expect("decode"),
        other => panic!("expected a result, got {other:?}"),
    }
}

#[test]
fn front_camera_qr_scan_on_a_format_filtered_engine() {
    let (view, log) = ThreadedView::new(Some(Some(RawResult {
        format: ZxingFormat::QrCode,
        text: "HELLO".into(),
    })));
    let (host, rx) = ChannelHost::new();
    let mut session = ScanSession::new(
        &config(1, &[Symbology::Qr]),
        ZxingCapability::new(view),
        host,
        SessionSettings::default(),
        viewport(),
    )
    .expect("session");
    session.resume();

    let result = run_until_terminated(&mut session, TIMEOUT).expect("finished");
    let expected = ScanResult::Barcode {
        format: Symbology::Qr,
        format_note: String::new(),
        raw_content: "HELLO".into(),
    };
    assert_eq!(result, Some(expected.clone()));
    assert_eq!(reported_once(&rx), expected);

    let log = log.lock().expect("log");
    assert_eq!(log.formats, Some(vec![ZxingFormat::QrCode]));
    assert_eq!(log.camera_id, Some(Some(1)));
    assert_eq!(log.stops, 1);
}

#[test]
fn empty_widget_callback_is_an_error() {
    let (view, _log) = ThreadedView::new(Some(None));
    let (host, rx) = ChannelHost::new();
    let mut session = ScanSession::new(
        &config(-1, &[]),
        ZxingCapability::new(view),
        host,
        SessionSettings::default(),
        viewport(),
    )
    .expect("session");
    session.resume();

    run_until_terminated(&mut session, TIMEOUT).expect("finished");
    assert_eq!(reported_once(&rx), ScanResult::error("No data was scanned"));
}

#[test]
fn codabar_on_a_metadata_engine_is_unknown_with_a_note() {
    let scanner = ThreadedScanner::new(Some(vec![MetadataCode {
        object_type: MetadataObjectType::CODABAR,
        string_value: Some("123".into()),
    }]));
    let (host, rx) = ChannelHost::new();
    let mut session = ScanSession::new(
        &config(-1, &[]),
        AvCapability::new(scanner),
        host,
        SessionSettings::default(),
        viewport(),
    )
    .expect("session");
    session.resume();

    run_until_terminated(&mut session, TIMEOUT).expect("finished");
    assert_eq!(
        reported_once(&rx),
        ScanResult::Barcode {
            format: Symbology::Unknown,
            format_note: "Codabar".into(),
            raw_content: "123".into(),
        }
    );
}

#[test]
fn denied_permission_on_a_metadata_engine() {
    let scanner = ThreadedScanner {
        permission: PermissionStatus::NotDetermined,
        grant: false,
        ..ThreadedScanner::new(None)
    };
    let (host, rx) = ChannelHost::new();
    let mut session = ScanSession::new(
        &config(0, &[]),
        AvCapability::new(scanner),
        host,
        SessionSettings::default(),
        viewport(),
    )
    .expect("session");
    session.resume();
    assert_eq!(session.state(), SessionState::AwaitingPermission);

    run_until_terminated(&mut session, TIMEOUT).expect("finished");
    assert_eq!(reported_once(&rx), ScanResult::error(PERMISSION_NOT_GRANTED));
}

#[test]
fn cancel_while_scanning_waits_for_the_stop_callback() {
    let (host, rx) = ChannelHost::new();
    let mut session = ScanSession::new(
        &config(-1, &[]),
        AvCapability::new(ThreadedScanner::new(None)),
        host,
        SessionSettings::default(),
        viewport(),
    )
    .expect("session");
    session.resume();
    while session.state() != SessionState::Scanning {
        assert!(session.wait_event(TIMEOUT), "camera never started");
    }

    session.cancel();
    assert_eq!(session.state(), SessionState::Stopping);
    assert!(rx.drain().is_empty());

    let result = run_until_terminated(&mut session, TIMEOUT).expect("finished");
    assert_eq!(result, Some(ScanResult::Cancelled));
    assert_eq!(reported_once(&rx), ScanResult::Cancelled);
}

#[test]
fn driver_times_out_on_a_silent_engine() {
    let (view, _log) = ThreadedView::new(None);
    let (host, rx) = ChannelHost::new();
    let mut session = ScanSession::new(
        &config(-1, &[]),
        ZxingCapability::new(view),
        host,
        SessionSettings::default(),
        viewport(),
    )
    .expect("session");
    session.resume();

    let err = run_until_terminated(&mut session, Duration::from_millis(120))
        .expect_err("nothing decoded");
    assert!(matches!(
        err,
        DriveError::TimedOut {
            state: SessionState::Scanning,
            ..
        }
    ));
    assert!(rx.drain().is_empty());
}
