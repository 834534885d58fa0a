#![allow(dead_code)]

use barcode_scan_core::{
    CameraOptions, FormatRestriction, NativeFormat, ScanOptions, ScanRect, Symbology, Viewport,
};
use barcode_scan_session::{
    CameraCapability, CameraError, ChannelHost, EventSink, HostReceiver, PermissionStatus,
    ScanSession, SessionSettings,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FakeFormat {
    Qr,
    Ean13,
    Code128,
    Codabar,
}

impl NativeFormat for FakeFormat {
    fn label(&self) -> &str {
        match self {
            FakeFormat::Qr => "QR",
            FakeFormat::Ean13 => "EAN_13",
            FakeFormat::Code128 => "CODE_128",
            FakeFormat::Codabar => "CODABAR",
        }
    }
}

pub const FAKE_TABLE: &[(Symbology, FakeFormat)] = &[
    (Symbology::Qr, FakeFormat::Qr),
    (Symbology::Ean13, FakeFormat::Ean13),
    (Symbology::Code128, FakeFormat::Code128),
];

/// Scriptable camera that records what the session asked of it.
pub struct FakeCamera {
    pub permission: PermissionStatus,
    /// Answer permission requests immediately with this value.
    pub answer_permission: Option<bool>,
    pub confirm_start: bool,
    pub confirm_stop: bool,
    pub open_error: Option<CameraError>,
    pub start_error: Option<CameraError>,
    pub torch: bool,
    pub scan_rect_support: bool,

    pub opened: Vec<CameraOptions>,
    pub restriction: Option<FormatRestriction<FakeFormat>>,
    pub scan_rects: Vec<ScanRect>,
    pub starts: usize,
    pub permission_requests: usize,
    pub torch_on: bool,
    /// Set by a successful `open`, cleared by `stop`.
    pub held: bool,
    pub stops: Arc<AtomicUsize>,
    pub sink: Option<EventSink<FakeFormat>>,
}

impl Default for FakeCamera {
    fn default() -> Self {
        Self {
            permission: PermissionStatus::Granted,
            answer_permission: None,
            confirm_start: true,
            confirm_stop: true,
            open_error: None,
            start_error: None,
            torch: false,
            scan_rect_support: false,
            opened: Vec::new(),
            restriction: None,
            scan_rects: Vec::new(),
            starts: 0,
            permission_requests: 0,
            torch_on: false,
            held: false,
            stops: Arc::new(AtomicUsize::new(0)),
            sink: None,
        }
    }
}

impl FakeCamera {
    pub fn stop_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.stops)
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

impl CameraCapability for FakeCamera {
    type Format = FakeFormat;

    fn format_table(&self) -> &'static [(Symbology, FakeFormat)] {
        FAKE_TABLE
    }

    fn permission(&self) -> PermissionStatus {
        self.permission
    }

    fn request_permission(&mut self, events: EventSink<FakeFormat>) {
        self.permission_requests += 1;
        if let Some(granted) = self.answer_permission {
            events.permission_resolved(granted);
        }
    }

    fn open(&mut self, options: &CameraOptions) -> Result<(), CameraError> {
        self.opened.push(*options);
        match &self.open_error {
            Some(err) => Err(err.clone()),
            None => {
                self.held = true;
                Ok(())
            }
        }
    }

    fn set_restriction(&mut self, restriction: &FormatRestriction<FakeFormat>) {
        self.restriction = Some(restriction.clone());
    }

    fn supports_scan_rect(&self) -> bool {
        self.scan_rect_support
    }

    fn set_scan_rect(&mut self, rect: ScanRect) {
        self.scan_rects.push(rect);
    }

    fn start(&mut self, events: EventSink<FakeFormat>) -> Result<(), CameraError> {
        self.starts += 1;
        if let Some(err) = &self.start_error {
            return Err(err.clone());
        }
        if self.confirm_start {
            events.started();
        }
        self.sink = Some(events);
        Ok(())
    }

    fn stop(&mut self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.held = false;
        if self.confirm_stop {
            if let Some(sink) = &self.sink {
                sink.stopped();
            }
        }
    }

    fn has_torch(&self) -> bool {
        self.torch
    }

    fn set_torch(&mut self, on: bool) -> Result<(), CameraError> {
        if !self.torch {
            return Err(CameraError::TorchUnavailable);
        }
        self.torch_on = on;
        Ok(())
    }
}

pub type FakeSession = ScanSession<FakeCamera, ChannelHost>;

pub fn portrait() -> Viewport {
    Viewport::new(400.0, 800.0)
}

pub fn options_for(formats: &[Symbology]) -> ScanOptions {
    ScanOptions {
        restrict_formats: formats.to_vec(),
        ..ScanOptions::default()
    }
}

pub fn session_with(
    camera: FakeCamera,
    options: ScanOptions,
    settings: SessionSettings,
) -> (FakeSession, HostReceiver) {
    let (host, rx) = ChannelHost::new();
    let session = ScanSession::new(&options.encode(), camera, host, settings, portrait())
        .expect("valid configuration");
    (session, rx)
}

pub fn session(camera: FakeCamera) -> (FakeSession, HostReceiver) {
    session_with(camera, ScanOptions::default(), SessionSettings::default())
}

/// Resume and drain until the camera reports it is live.
pub fn scanning(camera: FakeCamera) -> (FakeSession, HostReceiver) {
    let (mut session, rx) = session(camera);
    session.resume();
    session.pump();
    (session, rx)
}
