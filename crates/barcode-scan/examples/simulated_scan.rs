//! Runs one scan session against a simulated format-filtered widget that
//! "decodes" the payload given on the command line after a short delay.

use barcode_scan::session::{CameraError, ChannelHost, PermissionStatus};
use barcode_scan::zxing::{RawResult, ResultHandler, ScannerView, ZxingCapability, ZxingFormat};
use barcode_scan::{
    run_until_terminated, ScanOptions, ScanSession, SessionSettings, Symbology, Viewport,
};
use std::thread;
use std::time::Duration;

#[cfg(feature = "tracing")]
use barcode_scan::core::init_tracing;
#[cfg(not(feature = "tracing"))]
use barcode_scan::core::init_with_level;
#[cfg(not(feature = "tracing"))]
use log::LevelFilter;

struct SimulatedView {
    payload: String,
    handler: Option<ResultHandler>,
}

impl ScannerView for SimulatedView {
    fn set_formats(&mut self, formats: &[ZxingFormat]) {
        println!("widget restricted to {formats:?}");
    }
    fn set_auto_focus(&mut self, _enabled: bool) {}
    fn set_aspect_tolerance(&mut self, _tolerance: f32) {}
    fn set_result_handler(&mut self, handler: ResultHandler) {
        self.handler = Some(handler);
    }
    fn start_camera(&mut self, _camera_id: Option<i32>) -> Result<(), CameraError> {
        let Some(mut handler) = self.handler.take() else {
            return Err(CameraError::Unavailable("no result handler".into()));
        };
        let text = self.payload.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(300));
            handler(Some(RawResult {
                format: ZxingFormat::QrCode,
                text,
            }));
        });
        Ok(())
    }
    fn stop_camera(&mut self) {}
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

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    init_tracing(false);
    #[cfg(not(feature = "tracing"))]
    init_with_level(LevelFilter::Debug)?;

    let payload = std::env::args().nth(1).unwrap_or_else(|| "HELLO".to_string());
    let config = ScanOptions {
        restrict_formats: vec![Symbology::Qr],
        ..ScanOptions::default()
    }
    .encode();

    let view = SimulatedView {
        payload,
        handler: None,
    };
    let (host, results) = ChannelHost::new();
    let mut session = ScanSession::new(
        &config,
        ZxingCapability::new(view),
        host,
        SessionSettings::simulated(),
        Viewport::new(390.0, 844.0),
    )?;
    session.resume();

    let result = run_until_terminated(&mut session, Duration::from_secs(5))?;
    println!("session result: {result:?}");
    println!("host received: {:?}", results.take_results()?);
    Ok(())
}
