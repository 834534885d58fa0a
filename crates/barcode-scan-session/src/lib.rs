//! Scan session controller.
//!
//! A [`ScanSession`] owns one native [`CameraCapability`] for the lifetime of
//! a scanner view: it asks for camera permission, starts recognition with the
//! configured format restriction, keeps the overlay in sync with the view and
//! hands exactly one [`ScanResult`](barcode_scan_core::ScanResult) to the
//! host through a [`HostChannel`].
//!
//! ```no_run
//! use barcode_scan_session::{ChannelHost, ScanSession, SessionSettings};
//! # use barcode_scan_session::CameraCapability;
//! # use barcode_scan_core::Viewport;
//! # fn run<C: CameraCapability>(config: &[u8], camera: C) {
//! let (host, results) = ChannelHost::new();
//! let mut session = ScanSession::new(
//!     config,
//!     camera,
//!     host,
//!     SessionSettings::default(),
//!     Viewport::new(390.0, 844.0),
//! )
//! .expect("valid configuration");
//! session.resume();
//! while !session.is_terminated() {
//!     session.wait_event(std::time::Duration::from_millis(50));
//! }
//! let reported = results.take_results().expect("decodable result");
//! # let _ = reported;
//! # }
//! ```

mod capability;
mod reporter;
mod session;
mod settings;
mod slot;

pub use capability::{
    CameraCapability, CameraError, CapabilityEvent, Detection, EventSink, PermissionStatus,
};
pub use reporter::{ChannelHost, HostChannel, HostGone, HostMessage, HostReceiver, ResultReporter};
pub use session::{ScanSession, SessionError, SessionState};
pub use settings::{SessionSettings, SettingsError};
pub use slot::ResultSlot;

pub use barcode_scan_core;
