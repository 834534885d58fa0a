//! Facade crate for the `barcode-scan-*` workspace.
//!
//! A scan session takes a binary configuration from the host, runs one
//! native camera/recognition engine through its lifecycle and returns
//! exactly one binary result: a barcode, a cancellation or an error.
//!
//! ## Quickstart
//!
//! ```no_run
//! use barcode_scan::core::{ScanOptions, Symbology, Viewport};
//! use barcode_scan::session::{ChannelHost, ScanSession, SessionSettings};
//! use barcode_scan::zxing::{ScannerView, ZxingCapability};
//! use std::time::Duration;
//!
//! # fn run(view: impl ScannerView) -> Result<(), Box<dyn std::error::Error>> {
//! let config = ScanOptions {
//!     restrict_formats: vec![Symbology::Qr],
//!     ..ScanOptions::default()
//! }
//! .encode();
//!
//! let (host, _results) = ChannelHost::new();
//! let mut session = ScanSession::new(
//!     &config,
//!     ZxingCapability::new(view),
//!     host,
//!     SessionSettings::default(),
//!     Viewport::new(390.0, 844.0),
//! )?;
//! session.resume();
//! let result = barcode_scan::run_until_terminated(&mut session, Duration::from_secs(30))?;
//! println!("{result:?}");
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `barcode_scan::core`: symbologies, wire messages, options, results, overlay geometry.
//! - `barcode_scan::session`: the capability trait and the session state machine.
//! - `barcode_scan::zxing`: format-filtered engine adapter.
//! - `barcode_scan::avfoundation`: delegate-callback engine adapter.

pub use barcode_scan_avfoundation as avfoundation;
pub use barcode_scan_core as core;
pub use barcode_scan_session as session;
pub use barcode_scan_zxing as zxing;

pub use barcode_scan_core::{ScanOptions, ScanResult, Symbology, Viewport};
pub use barcode_scan_session::{ScanSession, SessionSettings, SessionState};

mod drive;

pub use drive::{run_until_terminated, DriveError};
