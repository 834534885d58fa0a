//! Core types for barcode scan sessions.
//!
//! This crate is intentionally free of any camera or engine code. It holds
//! what every engine variant and every host shares:
//! - the closed [`Symbology`] set and the generic [`FormatMapper`] that ties
//!   it to an engine's native formats,
//! - the binary host contract ([`wire`]) and its typed projections,
//!   [`ScanOptions`] (input) and [`ScanResult`] (output),
//! - the orientation-independent overlay geometry ([`ScannerOverlay`]).

mod config;
mod format;
mod logger;
mod overlay;
mod result;
mod symbology;
pub mod wire;

pub use config::{
    CameraOptions, CameraSelection, ConfigError, ScanOptions, UiStrings, STRING_CANCEL,
    STRING_FLASH_OFF, STRING_FLASH_ON,
};
pub use format::{FormatMapper, FormatRestriction, FormatTableError, NativeFormat};
pub use overlay::{
    scan_rect_for, OverlayLayout, ScanRect, ScannerOverlay, Segment, ViewOrientation, Viewport,
    SCAN_LINE_PERIOD, SCAN_RECT_ASPECT, SCAN_RECT_WIDTH_FRAC,
};
pub use result::{ScanResult, WireError, PERMISSION_NOT_GRANTED};
pub use symbology::Symbology;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
