//! Binary messages exchanged between the host and a scan session.
//!
//! These are protocol-buffers (proto3) messages. Field numbers and enum
//! values are part of the host contract and must never be renumbered:
//!
//! ```text
//! enum ResultType { Barcode = 0; Cancelled = 1; Error = 2; }
//! message AndroidConfiguration { double aspectTolerance = 1; bool useAutoFocus = 2; }
//! message Configuration {
//!   map<string, string> strings = 1;
//!   repeated BarcodeFormat restrictFormat = 2;
//!   int32 useCamera = 3;
//!   AndroidConfiguration android = 4;
//!   bool autoEnableFlash = 5;
//! }
//! message ScanResult {
//!   ResultType type = 1;
//!   string rawContent = 2;
//!   BarcodeFormat format = 3;
//!   string formatNote = 4;
//! }
//! ```
//!
//! Enum fields are stored as raw `i32` so values unknown to this build
//! survive decoding; interpretation happens in [`crate::ScanOptions`] and
//! [`crate::ScanResult`].

use crate::Symbology;
use std::collections::HashMap;

/// Discriminator of a [`ScanResult`] message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ResultType {
    Barcode = 0,
    Cancelled = 1,
    Error = 2,
}

/// Engine tuning that only the format-filtered engines understand.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AndroidConfiguration {
    #[prost(double, tag = "1")]
    pub aspect_tolerance: f64,
    #[prost(bool, tag = "2")]
    pub use_auto_focus: bool,
}

/// Host -> session configuration message.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Configuration {
    #[prost(map = "string, string", tag = "1")]
    pub strings: HashMap<String, String>,
    #[prost(enumeration = "Symbology", repeated, tag = "2")]
    pub restrict_format: Vec<i32>,
    #[prost(int32, tag = "3")]
    pub use_camera: i32,
    #[prost(message, optional, tag = "4")]
    pub android: Option<AndroidConfiguration>,
    #[prost(bool, tag = "5")]
    pub auto_enable_flash: bool,
}

/// Session -> host result message.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ScanResult {
    #[prost(enumeration = "ResultType", tag = "1")]
    pub r#type: i32,
    #[prost(string, tag = "2")]
    pub raw_content: String,
    #[prost(enumeration = "Symbology", tag = "3")]
    pub format: i32,
    #[prost(string, tag = "4")]
    pub format_note: String,
}
