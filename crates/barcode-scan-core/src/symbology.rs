//! The closed set of barcode symbologies shared by the host and every engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Barcode symbology as seen by the host application.
///
/// Discriminants are the wire values of the `BarcodeFormat` protocol enum,
/// so a `Symbology` can be written into either message as-is.
///
/// `Unknown` is the fallback for native detections that have no entry in an
/// engine's format table. It never names a native format itself.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ::prost::Enumeration,
)]
#[serde(rename_all = "camelCase")]
#[repr(i32)]
pub enum Symbology {
    Unknown = 0,
    Aztec = 1,
    Code39 = 2,
    Code93 = 3,
    Ean8 = 4,
    Ean13 = 5,
    Code128 = 6,
    DataMatrix = 7,
    Qr = 8,
    Interleaved2of5 = 9,
    Upce = 10,
    Pdf417 = 11,
}

impl Symbology {
    /// Every symbology that can name a concrete barcode (all but `Unknown`).
    pub const KNOWN: [Symbology; 11] = [
        Symbology::Aztec,
        Symbology::Code39,
        Symbology::Code93,
        Symbology::Ean8,
        Symbology::Ean13,
        Symbology::Code128,
        Symbology::DataMatrix,
        Symbology::Qr,
        Symbology::Interleaved2of5,
        Symbology::Upce,
        Symbology::Pdf417,
    ];

    /// Protocol name of the symbology (`"qr"`, `"dataMatrix"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Symbology::Unknown => "unknown",
            Symbology::Aztec => "aztec",
            Symbology::Code39 => "code39",
            Symbology::Code93 => "code93",
            Symbology::Ean8 => "ean8",
            Symbology::Ean13 => "ean13",
            Symbology::Code128 => "code128",
            Symbology::DataMatrix => "dataMatrix",
            Symbology::Qr => "qr",
            Symbology::Interleaved2of5 => "interleaved2of5",
            Symbology::Upce => "upce",
            Symbology::Pdf417 => "pdf417",
        }
    }

    #[inline]
    pub fn is_unknown(self) -> bool {
        self == Symbology::Unknown
    }

    /// Interpret a raw wire value. Values outside the enum yield `None`.
    pub fn from_wire(value: i32) -> Option<Self> {
        Symbology::try_from(value).ok()
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
