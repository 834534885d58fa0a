//! Native format set of ZXing-style engines.

use barcode_scan_core::{NativeFormat, Symbology};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Barcode formats a ZXing-style engine can recognize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZxingFormat {
    #[serde(rename = "AZTEC")]
    Aztec,
    #[serde(rename = "CODABAR")]
    Codabar,
    #[serde(rename = "CODE_39")]
    Code39,
    #[serde(rename = "CODE_93")]
    Code93,
    #[serde(rename = "CODE_128")]
    Code128,
    #[serde(rename = "DATA_MATRIX")]
    DataMatrix,
    #[serde(rename = "EAN_8")]
    Ean8,
    #[serde(rename = "EAN_13")]
    Ean13,
    #[serde(rename = "ITF")]
    Itf,
    #[serde(rename = "MAXICODE")]
    Maxicode,
    #[serde(rename = "PDF_417")]
    Pdf417,
    #[serde(rename = "QR_CODE")]
    QrCode,
    #[serde(rename = "RSS_14")]
    Rss14,
    #[serde(rename = "RSS_EXPANDED")]
    RssExpanded,
    #[serde(rename = "UPC_A")]
    UpcA,
    #[serde(rename = "UPC_E")]
    UpcE,
    #[serde(rename = "UPC_EAN_EXTENSION")]
    UpcEanExtension,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown ZXing format name {0:?}")]
pub struct UnknownFormatName(pub String);

impl ZxingFormat {
    pub const ALL: [ZxingFormat; 17] = [
        ZxingFormat::Aztec,
        ZxingFormat::Codabar,
        ZxingFormat::Code39,
        ZxingFormat::Code93,
        ZxingFormat::Code128,
        ZxingFormat::DataMatrix,
        ZxingFormat::Ean8,
        ZxingFormat::Ean13,
        ZxingFormat::Itf,
        ZxingFormat::Maxicode,
        ZxingFormat::Pdf417,
        ZxingFormat::QrCode,
        ZxingFormat::Rss14,
        ZxingFormat::RssExpanded,
        ZxingFormat::UpcA,
        ZxingFormat::UpcE,
        ZxingFormat::UpcEanExtension,
    ];

    /// The engine's enum constant name.
    pub fn name(self) -> &'static str {
        match self {
            ZxingFormat::Aztec => "AZTEC",
            ZxingFormat::Codabar => "CODABAR",
            ZxingFormat::Code39 => "CODE_39",
            ZxingFormat::Code93 => "CODE_93",
            ZxingFormat::Code128 => "CODE_128",
            ZxingFormat::DataMatrix => "DATA_MATRIX",
            ZxingFormat::Ean8 => "EAN_8",
            ZxingFormat::Ean13 => "EAN_13",
            ZxingFormat::Itf => "ITF",
            ZxingFormat::Maxicode => "MAXICODE",
            ZxingFormat::Pdf417 => "PDF_417",
            ZxingFormat::QrCode => "QR_CODE",
            ZxingFormat::Rss14 => "RSS_14",
            ZxingFormat::RssExpanded => "RSS_EXPANDED",
            ZxingFormat::UpcA => "UPC_A",
            ZxingFormat::UpcE => "UPC_E",
            ZxingFormat::UpcEanExtension => "UPC_EAN_EXTENSION",
        }
    }
}

impl fmt::Display for ZxingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ZxingFormat {
    type Err = UnknownFormatName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ZxingFormat::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| UnknownFormatName(s.to_string()))
    }
}

impl NativeFormat for ZxingFormat {
    fn label(&self) -> &str {
        self.name()
    }
}

/// Symbologies this engine family reports. `interleaved2of5` is `ITF`;
/// everything else in [`ZxingFormat`] comes back as `unknown`.
pub static FORMAT_TABLE: [(Symbology, ZxingFormat); 11] = [
    (Symbology::Aztec, ZxingFormat::Aztec),
    (Symbology::Code39, ZxingFormat::Code39),
    (Symbology::Code93, ZxingFormat::Code93),
    (Symbology::Code128, ZxingFormat::Code128),
    (Symbology::DataMatrix, ZxingFormat::DataMatrix),
    (Symbology::Ean8, ZxingFormat::Ean8),
    (Symbology::Ean13, ZxingFormat::Ean13),
    (Symbology::Interleaved2of5, ZxingFormat::Itf),
    (Symbology::Pdf417, ZxingFormat::Pdf417),
    (Symbology::Qr, ZxingFormat::QrCode),
    (Symbology::Upce, ZxingFormat::UpcE),
];
