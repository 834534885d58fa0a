//! Metadata object types reported by AVFoundation capture outputs.

use barcode_scan_core::{NativeFormat, Symbology};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A capture-output metadata object type, identified by its platform raw
/// string (`AVMetadataObject.ObjectType.rawValue`).
///
/// The set is open: the platform adds types over time, so any raw string is
/// accepted and the associated constants only name the common ones.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataObjectType(Cow<'static, str>);

impl MetadataObjectType {
    pub const AZTEC: Self = Self::constant("org.iso.Aztec");
    pub const CODABAR: Self = Self::constant("Codabar");
    pub const CODE_39: Self = Self::constant("org.iso.Code39");
    pub const CODE_39_MOD_43: Self = Self::constant("org.iso.Code39Mod43");
    pub const CODE_93: Self = Self::constant("com.intermec.Code93");
    pub const CODE_128: Self = Self::constant("org.iso.Code128");
    pub const DATA_MATRIX: Self = Self::constant("org.iso.DataMatrix");
    pub const EAN_8: Self = Self::constant("org.gs1.EAN-8");
    pub const EAN_13: Self = Self::constant("org.gs1.EAN-13");
    pub const GS1_DATA_BAR: Self = Self::constant("org.gs1.GS1DataBar");
    pub const GS1_DATA_BAR_EXPANDED: Self = Self::constant("org.gs1.GS1DataBarExpanded");
    pub const GS1_DATA_BAR_LIMITED: Self = Self::constant("org.gs1.GS1DataBarLimited");
    pub const INTERLEAVED_2_OF_5: Self = Self::constant("org.ansi.Interleaved2of5");
    pub const ITF_14: Self = Self::constant("org.gs1.ITF14");
    pub const MICRO_PDF_417: Self = Self::constant("org.iso.MicroPDF417");
    pub const MICRO_QR: Self = Self::constant("org.iso.MicroQR");
    pub const PDF_417: Self = Self::constant("org.iso.PDF417");
    pub const QR: Self = Self::constant("org.iso.QRCode");
    pub const UPC_E: Self = Self::constant("org.gs1.UPC-E");

    const fn constant(raw: &'static str) -> Self {
        Self(Cow::Borrowed(raw))
    }

    pub fn new(raw: impl Into<Cow<'static, str>>) -> Self {
        Self(raw.into())
    }

    #[inline]
    pub fn raw_value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MetadataObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl NativeFormat for MetadataObjectType {
    fn label(&self) -> &str {
        self.raw_value()
    }
}

/// Symbologies reported by metadata capture. Codabar, ITF-14, the GS1
/// DataBar family and the micro variants come back as `unknown` with their
/// raw string as the note.
pub static FORMAT_TABLE: [(Symbology, MetadataObjectType); 11] = [
    (Symbology::Aztec, MetadataObjectType::AZTEC),
    (Symbology::Code39, MetadataObjectType::CODE_39),
    (Symbology::Code93, MetadataObjectType::CODE_93),
    (Symbology::Code128, MetadataObjectType::CODE_128),
    (Symbology::DataMatrix, MetadataObjectType::DATA_MATRIX),
    (Symbology::Ean8, MetadataObjectType::EAN_8),
    (Symbology::Ean13, MetadataObjectType::EAN_13),
    (Symbology::Interleaved2of5, MetadataObjectType::INTERLEAVED_2_OF_5),
    (Symbology::Pdf417, MetadataObjectType::PDF_417),
    (Symbology::Qr, MetadataObjectType::QR),
    (Symbology::Upce, MetadataObjectType::UPC_E),
];
