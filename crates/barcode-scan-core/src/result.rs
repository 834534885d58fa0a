//! Normalized scan outcome reported back to the host.

use crate::wire::{self, ResultType};
use crate::Symbology;
use prost::Message;
use serde::{Deserialize, Serialize};

/// Error text reported when camera access was refused.
pub const PERMISSION_NOT_GRANTED: &str = "PERMISSION_NOT_GRANTED";

/// Errors decoding a result message on the host side.
#[derive(thiserror::Error, Debug)]
pub enum WireError {
    #[error(transparent)]
    Decode(#[from] prost::DecodeError),
    #[error("unknown result type {0}")]
    UnknownResultType(i32),
}

/// Terminal outcome of one scan session.
///
/// `format_note` carries the engine's raw type label only when `format` is
/// [`Symbology::Unknown`]; it is empty otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScanResult {
    #[serde(rename_all = "camelCase")]
    Barcode {
        format: Symbology,
        format_note: String,
        raw_content: String,
    },
    Error {
        message: String,
    },
    Cancelled,
}

impl ScanResult {
    /// Build a barcode result, dropping the note unless the format is unknown.
    pub fn barcode(
        format: Symbology,
        native_label: impl Into<String>,
        raw_content: impl Into<String>,
    ) -> Self {
        let format_note = if format.is_unknown() {
            native_label.into()
        } else {
            String::new()
        };
        ScanResult::Barcode {
            format,
            format_note,
            raw_content: raw_content.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ScanResult::Error {
            message: message.into(),
        }
    }

    /// The result reported when the camera permission was denied.
    pub fn permission_denied() -> Self {
        ScanResult::error(PERMISSION_NOT_GRANTED)
    }

    #[inline]
    pub fn result_type(&self) -> ResultType {
        match self {
            ScanResult::Barcode { .. } => ResultType::Barcode,
            ScanResult::Error { .. } => ResultType::Error,
            ScanResult::Cancelled => ResultType::Cancelled,
        }
    }

    /// Project into the wire message.
    ///
    /// Error text travels in `rawContent`; non-barcode results carry the
    /// `unknown` format.
    pub fn to_wire(&self) -> wire::ScanResult {
        let mut msg = wire::ScanResult {
            r#type: self.result_type() as i32,
            ..wire::ScanResult::default()
        };
        match self {
            ScanResult::Barcode {
                format,
                format_note,
                raw_content,
            } => {
                msg.format = *format as i32;
                msg.format_note = format_note.clone();
                msg.raw_content = raw_content.clone();
            }
            ScanResult::Error { message } => {
                msg.format = Symbology::Unknown as i32;
                msg.raw_content = message.clone();
            }
            ScanResult::Cancelled => {
                msg.format = Symbology::Unknown as i32;
            }
        }
        msg
    }

    /// Interpret a wire message.
    ///
    /// A format value this build does not know becomes `unknown`; an unknown
    /// result type is an error.
    pub fn from_wire(msg: &wire::ScanResult) -> Result<Self, WireError> {
        let kind = ResultType::try_from(msg.r#type)
            .map_err(|_| WireError::UnknownResultType(msg.r#type))?;
        Ok(match kind {
            ResultType::Barcode => ScanResult::Barcode {
                format: Symbology::from_wire(msg.format).unwrap_or(Symbology::Unknown),
                format_note: msg.format_note.clone(),
                raw_content: msg.raw_content.clone(),
            },
            ResultType::Error => ScanResult::Error {
                message: msg.raw_content.clone(),
            },
            ResultType::Cancelled => ScanResult::Cancelled,
        })
    }

    /// Encode to the binary result message.
    pub fn encode(&self) -> Vec<u8> {
        self.to_wire().encode_to_vec()
    }

    /// Decode a binary result message.
    pub fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let msg = wire::ScanResult::decode(bytes)?;
        Self::from_wire(&msg)
    }
}
