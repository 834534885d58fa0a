//! Format-filtered camera capability.
//!
//! Adapts scanner widgets in the style of ZXing's Android scanner view: the
//! widget decodes frames itself, can be restricted to a list of formats and
//! calls back once per decode. Wrap a [`ScannerView`] in a
//! [`ZxingCapability`] and hand it to a
//! [`ScanSession`](barcode_scan_session::ScanSession).

mod capability;
mod formats;
mod view;

pub use capability::{ZxingCapability, NO_DATA_SCANNED};
pub use formats::{UnknownFormatName, ZxingFormat, FORMAT_TABLE};
pub use view::{RawResult, ResultHandler, ScannerView};
