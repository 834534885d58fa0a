//! Delegate-callback camera capability.
//!
//! Adapts scanners built on an AVFoundation capture session with a metadata
//! output, where recognized codes arrive in batches through a callback and
//! start/stop completion is signalled asynchronously. Wrap a
//! [`MetadataScanner`] in an [`AvCapability`] and hand it to a
//! [`ScanSession`](barcode_scan_session::ScanSession).

mod capability;
mod metadata;
mod scanner;

pub use capability::AvCapability;
pub use metadata::{MetadataObjectType, FORMAT_TABLE};
pub use scanner::{
    CaptureCamera, DidStartBlock, DidStopBlock, MetadataCode, MetadataScanner, ResultBlock,
};
