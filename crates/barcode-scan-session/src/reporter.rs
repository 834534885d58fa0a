//! Single exit point that hands the session result to the host.

use barcode_scan_core::{ScanResult, WireError};
use crossbeam_channel::{Receiver, Sender};
use log::{info, warn};
use std::time::Duration;

/// The host has already torn down the view presenting the scanner.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("host view is gone")]
pub struct HostGone;

/// Host-side endpoint that receives the encoded result.
pub trait HostChannel: Send {
    /// Deliver the binary result message.
    fn deliver(&mut self, payload: Vec<u8>) -> Result<(), HostGone>;

    /// Close the presenting view.
    fn dismiss(&mut self);
}

/// Reports at most one result per session, then dismisses the view.
pub struct ResultReporter<H: HostChannel> {
    host: H,
    reported: bool,
}

impl<H: HostChannel> ResultReporter<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            reported: false,
        }
    }

    #[inline]
    pub fn has_reported(&self) -> bool {
        self.reported
    }

    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Encode and deliver `result`, then dismiss the view.
    ///
    /// Returns `false` when a result was already reported. A host that has
    /// gone away is logged and otherwise ignored.
    pub fn report(&mut self, result: &ScanResult) -> bool {
        if self.reported {
            warn!("result already reported, dropping {:?}", result.result_type());
            return false;
        }
        self.reported = true;
        match self.host.deliver(result.encode()) {
            Ok(()) => info!("reported {:?} result", result.result_type()),
            Err(HostGone) => {
                warn!("host gone, dropping {:?} result", result.result_type());
                return true;
            }
        }
        self.host.dismiss();
        true
    }
}

/// Messages seen by the receiving end of a [`ChannelHost`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostMessage {
    Result(Vec<u8>),
    Dismissed,
}

/// [`HostChannel`] backed by a `crossbeam-channel`, for hosts that consume
/// results on another thread.
#[derive(Clone, Debug)]
pub struct ChannelHost {
    tx: Sender<HostMessage>,
}

/// Receiving end of a [`ChannelHost`]. Dropping it makes the host "gone".
#[derive(Debug)]
pub struct HostReceiver {
    rx: Receiver<HostMessage>,
}

impl ChannelHost {
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> (ChannelHost, HostReceiver) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (ChannelHost { tx }, HostReceiver { rx })
    }
}

impl HostChannel for ChannelHost {
    fn deliver(&mut self, payload: Vec<u8>) -> Result<(), HostGone> {
        self.tx.send(HostMessage::Result(payload)).map_err(|_| HostGone)
    }

    fn dismiss(&mut self) {
        let _ = self.tx.send(HostMessage::Dismissed);
    }
}

impl HostReceiver {
    pub fn try_recv(&self) -> Option<HostMessage> {
        self.rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<HostMessage> {
        self.rx.recv_timeout(timeout).ok()
    }

    /// Everything received so far.
    pub fn drain(&self) -> Vec<HostMessage> {
        self.rx.try_iter().collect()
    }

    /// Drain and decode the result messages received so far.
    pub fn take_results(&self) -> Result<Vec<ScanResult>, WireError> {
        self.drain()
            .into_iter()
            .filter_map(|m| match m {
                HostMessage::Result(bytes) => Some(ScanResult::decode(&bytes)),
                HostMessage::Dismissed => None,
            })
            .collect()
    }
}
