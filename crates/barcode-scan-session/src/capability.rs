//! The seam between a scan session and a native camera/recognition stack.
//!
//! Each native stack provides one [`CameraCapability`] implementation. The
//! session calls into it from the view-event thread; the engine answers
//! asynchronously through an [`EventSink`], from whatever thread it likes.

use barcode_scan_core::{CameraOptions, FormatRestriction, NativeFormat, ScanRect, Symbology};
use crossbeam_channel::{Receiver, Sender};
use log::debug;
use serde::{Deserialize, Serialize};

/// Camera permission as known to the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// The user has not been asked yet.
    NotDetermined,
}

/// Failures reported by a native engine.
///
/// The display text of `Native` is the engine's own description, verbatim;
/// it becomes the text of the `Error` result. Adapters report engine
/// failures as `Native`. `Unavailable` is for conditions an adapter detects
/// itself, and its text carries a `camera unavailable:` prefix.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    #[error("camera unavailable: {0}")]
    Unavailable(String),
    #[error("{0}")]
    Native(String),
    #[error("torch unavailable")]
    TorchUnavailable,
}

/// One recognition callback from the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Detection<F> {
    pub format: F,
    /// Decoded payload; engines may deliver `None` for unreadable codes.
    pub value: Option<String>,
}

/// Asynchronous notifications from a native engine.
#[derive(Clone, Debug, PartialEq)]
pub enum CapabilityEvent<F> {
    /// Answer to [`CameraCapability::request_permission`].
    PermissionResolved { granted: bool },
    /// The camera is live and delivering frames.
    Started,
    Detected(Detection<F>),
    /// The engine failed while opening or operating the camera.
    Failed(CameraError),
    /// Confirmation of [`CameraCapability::stop`].
    Stopped,
}

/// Cloneable, thread-safe handle engines use to deliver events.
///
/// Events sent after the owning session is gone are discarded.
#[derive(Debug)]
pub struct EventSink<F> {
    tx: Sender<CapabilityEvent<F>>,
}

impl<F> Clone for EventSink<F> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<F: Send + 'static> EventSink<F> {
    /// Create a sink and the receiving end the session drains.
    pub fn channel() -> (Self, Receiver<CapabilityEvent<F>>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self { tx }, rx)
    }

    pub fn send(&self, event: CapabilityEvent<F>) {
        if self.tx.send(event).is_err() {
            debug!("capability event dropped: session already gone");
        }
    }

    pub fn permission_resolved(&self, granted: bool) {
        self.send(CapabilityEvent::PermissionResolved { granted });
    }

    pub fn started(&self) {
        self.send(CapabilityEvent::Started);
    }

    pub fn detected(&self, format: F, value: Option<String>) {
        self.send(CapabilityEvent::Detected(Detection { format, value }));
    }

    pub fn failed(&self, error: CameraError) {
        self.send(CapabilityEvent::Failed(error));
    }

    pub fn stopped(&self) {
        self.send(CapabilityEvent::Stopped);
    }

    /// One-shot permission callback for platform APIs that take a closure.
    pub fn permission_callback(&self) -> Box<dyn FnOnce(bool) + Send> {
        let sink = self.clone();
        Box::new(move |granted| sink.permission_resolved(granted))
    }
}

/// A native camera + recognition stack as seen by the session.
///
/// `stop` is fire-and-forget; completion is confirmed by
/// [`CapabilityEvent::Stopped`], also after the engine has reported a
/// failure. Engines may keep delivering detections for a while after `stop`;
/// the session ignores them.
pub trait CameraCapability: Send {
    type Format: NativeFormat;

    /// Static symbology <-> native format table of this engine.
    fn format_table(&self) -> &'static [(Symbology, Self::Format)];

    fn permission(&self) -> PermissionStatus;

    /// Ask the user for camera access; answer via
    /// [`EventSink::permission_resolved`].
    fn request_permission(&mut self, events: EventSink<Self::Format>);

    /// Acquire the camera with the given parameters. After a successful
    /// `open`, the session always calls `stop` to release it, also when
    /// `start` fails.
    fn open(&mut self, options: &CameraOptions) -> Result<(), CameraError>;

    fn set_restriction(&mut self, restriction: &FormatRestriction<Self::Format>);

    /// Whether [`CameraCapability::set_scan_rect`] has any effect.
    fn supports_scan_rect(&self) -> bool {
        false
    }

    /// Advisory region of interest in view coordinates. An empty rectangle
    /// clears the hint so the whole preview is searched.
    fn set_scan_rect(&mut self, _rect: ScanRect) {}

    /// Start delivering frames. Events, including `Started`, go to `events`.
    fn start(&mut self, events: EventSink<Self::Format>) -> Result<(), CameraError>;

    fn stop(&mut self);

    fn has_torch(&self) -> bool {
        false
    }

    fn set_torch(&mut self, _on: bool) -> Result<(), CameraError> {
        Err(CameraError::TorchUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_delivers_in_order_across_threads() {
        let (sink, rx) = EventSink::<u8>::channel();
        let remote = sink.clone();
        std::thread::spawn(move || {
            remote.started();
            remote.detected(1, Some("a".into()));
        })
        .join()
        .expect("join");
        sink.stopped();

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                CapabilityEvent::Started,
                CapabilityEvent::Detected(Detection {
                    format: 1,
                    value: Some("a".into())
                }),
                CapabilityEvent::Stopped,
            ]
        );
    }

    #[test]
    fn sending_after_the_receiver_is_gone_is_harmless() {
        let (sink, rx) = EventSink::<u8>::channel();
        drop(rx);
        sink.failed(CameraError::Native("late".into()));
        (sink.permission_callback())(true);
    }

    #[test]
    fn native_error_text_is_verbatim() {
        assert_eq!(
            CameraError::Native("AVFoundationErrorDomain -11814".into()).to_string(),
            "AVFoundationErrorDomain -11814"
        );
        assert_eq!(
            CameraError::Unavailable("no result handler".into()).to_string(),
            "camera unavailable: no result handler"
        );
    }
}
