use super::state::StopReason;
use super::{SessionError, SessionState};
use crate::capability::{
    CameraCapability, CameraError, CapabilityEvent, Detection, EventSink, PermissionStatus,
};
use crate::reporter::{HostChannel, ResultReporter};
use crate::settings::SessionSettings;
use crate::slot::ResultSlot;
use barcode_scan_core::{
    FormatMapper, FormatRestriction, ScanOptions, ScanRect, ScanResult, ScannerOverlay, Viewport,
};
use crossbeam_channel::Receiver;
use log::{debug, info, warn};
use std::time::{Duration, Instant};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Drives one camera capability from activation to a single reported result.
///
/// Lifecycle calls (`resume`, `pause`, `cancel`, `destroy`, viewport changes)
/// come from the view-event thread. Engine callbacks arrive through the
/// session's [`EventSink`] from any thread and are applied by
/// [`ScanSession::pump`] / [`ScanSession::wait_event`].
///
/// Whatever path ends the session (detection, cancel, permission denial,
/// camera failure), the first queued result is the one reported, and it is
/// reported once.
pub struct ScanSession<C: CameraCapability, H: HostChannel> {
    capability: C,
    options: ScanOptions,
    settings: SessionSettings,
    mapper: FormatMapper<C::Format>,
    restriction: FormatRestriction<C::Format>,
    overlay: ScannerOverlay,
    state: SessionState,
    stop_reason: Option<StopReason>,
    resume_after_stop: bool,
    camera_active: bool,
    torch_on: bool,
    pending: ResultSlot,
    reporter: ResultReporter<H>,
    events: EventSink<C::Format>,
    inbox: Receiver<CapabilityEvent<C::Format>>,
}

impl<C: CameraCapability, H: HostChannel> ScanSession<C, H> {
    /// Create a session from the host's binary configuration.
    ///
    /// A configuration that fails to decode or validate is reported to the
    /// host as an `Error` result before this returns `Err`; the camera is
    /// never touched.
    pub fn new(
        config: &[u8],
        capability: C,
        host: H,
        settings: SessionSettings,
        viewport: Viewport,
    ) -> Result<Self, SessionError> {
        match ScanOptions::decode(config) {
            Ok(options) => Self::with_options(options, capability, host, settings, viewport),
            Err(err) => {
                warn!("refusing to start scan session: {err}");
                ResultReporter::new(host).report(&ScanResult::error(err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Create a session from already validated options.
    pub fn with_options(
        options: ScanOptions,
        capability: C,
        host: H,
        settings: SessionSettings,
        viewport: Viewport,
    ) -> Result<Self, SessionError> {
        let mapper = match FormatMapper::new(capability.format_table()) {
            Ok(mapper) => mapper,
            Err(err) => {
                warn!("engine format table rejected: {err}");
                ResultReporter::new(host).report(&ScanResult::error(err.to_string()));
                return Err(err.into());
            }
        };

        let restriction = mapper.restrict(&options.restrict_formats);
        match restriction.formats() {
            Some(formats) => info!("recognition restricted to {} format(s)", formats.len()),
            None => info!("recognition unrestricted"),
        }

        let (events, inbox) = EventSink::channel();
        Ok(Self {
            capability,
            options,
            settings,
            mapper,
            restriction,
            overlay: ScannerOverlay::new(viewport),
            state: SessionState::Idle,
            stop_reason: None,
            resume_after_stop: false,
            camera_active: false,
            torch_on: false,
            pending: ResultSlot::new(),
            reporter: ResultReporter::new(host),
            events,
            inbox,
        })
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.state.is_terminated()
    }

    #[inline]
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    #[inline]
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Native formats the engine was (or will be) restricted to.
    #[inline]
    pub fn restriction(&self) -> &FormatRestriction<C::Format> {
        &self.restriction
    }

    #[inline]
    pub fn overlay(&self) -> &ScannerOverlay {
        &self.overlay
    }

    #[inline]
    pub fn scan_rect(&self) -> ScanRect {
        self.overlay.scan_rect()
    }

    /// The queued result, if any path has produced one yet.
    #[inline]
    pub fn pending_result(&self) -> Option<&ScanResult> {
        self.pending.get()
    }

    #[inline]
    pub fn has_reported(&self) -> bool {
        self.reporter.has_reported()
    }

    #[inline]
    pub fn capability(&self) -> &C {
        &self.capability
    }

    #[inline]
    pub fn capability_mut(&mut self) -> &mut C {
        &mut self.capability
    }

    #[inline]
    pub fn host(&self) -> &H {
        self.reporter.host()
    }

    /// Another handle for delivering engine events to this session.
    pub fn events(&self) -> EventSink<C::Format> {
        self.events.clone()
    }

    pub fn cancel_label(&self) -> &str {
        self.options.strings.cancel()
    }

    /// Label for the flash button, `None` when the device has no torch.
    pub fn flash_label(&self) -> Option<&str> {
        if !self.capability.has_torch() {
            return None;
        }
        Some(self.flash_label_for(self.torch_on))
    }

    #[inline]
    pub fn is_torch_on(&self) -> bool {
        self.torch_on
    }

    /// The view became visible (first appearance or back from background).
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self), fields(state = ?self.state)))]
    pub fn resume(&mut self) {
        match self.state {
            SessionState::Idle => {
                self.overlay.start_animating(Instant::now());
                match self.capability.permission() {
                    PermissionStatus::Granted => self.start_camera(),
                    PermissionStatus::Denied => self.permission_denied(),
                    PermissionStatus::NotDetermined => {
                        info!("requesting camera permission");
                        self.state = SessionState::AwaitingPermission;
                        self.capability.request_permission(self.events.clone());
                    }
                }
            }
            SessionState::Stopping if self.stop_reason == Some(StopReason::Pause) => {
                debug!("resume while pausing, restarting once the camera stops");
                self.resume_after_stop = true;
            }
            SessionState::Terminated => warn!("resume on a terminated session ignored"),
            state => debug!("resume ignored in {state:?}"),
        }
    }

    /// The view went to the background. Stops the camera without a result.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self), fields(state = ?self.state)))]
    pub fn pause(&mut self) {
        self.resume_after_stop = false;
        match self.state {
            SessionState::Starting | SessionState::Scanning => self.begin_stop(StopReason::Pause),
            SessionState::AwaitingPermission => {
                debug!("paused while awaiting permission");
                self.state = SessionState::Idle;
            }
            _ => {}
        }
        self.overlay.stop_animating();
    }

    /// Explicit user cancel.
    ///
    /// Queues `Cancelled` unless another result is already queued, in which
    /// case that result wins and the cancel only tears the session down.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self), fields(state = ?self.state)))]
    pub fn cancel(&mut self) {
        if self.state.is_terminated() {
            debug!("cancel on a terminated session ignored");
            return;
        }
        if self.pending.offer(ScanResult::Cancelled).is_err() {
            info!("cancel after a result was queued, tearing down only");
        }
        self.begin_stop(StopReason::Finish);
    }

    /// The host view is being destroyed. Reports only an already queued result.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self), fields(state = ?self.state)))]
    pub fn destroy(&mut self) {
        if self.state.is_terminated() {
            return;
        }
        self.begin_stop(StopReason::Teardown);
    }

    /// Recompute the overlay for new view bounds.
    ///
    /// While scanning, the new rectangle is pushed to the engine right away.
    pub fn on_viewport_changed(&mut self, viewport: Viewport) -> ScanRect {
        let rect = self.overlay.on_viewport_changed(viewport);
        debug!(
            "viewport {}x{} ({:?}), scan rect {:?}",
            viewport.width,
            viewport.height,
            viewport.orientation(),
            rect
        );
        if self.state == SessionState::Scanning {
            self.push_scan_rect(rect);
        }
        rect
    }

    /// Flip the torch and return the new flash button label.
    pub fn toggle_flash(&mut self) -> Result<&str, SessionError> {
        if self.state != SessionState::Scanning {
            return Err(SessionError::NotScanning(self.state));
        }
        if !self.capability.has_torch() {
            return Err(CameraError::TorchUnavailable.into());
        }
        let on = !self.torch_on;
        self.capability.set_torch(on)?;
        self.torch_on = on;
        Ok(self.flash_label_for(on))
    }

    /// Apply every engine event delivered so far. Returns how many there were.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.inbox.try_recv() {
            self.handle(event);
            handled += 1;
        }
        handled
    }

    /// Wait up to `timeout` for the next engine event and apply it.
    pub fn wait_event(&mut self, timeout: Duration) -> bool {
        match self.inbox.recv_timeout(timeout) {
            Ok(event) => {
                self.handle(event);
                true
            }
            Err(_) => false,
        }
    }

    /// Apply one engine event.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self, event), fields(state = ?self.state)))]
    pub fn handle(&mut self, event: CapabilityEvent<C::Format>) {
        match event {
            CapabilityEvent::PermissionResolved { granted } => self.on_permission(granted),
            CapabilityEvent::Started => self.on_started(),
            CapabilityEvent::Detected(detection) => self.on_detected(detection),
            CapabilityEvent::Failed(err) => self.on_failed(err),
            CapabilityEvent::Stopped => self.on_stopped(),
        }
    }

    fn on_permission(&mut self, granted: bool) {
        if self.state != SessionState::AwaitingPermission {
            debug!("permission answer ignored in {:?}", self.state);
            return;
        }
        if granted {
            info!("camera permission granted");
            self.start_camera();
        } else {
            self.permission_denied();
        }
    }

    fn permission_denied(&mut self) {
        if self.settings.enforce_permission {
            warn!("camera permission denied");
            self.queue(ScanResult::permission_denied());
            self.terminate();
        } else {
            info!("camera permission denied, not enforced; staying idle");
            self.state = SessionState::Idle;
        }
    }

    fn start_camera(&mut self) {
        self.state = SessionState::Starting;
        let camera = self.options.camera_options();
        if let Err(err) = self.capability.open(&camera) {
            self.fail_start(err);
            return;
        }
        self.capability.set_restriction(&self.restriction);
        if let Err(err) = self.capability.start(self.events.clone()) {
            // open() already acquired the camera
            self.capability.stop();
            self.fail_start(err);
            return;
        }
        self.camera_active = true;
        debug!("camera starting ({:?})", camera.camera);
    }

    fn fail_start(&mut self, err: CameraError) {
        warn!("camera failed to start: {err}");
        self.queue(ScanResult::error(err.to_string()));
        self.terminate();
    }

    fn on_started(&mut self) {
        if self.state != SessionState::Starting {
            debug!("start confirmation ignored in {:?}", self.state);
            return;
        }
        self.state = SessionState::Scanning;
        info!("scanning");
        self.push_scan_rect(self.overlay.scan_rect());

        if self.options.auto_enable_flash && !self.torch_on {
            if !self.capability.has_torch() {
                debug!("auto flash requested but the camera has no torch");
            } else if let Err(err) = self.capability.set_torch(true) {
                warn!("could not enable flash: {err}");
            } else {
                self.torch_on = true;
            }
        }
    }

    fn on_detected(&mut self, detection: Detection<C::Format>) {
        if !self.state.camera_live() {
            debug!("detection ignored in {:?}", self.state);
            return;
        }
        let Some(value) = detection.value.filter(|v| !v.is_empty()) else {
            debug!("detection without a decoded value ignored");
            return;
        };
        let (format, note) = self.mapper.resolve(&detection.format);
        if self
            .pending
            .offer(ScanResult::barcode(format, note, value))
            .is_err()
        {
            debug!("detection after a queued result ignored");
            return;
        }
        info!("detected {format} barcode");
        self.begin_stop(StopReason::Finish);
    }

    fn on_failed(&mut self, err: CameraError) {
        if !self.state.camera_live() {
            debug!("engine error ignored in {:?}: {err}", self.state);
            return;
        }
        warn!("camera error: {err}");
        self.queue(ScanResult::error(err.to_string()));
        self.begin_stop(StopReason::Finish);
    }

    fn on_stopped(&mut self) {
        if self.state != SessionState::Stopping {
            debug!("stop confirmation ignored in {:?}", self.state);
            return;
        }
        self.camera_active = false;
        self.torch_on = false;
        match self.stop_reason.take() {
            Some(StopReason::Pause) => {
                info!("camera paused");
                self.state = SessionState::Idle;
                if std::mem::take(&mut self.resume_after_stop) {
                    self.resume();
                }
            }
            _ => self.terminate(),
        }
    }

    fn begin_stop(&mut self, reason: StopReason) {
        match self.state {
            SessionState::Starting | SessionState::Scanning => {
                self.state = SessionState::Stopping;
                self.stop_reason = Some(reason);
                self.capability.stop();
            }
            SessionState::Stopping => {
                let merged = self.stop_reason.map_or(reason, |r| r.merge(reason));
                if merged != StopReason::Pause {
                    self.resume_after_stop = false;
                }
                self.stop_reason = Some(merged);
            }
            SessionState::Idle | SessionState::AwaitingPermission => match reason {
                StopReason::Pause => self.state = SessionState::Idle,
                StopReason::Finish | StopReason::Teardown => self.terminate(),
            },
            SessionState::Terminated => {}
        }
    }

    fn queue(&mut self, result: ScanResult) {
        if let Err(rejected) = self.pending.offer(result) {
            debug!("{:?} result dropped, another is queued", rejected.result_type());
        }
    }

    fn terminate(&mut self) {
        self.state = SessionState::Terminated;
        self.camera_active = false;
        self.torch_on = false;
        self.overlay.stop_animating();
        match self.pending.get() {
            Some(result) => {
                self.reporter.report(result);
            }
            None => info!("session torn down without a result"),
        }
    }

    /// An empty rectangle is pushed too; it clears the engine's hint.
    fn push_scan_rect(&mut self, rect: ScanRect) {
        if self.capability.supports_scan_rect() {
            self.capability.set_scan_rect(rect);
        }
    }

    fn flash_label_for(&self, torch_on: bool) -> &str {
        if torch_on {
            self.options.strings.flash_off()
        } else {
            self.options.strings.flash_on()
        }
    }
}

impl<C: CameraCapability, H: HostChannel> Drop for ScanSession<C, H> {
    fn drop(&mut self) {
        if self.camera_active && self.state.camera_live() {
            warn!("scan session dropped with the camera running, stopping it");
            self.capability.stop();
        }
    }
}
