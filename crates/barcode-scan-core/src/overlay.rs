//! Scan-target overlay geometry.
//!
//! The overlay is a centered 4:3 rectangle covering 80 % of the viewport
//! width (or the full height when the viewport is too flat), decorated with
//! corner brackets, a dimmed surround and a blinking horizontal scan line.
//! All geometry is recomputed from scratch whenever the viewport changes;
//! nothing depends on device orientation other than the bounds themselves.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Fraction of the viewport width covered by the scan rectangle.
pub const SCAN_RECT_WIDTH_FRAC: f32 = 0.8;
/// Height / width of the scan rectangle.
pub const SCAN_RECT_ASPECT: f32 = 3.0 / 4.0;
/// One full blink of the scan line.
pub const SCAN_LINE_PERIOD: Duration = Duration::from_millis(1200);

const CORNER_FRAC: f32 = 0.1;
const CORNER_MIN: f32 = 8.0;
const CORNER_MAX: f32 = 40.0;

/// Current bounds of the view presenting the camera preview.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// Coarse orientation derived from the viewport bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewOrientation {
    Portrait,
    Landscape,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// `true` when the bounds cannot hold any rectangle.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    pub fn orientation(&self) -> ViewOrientation {
        if self.width > self.height {
            ViewOrientation::Landscape
        } else {
            ViewOrientation::Portrait
        }
    }

    pub fn bounds(&self) -> ScanRect {
        ScanRect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Axis-aligned rectangle in view coordinates (origin top-left).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ScanRect {
    pub const EMPTY: ScanRect = ScanRect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> [f32; 2] {
        [self.x + self.width * 0.5, self.y + self.height * 0.5]
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.max_x() && py >= self.y && py <= self.max_y()
    }

    /// Express the rectangle in `0..1` units of the viewport, the form
    /// region-of-interest APIs expect.
    pub fn normalized(&self, viewport: Viewport) -> ScanRect {
        if viewport.is_degenerate() {
            return ScanRect::EMPTY;
        }
        ScanRect {
            x: self.x / viewport.width,
            y: self.y / viewport.height,
            width: self.width / viewport.width,
            height: self.height / viewport.height,
        }
    }
}

/// Compute the scan rectangle for a viewport.
pub fn scan_rect_for(viewport: Viewport) -> ScanRect {
    if viewport.is_degenerate() {
        return ScanRect::EMPTY;
    }
    let mut width = viewport.width * SCAN_RECT_WIDTH_FRAC;
    let mut height = width * SCAN_RECT_ASPECT;
    if height > viewport.height {
        height = viewport.height;
        width = height / SCAN_RECT_ASPECT;
    }
    ScanRect {
        x: (viewport.width - width) * 0.5,
        y: (viewport.height - height) * 0.5,
        width,
        height,
    }
}

/// A straight line segment, used for the corner brackets.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: [f32; 2],
    pub to: [f32; 2],
}

/// Everything needed to draw the overlay for one viewport.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlayLayout {
    pub viewport: Viewport,
    pub scan_rect: ScanRect,
    /// 1 px line across the vertical middle of the scan rectangle.
    pub scan_line: ScanRect,
    /// Two segments per corner: TL, TR, BR, BL.
    pub corners: [Segment; 8],
    /// Regions outside the scan rectangle: top, bottom, left, right.
    pub dimmed: [ScanRect; 4],
}

impl OverlayLayout {
    pub fn compute(viewport: Viewport) -> Self {
        let r = scan_rect_for(viewport);
        let line_height = if r.is_empty() { 0.0 } else { 1.0 };
        let scan_line = ScanRect::new(r.x, r.y + r.height * 0.5, r.width, line_height);

        let len = (r.width.min(r.height) * CORNER_FRAC).clamp(CORNER_MIN, CORNER_MAX);
        let len = if r.is_empty() { 0.0 } else { len };
        let (x0, y0, x1, y1) = (r.x, r.y, r.max_x(), r.max_y());
        let seg = |from: [f32; 2], to: [f32; 2]| Segment { from, to };
        let corners = [
            seg([x0, y0], [x0 + len, y0]),
            seg([x0, y0], [x0, y0 + len]),
            seg([x1, y0], [x1 - len, y0]),
            seg([x1, y0], [x1, y0 + len]),
            seg([x1, y1], [x1 - len, y1]),
            seg([x1, y1], [x1, y1 - len]),
            seg([x0, y1], [x0 + len, y1]),
            seg([x0, y1], [x0, y1 - len]),
        ];

        let (w, h) = if viewport.is_degenerate() {
            (0.0, 0.0)
        } else {
            (viewport.width, viewport.height)
        };
        let dimmed = [
            ScanRect::new(0.0, 0.0, w, y0),
            ScanRect::new(0.0, y1, w, (h - y1).max(0.0)),
            ScanRect::new(0.0, y0, x0, r.height),
            ScanRect::new(x1, y0, (w - x1).max(0.0), r.height),
        ];

        Self {
            viewport,
            scan_rect: r,
            scan_line,
            corners,
            dimmed,
        }
    }
}

/// Overlay state driven by viewport-changed events.
#[derive(Clone, Debug)]
pub struct ScannerOverlay {
    layout: OverlayLayout,
    animation_started: Option<Instant>,
}

impl ScannerOverlay {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            layout: OverlayLayout::compute(viewport),
            animation_started: None,
        }
    }

    #[inline]
    pub fn layout(&self) -> &OverlayLayout {
        &self.layout
    }

    #[inline]
    pub fn scan_rect(&self) -> ScanRect {
        self.layout.scan_rect
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.layout.viewport
    }

    /// Recompute the layout for new bounds and return the new scan rectangle.
    ///
    /// The animation keeps running across the change.
    pub fn on_viewport_changed(&mut self, viewport: Viewport) -> ScanRect {
        self.layout = OverlayLayout::compute(viewport);
        self.layout.scan_rect
    }

    pub fn start_animating(&mut self, now: Instant) {
        if self.animation_started.is_none() {
            self.animation_started = Some(now);
        }
    }

    pub fn stop_animating(&mut self) {
        self.animation_started = None;
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation_started.is_some()
    }

    /// Scan-line opacity at `now`: a 0 -> 1 -> 0 triangle wave while
    /// animating, fully opaque otherwise.
    pub fn scan_line_opacity(&self, now: Instant) -> f32 {
        let Some(started) = self.animation_started else {
            return 1.0;
        };
        let period = SCAN_LINE_PERIOD.as_secs_f32();
        let t = now.saturating_duration_since(started).as_secs_f32() % period / period;
        if t < 0.5 {
            t * 2.0
        } else {
            2.0 - t * 2.0
        }
    }
}
