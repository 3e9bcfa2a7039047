//! Window size, zoom level, and the world ↔ screen transform.
//!
//! `world = screen / zoom - pan` and `screen = (world + pan) * zoom`. The
//! pan offset itself belongs to the map (it is saved with it), so every
//! conversion takes it as an argument.

use mind_core::{Pan, ZoomConfig};

/// Zoom level a fresh or freshly loaded map starts at.
pub const DEFAULT_ZOOM_PERCENT: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    zoom_percent: i32,
    limits: ZoomConfig,
}

impl Viewport {
    /// Limits that fail [`ZoomConfig::validate`] are replaced by their
    /// sanitized form, so the zoom never reaches zero.
    pub fn new(width: f32, height: f32, limits: ZoomConfig) -> Self {
        let limits = limits.sanitized();
        Self {
            width,
            height,
            zoom_percent: DEFAULT_ZOOM_PERCENT.clamp(limits.min, limits.max),
            limits,
        }
    }

    pub fn zoom_percent(&self) -> i32 {
        self.zoom_percent
    }

    pub fn zoom(&self) -> f32 {
        self.zoom_percent as f32 / 100.0
    }

    pub fn reset_zoom(&mut self) {
        self.zoom_percent = DEFAULT_ZOOM_PERCENT.clamp(self.limits.min, self.limits.max);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn screen_to_world(&self, pan: Pan, sx: f32, sy: f32) -> (f32, f32) {
        let zoom = self.zoom();
        (sx / zoom - pan.dx, sy / zoom - pan.dy)
    }

    pub fn world_to_screen(&self, pan: Pan, wx: f32, wy: f32) -> (f32, f32) {
        let zoom = self.zoom();
        ((wx + pan.dx) * zoom, (wy + pan.dy) * zoom)
    }

    /// Step the zoom one notch in the direction of `delta` about the screen
    /// point `(sx, sy)`.
    ///
    /// Returns the pan that keeps the world point under `(sx, sy)` where it
    /// was. At a zoom limit the level does not change and neither does the
    /// pan.
    pub fn zoom_about(&mut self, pan: Pan, sx: f32, sy: f32, delta: f32) -> Pan {
        let step = if delta > 0.0 {
            self.limits.step
        } else if delta < 0.0 {
            -self.limits.step
        } else {
            0
        };

        let before = (sx / self.zoom(), sy / self.zoom());
        self.zoom_percent = (self.zoom_percent + step).clamp(self.limits.min, self.limits.max);
        let after = (sx / self.zoom(), sy / self.zoom());

        Pan::new(
            pan.dx - (before.0 - after.0),
            pan.dy - (before.1 - after.1),
        )
    }
}
