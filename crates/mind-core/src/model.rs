//! Node-level data: colors, style, text, and the cached text layout.
//!
//! Everything relational (links, roots, selection) lives on
//! [`MindMap`](crate::MindMap); a `MindNode` only knows about itself.

use crate::layout::{TextMeasure, WrappedText, clamp_radius, wrap_text};
use serde::{Deserialize, Serialize};

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    /// Background of a freshly created node.
    pub const NODE_DEFAULT: Color = Color::rgba(37, 232, 250, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Replace the RGB channels whose value is in `[0, 255]`.
    ///
    /// Anything outside that range (conventionally `-1`) leaves the channel
    /// untouched, so a caller can update a single channel at a time.
    #[must_use]
    pub fn with_channels(self, r: i32, g: i32, b: i32) -> Self {
        Self {
            r: channel(r).unwrap_or(self.r),
            g: channel(g).unwrap_or(self.g),
            b: channel(b).unwrap_or(self.b),
            a: self.a,
        }
    }
}

fn channel(value: i32) -> Option<u8> {
    u8::try_from(value).ok()
}

// ─── Pan ─────────────────────────────────────────────────────────────────

/// World-to-screen translation of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pan {
    pub dx: f32,
    pub dy: f32,
}

impl Pan {
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// Label given to new nodes.
pub const PLACEHOLDER_TEXT: &str = "Insert Text";

/// A single vertex of the mind map.
#[derive(Debug, Clone)]
pub struct MindNode {
    /// World-space center.
    pub x: f32,
    pub y: f32,
    pub text_color: Color,
    pub bg_color: Color,
    /// Center each wrapped line horizontally (otherwise left-aligned).
    pub centered_text: bool,
    radius: f32,
    text: String,
    /// Cached wrap of `text`; `None` when the text changed since the last
    /// layout pass.
    layout: Option<WrappedText>,
    /// Set by the owning map on insertion.
    pub(crate) generation: u32,
}

impl MindNode {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            text_color: Color::BLACK,
            bg_color: Color::NODE_DEFAULT,
            centered_text: true,
            radius: 0.0,
            text: PLACEHOLDER_TEXT.to_string(),
            layout: None,
            generation: 0,
        }
    }

    /// Rebuild a node from persisted attributes. Layout starts stale so the
    /// renderer re-derives it with whatever font the process has loaded.
    pub(crate) fn restore(
        x: f32,
        y: f32,
        radius: f32,
        text: String,
        text_color: Color,
        bg_color: Color,
        centered_text: bool,
    ) -> Self {
        Self {
            x,
            y,
            text_color,
            bg_color,
            centered_text,
            radius: clamp_radius(radius),
            text,
            layout: None,
            generation: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    /// Euclidean distance from the center to a world point.
    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        (self.x - x).hypot(self.y - y)
    }

    /// Update background channels in `[0, 255]`; see [`Color::with_channels`].
    pub fn set_background_channels(&mut self, r: i32, g: i32, b: i32) {
        self.bg_color = self.bg_color.with_channels(r, g, b);
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.layout = None;
    }

    pub fn append_text(&mut self, fragment: &str) {
        if fragment.is_empty() {
            return;
        }
        self.text.push_str(fragment);
        self.layout = None;
    }

    /// Remove the last character. Returns `false` when the text was empty.
    pub fn pop_char(&mut self) -> bool {
        if self.text.pop().is_none() {
            return false;
        }
        self.layout = None;
        true
    }

    pub fn is_layout_dirty(&self) -> bool {
        self.layout.is_none()
    }

    /// The wrapped label from the last layout pass.
    pub fn layout(&self) -> Option<&WrappedText> {
        self.layout.as_ref()
    }

    /// Re-wrap the text and recompute the radius if the text changed.
    ///
    /// Empty text produces an empty block and keeps the previous radius, so
    /// clearing a label never collapses the node out from under the cursor.
    /// Returns `true` when a layout pass actually ran.
    pub fn refresh_layout(&mut self, measure: &dyn TextMeasure) -> bool {
        if self.layout.is_some() {
            return false;
        }
        let wrapped = wrap_text(&self.text, measure);
        if !wrapped.is_empty() {
            self.radius = wrapped.radius();
        }
        self.layout = Some(wrapped);
        true
    }
}
