//! Drawing surface abstraction.
//!
//! Coordinates are screen pixels. Shapes are plain primitives; the frame
//! painter does all world → screen math before calling in.

use mind_core::{Color, WrappedText};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Text rendering failed: {0}")]
    Text(String),

    #[error("Font unavailable: {0}")]
    Font(String),
}

pub trait Canvas {
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color);

    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color);

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);

    /// Draw a text block with its top-left corner at `(x, y)`.
    ///
    /// Line extents in `text` are unscaled; the block is drawn at `scale`.
    /// When `centered`, each line is centered within the block width.
    fn draw_text(
        &mut self,
        text: &WrappedText,
        x: f32,
        y: f32,
        scale: f32,
        color: Color,
        centered: bool,
    ) -> Result<(), RenderError>;
}

/// Left edge of `line_width` inside a block of `block_width`, both unscaled.
pub fn line_offset(block_width: f32, line_width: f32, centered: bool) -> f32 {
    if centered {
        (block_width - line_width) / 2.0
    } else {
        0.0
    }
}
