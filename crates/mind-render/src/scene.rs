//! Vello backend for [`Canvas`].
//!
//! Shapes are encoded into a `vello::Scene`; the host presents it through
//! its own wgpu surface.

use crate::canvas::{Canvas, RenderError, line_offset};
use kurbo::{Affine, Circle, Line, Rect, Shape, Stroke};
use mind_core::{Color, WrappedText};
use peniko::Fill;
use vello::Scene;

/// Outline width for circles, rectangles and links.
const STROKE_WIDTH: f64 = 1.0;

pub struct SceneCanvas {
    scene: Scene,
    stroke: Stroke,
    shapes: usize,
}

impl Default for SceneCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneCanvas {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            stroke: Stroke::new(STROKE_WIDTH),
            shapes: 0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Shapes encoded since the last reset.
    pub fn shape_count(&self) -> usize {
        self.shapes
    }

    /// Clear recorded commands before painting the next frame.
    pub fn reset(&mut self) {
        self.scene.reset();
        self.shapes = 0;
    }

    fn fill_shape(&mut self, shape: &impl Shape, color: Color) {
        self.scene
            .fill(Fill::NonZero, Affine::IDENTITY, to_peniko(color), None, shape);
        self.shapes += 1;
    }

    fn stroke_shape(&mut self, shape: &impl Shape, color: Color) {
        self.scene
            .stroke(&self.stroke, Affine::IDENTITY, to_peniko(color), None, shape);
        self.shapes += 1;
    }
}

impl Canvas for SceneCanvas {
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        self.fill_shape(&circle(cx, cy, radius), color);
    }

    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        self.stroke_shape(&circle(cx, cy, radius), color);
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color) {
        let line = Line::new((x1 as f64, y1 as f64), (x2 as f64, y2 as f64));
        self.stroke_shape(&line, color);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.fill_shape(&rect(x, y, w, h), color);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.stroke_shape(&rect(x, y, w, h), color);
    }

    fn draw_text(
        &mut self,
        text: &WrappedText,
        x: f32,
        y: f32,
        scale: f32,
        color: Color,
        centered: bool,
    ) -> Result<(), RenderError> {
        let mut line_y = y;
        for line in &text.lines {
            let line_x = x + line_offset(text.width, line.width, centered) * scale;
            log::trace!(
                "TEXT {:?} at ({line_x}, {line_y}) scale {scale} color {color:?}",
                line.text
            );
            // Glyph runs need a font context, which this backend does not own.
            line_y += line.height * scale;
        }
        Ok(())
    }
}

fn circle(cx: f32, cy: f32, radius: f32) -> Circle {
    Circle::new((cx as f64, cy as f64), radius.max(0.0) as f64)
}

fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
    Rect::new(x as f64, y as f64, (x + w) as f64, (y + h) as f64)
}

fn to_peniko(c: Color) -> peniko::Color {
    peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::Overlay;
    use crate::paint::{FrameView, paint_frame};
    use mind_core::{FixedMetrics, MindMap, Pan};
    use pretty_assertions::assert_eq;

    #[test]
    fn frame_encodes_into_scene() {
        let metrics = FixedMetrics::default();
        let mut map = MindMap::new();
        let a = map.create_node(0.0, 0.0);
        let b = map.create_node(200.0, 100.0);
        map.add_child_link(a, b);
        map.select(Some(a));
        map.refresh_layouts(&metrics);

        let view = FrameView {
            width: 1280.0,
            height: 720.0,
            zoom: 1.0,
            pan: Pan::default(),
        };
        let mut canvas = SceneCanvas::new();
        paint_frame(&mut canvas, &map, &view, &Overlay::new("map.mind", 100, &metrics));

        // 3 link lines, halo + 2 fills + 2 outlines, label fill + outline,
        // slider panel fill + outline, 765 slider rows, 3 markers, swatch.
        assert_eq!(canvas.shape_count(), 3 + 5 + 2 + 2 + 765 + 3 + 1);

        canvas.reset();
        assert_eq!(canvas.shape_count(), 0);
    }

    #[test]
    fn text_is_accepted_without_font() {
        let mut canvas = SceneCanvas::default();
        let text = mind_core::layout::wrap_text("two words", &FixedMetrics::default());
        assert!(
            canvas
                .draw_text(&text, 0.0, 0.0, 1.0, Color::BLACK, true)
                .is_ok()
        );
    }

    #[test]
    fn negative_radius_is_clamped() {
        assert_eq!(circle(0.0, 0.0, -4.0).radius, 0.0);
        assert_eq!(rect(1.0, 2.0, 3.0, 4.0), Rect::new(1.0, 2.0, 4.0, 6.0));
    }
}
