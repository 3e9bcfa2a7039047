//! Mind map → canvas drawing commands.
//!
//! One frame is painted in three layers: link lines with arrowheads, then
//! nodes in arena order, then the screen-space overlay. Map geometry is
//! transformed with `screen = (world + pan) * zoom`; the overlay is drawn
//! unscaled.

use crate::canvas::Canvas;
use crate::overlay::{
    COLUMN_WIDTH, Channel, Overlay, PANEL_HEIGHT, PANEL_WIDTH, SWATCH_HEIGHT, SWATCH_WIDTH,
    SWATCH_Y, SliderPanel,
};
use mind_core::{Color, MindMap, MindNode, Pan, WrappedText};

/// Arrowhead barb length along the link, in world units.
const ARROW_LENGTH: f32 = 20.0;
/// Arrowhead half-width, in world units.
const ARROW_HALF_WIDTH: f32 = 10.0;
/// Extra radius of the selection halo.
const HALO_PADDING: f32 = 10.0;

const HALO_COLOR: Color = Color::rgba(0, 255, 0, 100);
const LABEL_COLOR: Color = Color::rgb(150, 200, 255);
const MARKER_COLOR: Color = Color::rgb(127, 127, 127);
/// Space between the zoom label and the status line.
const STATUS_GAP: f32 = 10.0;

/// Window size and the transform in effect for this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameView {
    pub width: f32,
    pub height: f32,
    pub zoom: f32,
    /// Effective pan, including any drag in progress.
    pub pan: Pan,
}

impl FrameView {
    pub fn to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        ((x + self.pan.dx) * self.zoom, (y + self.pan.dy) * self.zoom)
    }
}

/// Paint a full frame.
///
/// Node layouts should be refreshed beforehand; nodes without a layout are
/// drawn without text.
pub fn paint_frame(canvas: &mut dyn Canvas, map: &MindMap, view: &FrameView, overlay: &Overlay) {
    log::trace!(
        "paint {} node(s) at zoom {} pan ({}, {})",
        map.len(),
        view.zoom,
        view.pan.dx,
        view.pan.dy
    );

    for (id, parent) in map.nodes() {
        for child in map.children(id) {
            if let Some(child) = map.node(child) {
                paint_link(canvas, parent, child, view);
            }
        }
    }

    let selected = map.selected();
    for (id, node) in map.nodes() {
        paint_node(canvas, node, selected == Some(id), view);
    }

    paint_overlay(canvas, map, view, overlay);
}

// ─── Map layer ───────────────────────────────────────────────────────────────

fn paint_link(canvas: &mut dyn Canvas, parent: &MindNode, child: &MindNode, view: &FrameView) {
    let (px, py) = view.to_screen(parent.x, parent.y);
    let (cx, cy) = view.to_screen(child.x, child.y);
    canvas.line(px, py, cx, cy, Color::BLACK);

    // Arrowhead at the child's outline, built along +x then rotated.
    let dx = child.x - parent.x;
    let dy = child.y - parent.y;
    let angle = dy.atan2(dx);
    let along = dx.hypot(dy) - child.radius();

    let tip = rotate(along, 0.0, angle);
    let barbs = [
        rotate(along - ARROW_LENGTH, -ARROW_HALF_WIDTH, angle),
        rotate(along - ARROW_LENGTH, ARROW_HALF_WIDTH, angle),
    ];
    let (tx, ty) = view.to_screen(parent.x + tip.0, parent.y + tip.1);
    for (bx, by) in barbs {
        let (bx, by) = view.to_screen(parent.x + bx, parent.y + by);
        canvas.line(tx, ty, bx, by, Color::BLACK);
    }
}

fn rotate(x: f32, y: f32, angle: f32) -> (f32, f32) {
    let (sin, cos) = angle.sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}

fn paint_node(canvas: &mut dyn Canvas, node: &MindNode, selected: bool, view: &FrameView) {
    let (sx, sy) = view.to_screen(node.x, node.y);
    let radius = node.radius() * view.zoom;

    if selected {
        canvas.fill_circle(sx, sy, radius + HALO_PADDING * view.zoom, HALO_COLOR);
    }
    canvas.fill_circle(sx, sy, radius, Color { a: 255, ..node.bg_color });
    canvas.stroke_circle(sx, sy, radius, Color::BLACK);

    let Some(layout) = node.layout().filter(|l| !l.is_empty()) else {
        return;
    };
    let (tx, ty) = view.to_screen(node.x - layout.width / 2.0, node.y - layout.height / 2.0);
    if let Err(e) = canvas.draw_text(layout, tx, ty, view.zoom, node.text_color, node.centered_text)
    {
        log::warn!("skipping node text {:?}: {e}", node.text());
    }
}

// ─── Overlay layer ───────────────────────────────────────────────────────────

fn paint_overlay(canvas: &mut dyn Canvas, map: &MindMap, view: &FrameView, overlay: &Overlay) {
    let label = &overlay.filename.text;
    canvas.fill_rect(0.0, 0.0, label.width + 10.0, label.height, LABEL_COLOR);
    canvas.stroke_rect(0.0, 0.0, label.width + 10.0, label.height, Color::BLACK);
    draw_label(canvas, label, 0.0, 0.0);

    if let Some(node) = map.selected_node() {
        paint_slider_panel(canvas, node.bg_color, view.width);
    }

    let zoom = &overlay.zoom_label;
    draw_label(canvas, zoom, 0.0, view.height - zoom.height);

    let status = &overlay.status;
    draw_label(canvas, status, zoom.width + STATUS_GAP, view.height - status.height);
}

fn paint_slider_panel(canvas: &mut dyn Canvas, color: Color, width: f32) {
    let panel = SliderPanel::new(width);
    canvas.fill_rect(panel.left(), 0.0, PANEL_WIDTH, PANEL_HEIGHT, Color::WHITE);
    canvas.stroke_rect(panel.left(), 0.0, PANEL_WIDTH, PANEL_HEIGHT, Color::BLACK);

    // Each column previews the color with its own channel swept 0..255.
    for value in 0..u8::MAX {
        let y = SliderPanel::row_y(value);
        for channel in Channel::ALL {
            let row = match channel {
                Channel::Red => Color { r: value, a: 255, ..color },
                Channel::Green => Color { g: value, a: 255, ..color },
                Channel::Blue => Color { b: value, a: 255, ..color },
            };
            canvas.fill_rect(channel.column_x(width), y, COLUMN_WIDTH, 1.0, row);
        }
    }

    for (channel, value) in Channel::ALL.into_iter().zip([color.r, color.g, color.b]) {
        let y = SliderPanel::row_y(value) - 2.0;
        canvas.stroke_rect(channel.column_x(width), y, COLUMN_WIDTH, 5.0, MARKER_COLOR);
    }

    canvas.fill_rect(
        Channel::Red.column_x(width),
        SWATCH_Y,
        SWATCH_WIDTH,
        SWATCH_HEIGHT,
        color,
    );
}

fn draw_label(canvas: &mut dyn Canvas, text: &WrappedText, x: f32, y: f32) {
    if text.is_empty() {
        return;
    }
    if let Err(e) = canvas.draw_text(text, x, y, 1.0, Color::BLACK, false) {
        log::warn!("skipping overlay label: {e}");
    }
}
