//! Screen-space chrome drawn over the map: the filename label, the color
//! slider panel, and the zoom readout.
//!
//! The geometry lives here so the editor hit-tests exactly what gets painted.

use mind_core::{TextMeasure, WrappedText};

/// Width of the slider panel, flush with the right edge of the window.
pub const PANEL_WIDTH: f32 = 140.0;
pub const PANEL_HEIGHT: f32 = 335.0;
/// Screen y of the 255 end of every slider.
pub const SLIDER_TOP: f32 = 20.0;
/// Screen y of the 0 end of every slider.
pub const SLIDER_BOTTOM: f32 = 275.0;
pub const COLUMN_WIDTH: f32 = 20.0;
/// Preview swatch below the sliders.
pub const SWATCH_Y: f32 = 295.0;
pub const SWATCH_WIDTH: f32 = 100.0;
pub const SWATCH_HEIGHT: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Left edge of this channel's column for a window `width` wide.
    pub fn column_x(self, width: f32) -> f32 {
        let inset = match self {
            Channel::Red => 120.0,
            Channel::Green => 80.0,
            Channel::Blue => 40.0,
        };
        width - inset
    }

    /// `(r, g, b)` arguments that set only this channel to `value`; the
    /// other two are out of range and therefore left alone.
    pub fn channels(self, value: i32) -> (i32, i32, i32) {
        match self {
            Channel::Red => (value, -1, -1),
            Channel::Green => (-1, value, -1),
            Channel::Blue => (-1, -1, value),
        }
    }
}

/// Color slider panel anchored to the top-right corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderPanel {
    window_width: f32,
}

impl SliderPanel {
    pub fn new(window_width: f32) -> Self {
        Self { window_width }
    }

    pub fn left(&self) -> f32 {
        self.window_width - PANEL_WIDTH
    }

    /// Whether a primary press at `(x, y)` grabs the sliders instead of the map.
    pub fn grabs(&self, x: f32, y: f32) -> bool {
        y > SLIDER_TOP && y < SLIDER_BOTTOM && x > self.left()
    }

    /// Slider column under screen `x`, exclusive of the column edges.
    pub fn channel_at(&self, x: f32) -> Option<Channel> {
        Channel::ALL.into_iter().find(|c| {
            let left = c.column_x(self.window_width);
            x > left && x < left + COLUMN_WIDTH
        })
    }

    /// Channel value for screen `y`; `None` above or below the sliders.
    pub fn value_at(y: f32) -> Option<i32> {
        (SLIDER_TOP..=SLIDER_BOTTOM)
            .contains(&y)
            .then(|| (SLIDER_BOTTOM - y) as i32)
    }

    /// Screen y of the row showing `value`.
    pub fn row_y(value: u8) -> f32 {
        SLIDER_BOTTOM - value as f32
    }
}

/// The ` File: <name>` label in the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct FilenameLabel {
    pub text: WrappedText,
}

impl FilenameLabel {
    pub fn new(file_name: &str, measure: &dyn TextMeasure) -> Self {
        Self {
            text: WrappedText::single_line(&format!(" File: {file_name}"), measure),
        }
    }

    /// Clicks inside the text extent start filename editing.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x < self.text.width && y < self.text.height
    }
}

/// Everything drawn in screen space on top of the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub filename: FilenameLabel,
    pub zoom_label: WrappedText,
    /// Outcome of the last save or load, drawn after the zoom label.
    pub status: WrappedText,
}

impl Overlay {
    pub fn new(file_name: &str, zoom_percent: i32, measure: &dyn TextMeasure) -> Self {
        Self {
            filename: FilenameLabel::new(file_name, measure),
            zoom_label: WrappedText::single_line(&format!("{zoom_percent}%"), measure),
            status: WrappedText::default(),
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: Option<&str>, measure: &dyn TextMeasure) -> Self {
        self.status = status
            .map(|s| WrappedText::single_line(s, measure))
            .unwrap_or_default();
        self
    }
}
