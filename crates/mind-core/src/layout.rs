//! Node text layout: greedy word wrap and the derived node radius.
//!
//! The radius of a node is not stored by the user; it falls out of how its
//! text wraps. The wrap budget is the side of the square with the same area
//! as the unwrapped single-line rendering, so long labels grow into roughly
//! round blocks instead of long strips.
//!
//! Measurement is abstracted behind [`TextMeasure`] so the same policy runs
//! against a real font in the renderer and against fixed metrics in tests.

/// Upper bound on a node radius.
pub const MAX_RADIUS: f32 = 500.0;
/// Radius used when the computed value is negative or not a number.
pub const FALLBACK_RADIUS: f32 = 50.0;
/// Padding between the text block and the node outline.
pub const RADIUS_PADDING: f32 = 10.0;

/// Measures rendered text extents in pixels.
pub trait TextMeasure {
    /// Width and height of `text` rendered on a single line.
    fn measure(&self, text: &str) -> (f32, f32);
}

/// Fixed-advance metrics: every character is `advance` wide and every line
/// `line_height` tall. Used headless and in tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMetrics {
    pub advance: f32,
    pub line_height: f32,
}

impl Default for FixedMetrics {
    fn default() -> Self {
        // Roughly an 18px UI font.
        Self {
            advance: 9.0,
            line_height: 21.0,
        }
    }
}

impl TextMeasure for FixedMetrics {
    fn measure(&self, text: &str) -> (f32, f32) {
        (text.chars().count() as f32 * self.advance, self.line_height)
    }
}

/// A node label broken into lines, with the size of the resulting block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WrappedText {
    pub lines: Vec<WrappedLine>,
    pub width: f32,
    pub height: f32,
}

/// One wrapped line and its measured extent.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    pub text: String,
    pub width: f32,
    pub height: f32,
}

impl WrappedText {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// `text` as one unwrapped line. Used for UI labels.
    pub fn single_line(text: &str, measure: &dyn TextMeasure) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        let (width, height) = measure.measure(text);
        Self {
            lines: vec![WrappedLine {
                text: text.to_string(),
                width,
                height,
            }],
            width,
            height,
        }
    }

    /// Radius of the circle enclosing this block, padded and clamped.
    pub fn radius(&self) -> f32 {
        radius_for(self.width, self.height)
    }
}

/// Wrap `text` greedily.
///
/// Characters are packed onto the current line while summing their widths;
/// a space that arrives once the line already exceeds the budget ends the
/// line and is dropped. Explicit newlines always end a line. Empty lines are
/// discarded.
pub fn wrap_text(text: &str, measure: &dyn TextMeasure) -> WrappedText {
    if text.is_empty() {
        return WrappedText::default();
    }

    let (w, h) = measure.measure(text);
    let budget = (w * h).max(0.0).sqrt().floor();

    let mut raw_lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut width = 0.0_f32;
    let mut buf = [0u8; 4];

    for ch in text.chars() {
        if ch == '\n' || (ch == ' ' && width > budget) {
            raw_lines.push(std::mem::take(&mut current));
            width = 0.0;
            continue;
        }
        current.push(ch);
        width += measure.measure(ch.encode_utf8(&mut buf)).0;
    }
    raw_lines.push(current);

    let mut wrapped = WrappedText::default();
    for line in raw_lines.into_iter().filter(|l| !l.is_empty()) {
        let (lw, lh) = measure.measure(&line);
        wrapped.width = wrapped.width.max(lw);
        wrapped.height += lh;
        wrapped.lines.push(WrappedLine {
            text: line,
            width: lw,
            height: lh,
        });
    }
    wrapped
}

/// `sqrt(w² + h²) / 2 + padding`, clamped to `[0, MAX_RADIUS]`.
pub fn radius_for(width: f32, height: f32) -> f32 {
    clamp_radius((width * width + height * height).sqrt() / 2.0 + RADIUS_PADDING)
}

/// Clamp a radius into range; negative or NaN values fall back to
/// [`FALLBACK_RADIUS`].
pub fn clamp_radius(radius: f32) -> f32 {
    if radius.is_nan() || radius < 0.0 {
        FALLBACK_RADIUS
    } else {
        radius.min(MAX_RADIUS)
    }
}
