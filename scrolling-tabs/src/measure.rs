use std::sync::Arc;

use unicode_width::UnicodeWidthStr;

use crate::options::{DEFAULT_CELL_PADDING, LabelFont, TextMeasure};
use crate::strip::TabCell;

/// Average glyph advance relative to the font size, used by [`estimate_text_width`].
pub(crate) const CHAR_WIDTH_FACTOR: f32 = 0.6;

/// Estimates a label's width from its display width in terminal columns.
///
/// Hosts with a real text shaper should install their own measure through
/// [`MeasuringCell::set_text_measure`].
pub fn estimate_text_width(text: &str, font: &LabelFont) -> f32 {
    text.width() as f32 * font.size.max(0.0) * CHAR_WIDTH_FACTOR
}

/// A scratch cell used to compute natural tab widths.
///
/// Each [`crate::TabStrip`] owns one; every measurement reuses the same cell (and its title
/// buffer) instead of allocating.
pub struct MeasuringCell {
    scratch: TabCell,
    padding: f32,
    measure_text: TextMeasure,
}

impl MeasuringCell {
    pub fn new(padding: f32) -> Self {
        Self {
            scratch: TabCell::default(),
            padding: padding.max(0.0),
            measure_text: Arc::new(estimate_text_width),
        }
    }

    pub fn with_text_measure(
        padding: f32,
        measure_text: impl Fn(&str, &LabelFont) -> f32 + Send + Sync + 'static,
    ) -> Self {
        let mut cell = Self::new(padding);
        cell.measure_text = Arc::new(measure_text);
        cell
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn set_padding(&mut self, padding: f32) {
        self.padding = padding.max(0.0);
    }

    pub fn set_text_measure(
        &mut self,
        measure_text: impl Fn(&str, &LabelFont) -> f32 + Send + Sync + 'static,
    ) {
        self.measure_text = Arc::new(measure_text);
    }

    /// Natural width of a cell showing `title`: label width plus padding on both sides.
    pub fn measure(&mut self, title: &str, font: &LabelFont) -> f32 {
        self.scratch.title.clear();
        self.scratch.title.push_str(title);

        let text = (self.measure_text)(&self.scratch.title, font);
        let text = if text.is_finite() { text.max(0.0) } else { 0.0 };
        text + self.padding * 2.0
    }
}

impl Default for MeasuringCell {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_PADDING)
    }
}

impl Clone for MeasuringCell {
    fn clone(&self) -> Self {
        Self {
            scratch: TabCell::default(),
            padding: self.padding,
            measure_text: Arc::clone(&self.measure_text),
        }
    }
}

impl core::fmt::Debug for MeasuringCell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MeasuringCell")
            .field("padding", &self.padding)
            .finish_non_exhaustive()
    }
}
