use crate::measure::MeasuringCell;
use crate::options::{DividerStyle, IndicatorStyle, LabelTheme};
use crate::{Color, Rect, Size, TabSizing};

/// Fractional page positions closer than this to a whole page snap onto it.
pub(crate) const PAGE_SNAP_EPSILON: f32 = 1e-4;

/// One label cell in the strip.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabCell {
    pub title: String,
    /// Width supplied by the data source. Overrides the sizing policy for this cell.
    pub preferred_width: Option<f32>,
    /// Position inside the strip's scrollable content. Computed by the strip.
    pub frame: Rect,
    pub selected: bool,
}

impl TabCell {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_preferred_width(mut self, width: Option<f32>) -> Self {
        self.preferred_width = width;
        self
    }
}

/// Geometry of the floating selection indicator, in strip content coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndicatorGeometry {
    pub frame: Rect,
}

/// Splits a pan percentage into the two blended cells and the share owned by the second.
///
/// `percentage` must already be clamped into `[0, 1]` and `count` must be non-zero. At the
/// extremes both indexes collapse onto the same clamped cell.
pub(crate) fn blend_indices(percentage: f32, count: usize) -> (usize, usize, f32) {
    let scaled = snap_to_whole(percentage * count as f32);
    let floor = scaled.floor();
    let share_second = (scaled - floor).clamp(0.0, 1.0);

    let last = count - 1;
    let first = if floor <= 0.0 {
        0
    } else {
        (floor as usize).min(last)
    };
    let second = (first + 1).min(last);
    (first, second, share_second)
}

pub(crate) fn snap_to_whole(value: f32) -> f32 {
    let nearest = value.round();
    if (value - nearest).abs() < PAGE_SNAP_EPSILON {
        nearest
    } else {
        value
    }
}

fn sanitize(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// A horizontal strip of tab labels with a selection indicator that tracks a continuous pan
/// position.
///
/// The strip lays cells out left to right with no spacing. Its visible viewport is
/// `[content_offset, content_offset + size.width)` in content coordinates.
#[derive(Clone, Debug)]
pub struct TabStrip {
    cells: Vec<TabCell>,
    sizing: TabSizing,
    center_select: bool,
    size: Size,
    indicator_style: IndicatorStyle,
    divider: DividerStyle,
    theme: LabelTheme,
    measurer: MeasuringCell,

    content_width: f32,
    content_offset: f32,
    indicator: IndicatorGeometry,
    active: Option<usize>,
    last_percentage: f32,
}

impl Default for TabStrip {
    fn default() -> Self {
        Self::new(MeasuringCell::default())
    }
}

impl TabStrip {
    pub fn new(measurer: MeasuringCell) -> Self {
        Self {
            cells: Vec::new(),
            sizing: TabSizing::default(),
            center_select: false,
            size: Size::default(),
            indicator_style: IndicatorStyle::default(),
            divider: DividerStyle::default(),
            theme: LabelTheme::default(),
            measurer,
            content_width: 0.0,
            content_offset: 0.0,
            indicator: IndicatorGeometry::default(),
            active: None,
            last_percentage: 0.0,
        }
    }

    pub fn tab_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[TabCell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&TabCell> {
        self.cells.get(index)
    }

    /// Replaces every cell and lays the strip out again.
    pub fn set_cells(&mut self, mut cells: Vec<TabCell>) {
        for cell in &mut cells {
            cell.selected = false;
        }
        self.cells = cells;
        self.active = None;
        self.relayout();
    }

    pub fn sizing(&self) -> TabSizing {
        self.sizing
    }

    pub fn set_sizing(&mut self, sizing: TabSizing) {
        if self.sizing == sizing {
            return;
        }
        tdebug!(?sizing, "TabStrip::set_sizing");
        self.sizing = sizing;
        self.relayout();
    }

    pub fn center_select(&self) -> bool {
        self.center_select
    }

    pub fn set_center_select(&mut self, center_select: bool) {
        if self.center_select == center_select {
            return;
        }
        self.center_select = center_select;
        self.pan_to_percentage(self.last_percentage);
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Sets the strip's frame size. Cells are only re-laid out when the height changes or the
    /// sizing policy depends on the available width.
    pub fn set_size(&mut self, size: Size) {
        let size = Size::new(sanitize(size.width), sanitize(size.height));
        if self.size == size {
            return;
        }
        let height_changed = self.size.height != size.height;
        self.size = size;
        if height_changed || self.sizing.tracks_available_width() {
            self.relayout();
        } else {
            self.pan_to_percentage(self.last_percentage);
        }
    }

    pub fn indicator_style(&self) -> IndicatorStyle {
        self.indicator_style
    }

    pub fn set_indicator_style(&mut self, style: IndicatorStyle) {
        self.indicator_style = style;
        self.pan_to_percentage(self.last_percentage);
    }

    pub fn divider_style(&self) -> DividerStyle {
        self.divider
    }

    pub fn set_divider_style(&mut self, divider: DividerStyle) {
        self.divider = divider;
    }

    pub fn theme(&self) -> &LabelTheme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: LabelTheme) {
        if self.theme == theme {
            return;
        }
        self.theme = theme;
        self.relayout();
    }

    pub fn measurer(&self) -> &MeasuringCell {
        &self.measurer
    }

    /// Mutable access to the measuring cell. Call [`TabStrip::relayout`] after changing it.
    pub fn measurer_mut(&mut self) -> &mut MeasuringCell {
        &mut self.measurer
    }

    pub fn content_width(&self) -> f32 {
        self.content_width
    }

    pub fn content_offset(&self) -> f32 {
        self.content_offset
    }

    pub fn indicator(&self) -> IndicatorGeometry {
        self.indicator
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn last_percentage(&self) -> f32 {
        self.last_percentage
    }

    /// Extra scroll room on each side so the edge cells can be centered.
    pub fn content_inset(&self) -> (f32, f32) {
        if !self.center_select {
            return (0.0, 0.0);
        }
        let (Some(first), Some(last)) = (self.cells.first(), self.cells.last()) else {
            return (0.0, 0.0);
        };
        let half = self.size.width / 2.0;
        (
            (half - first.frame.width / 2.0).max(0.0),
            (half - last.frame.width / 2.0).max(0.0),
        )
    }

    pub fn label_color(&self, index: usize) -> Color {
        if self.active == Some(index) {
            self.theme.selected_color
        } else {
            self.theme.default_color
        }
    }

    /// Divider frames at the trailing edge of every cell; empty when dividers are hidden.
    pub fn divider_frames(&self) -> impl Iterator<Item = Rect> + '_ {
        let divider = self.divider;
        let height = (self.size.height - divider.top_margin - divider.bottom_margin).max(0.0);
        self.cells
            .iter()
            .filter(move |_| divider.visible)
            .map(move |cell| Rect::new(cell.frame.max_x(), divider.top_margin, divider.width, height))
    }

    /// Indexes of the cells intersecting the visible viewport.
    pub fn visible_range(&self) -> core::ops::Range<usize> {
        let lo = self.content_offset;
        let hi = lo + self.size.width;
        let start = self
            .cells
            .iter()
            .position(|c| c.frame.max_x() > lo)
            .unwrap_or(self.cells.len());
        let end = self.cells[start..]
            .iter()
            .position(|c| c.frame.min_x() >= hi)
            .map_or(self.cells.len(), |n| start + n);
        start..end
    }

    /// Recomputes every cell frame from the sizing policy, then re-applies the last pan.
    pub fn relayout(&mut self) {
        let count = self.cells.len();
        let available = self.size.width;
        let height = self.size.height;

        let fit = if count > 0 && available > 0.0 {
            available / count as f32
        } else {
            0.0
        };

        let mut widths = Vec::with_capacity(count);
        match self.sizing {
            TabSizing::FitViewFrameWidth => {
                for cell in &self.cells {
                    widths.push(cell.preferred_width.map_or(fit, sanitize));
                }
            }
            TabSizing::FixedSize(width) => {
                for cell in &self.cells {
                    widths.push(sanitize(cell.preferred_width.unwrap_or(width)));
                }
            }
            TabSizing::SizeToContent => {
                for cell in &self.cells {
                    let w = match cell.preferred_width {
                        Some(w) => sanitize(w),
                        None => self.measurer.measure(&cell.title, &self.theme.font),
                    };
                    widths.push(w);
                }
            }
            TabSizing::FlexibleWidth => {
                for cell in &self.cells {
                    let w = match cell.preferred_width {
                        Some(w) => sanitize(w),
                        None => self.measurer.measure(&cell.title, &self.theme.font),
                    };
                    widths.push(w);
                }
                let natural: f32 = widths.iter().sum();
                if natural <= available {
                    for (w, cell) in widths.iter_mut().zip(&self.cells) {
                        *w = cell.preferred_width.map_or(fit, sanitize);
                    }
                }
            }
        }

        let mut x = 0.0f32;
        for (cell, width) in self.cells.iter_mut().zip(widths) {
            cell.frame = Rect::new(x, 0.0, width, height);
            x += width;
        }
        self.content_width = x;
        ttrace!(count, content_width = x, available, "TabStrip::relayout");

        self.pan_to_percentage(self.last_percentage);
    }

    /// Moves the selection indicator to a fractional position across all tabs.
    ///
    /// `percentage` is clamped into `[0, 1]`. The indicator blends the frames of the two cells
    /// around `percentage * tab_count`, the cell owning at least half of the blend becomes
    /// active (ties go to the earlier cell), and the strip scrolls to keep the indicator in view
    /// (or centered, in center-select mode). Calling this twice with the same value is a no-op
    /// the second time.
    pub fn pan_to_percentage(&mut self, percentage: f32) {
        self.last_percentage = percentage;
        let count = self.cells.len();
        if count == 0 {
            return;
        }

        let p = if percentage.is_finite() {
            percentage.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let (first, second, share_second) = blend_indices(p, count);
        let share_first = 1.0 - share_second;

        let active = if share_first >= 0.5 { first } else { second };
        self.set_active(active);

        let a = self.cells[first].frame;
        let b = self.cells[second].frame;
        let x = a.x * share_first + b.x * share_second;
        let width = a.width * share_first + b.width * share_second;

        let style = self.indicator_style;
        self.indicator = IndicatorGeometry {
            frame: Rect::new(
                x + style.insets.left,
                self.size.height - style.height - style.offset,
                (width - style.insets.left - style.insets.right).max(0.0),
                style.height,
            ),
        };

        self.follow_indicator(x, width);
    }

    fn set_active(&mut self, index: usize) {
        if self.active == Some(index) {
            return;
        }
        if let Some(prev) = self.active.and_then(|i| self.cells.get_mut(i)) {
            prev.selected = false;
        }
        if let Some(cell) = self.cells.get_mut(index) {
            cell.selected = true;
        }
        self.active = Some(index);
    }

    fn follow_indicator(&mut self, x: f32, width: f32) {
        let available = self.size.width;
        if available <= 0.0 {
            return;
        }

        if self.center_select {
            let (left, right) = self.content_inset();
            let max = (self.content_width - available + right).max(-left);
            let target = x - (available / 2.0 - width / 2.0);
            self.content_offset = target.clamp(-left, max);
            return;
        }

        let max = (self.content_width - available).max(0.0);
        let mut offset = self.content_offset;
        if x < offset {
            offset = x;
        } else if x + width > offset + available {
            offset = x + width - available;
        }
        self.content_offset = offset.clamp(0.0, max);
    }
}
