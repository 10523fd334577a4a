use std::sync::Arc;

use crate::host::PageHost;
use crate::{Color, EdgeInsets, PageEvent, TabSizing};

pub const DEFAULT_TAB_BAR_HEIGHT: f32 = 44.0;
pub const DEFAULT_NUM_TO_PRELOAD: usize = 1;
pub const DEFAULT_INDICATOR_HEIGHT: f32 = 5.0;
pub const DEFAULT_DIVIDER_MARGIN: f32 = 10.0;
pub const DEFAULT_CELL_PADDING: f32 = 8.0;

/// A callback fired for every lifecycle notification.
///
/// The host is passed so the callback can look up the page's content and container.
pub type PageEventCallback<C> = Arc<dyn Fn(&PageHost<C>, PageEvent) + Send + Sync>;

/// Measures the natural width of a label rendered with a font.
pub type TextMeasure = Arc<dyn Fn(&str, &LabelFont) -> f32 + Send + Sync>;

/// Geometry knobs for the floating selection indicator.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndicatorStyle {
    pub height: f32,
    /// Distance from the bottom of the strip.
    pub offset: f32,
    pub insets: EdgeInsets,
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        Self {
            height: DEFAULT_INDICATOR_HEIGHT,
            offset: 0.0,
            insets: EdgeInsets::default(),
        }
    }
}

/// Vertical dividers drawn at the trailing edge of every cell.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DividerStyle {
    pub visible: bool,
    pub top_margin: f32,
    pub bottom_margin: f32,
    pub width: f32,
    pub color: Color,
}

impl Default for DividerStyle {
    fn default() -> Self {
        Self {
            visible: false,
            top_margin: DEFAULT_DIVIDER_MARGIN,
            bottom_margin: DEFAULT_DIVIDER_MARGIN,
            width: 1.0,
            color: Color::BLACK,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelFont {
    pub family: String,
    pub size: f32,
}

impl Default for LabelFont {
    fn default() -> Self {
        Self {
            family: String::from("system"),
            size: 17.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelTheme {
    pub font: LabelFont,
    pub default_color: Color,
    pub selected_color: Color,
}

impl Default for LabelTheme {
    fn default() -> Self {
        Self {
            font: LabelFont::default(),
            default_color: Color::BLACK,
            selected_color: Color::TINT,
        }
    }
}

/// Configuration for [`crate::ScrollSyncController`].
///
/// Every field can be changed at runtime through `ScrollSyncController::set_options` or
/// `ScrollSyncController::update_options`; the controller recomputes only what depends on the
/// fields that changed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabControllerOptions {
    pub tab_sizing: TabSizing,
    /// Keeps the active tab centered in the strip.
    pub center_select_tabs: bool,
    pub tab_bar_height: f32,
    /// Pages kept attached on each side of the current page.
    pub num_to_preload: usize,
    pub indicator: IndicatorStyle,
    pub divider: DividerStyle,
    pub theme: LabelTheme,
    /// Horizontal padding on each side of a measured label.
    pub cell_padding: f32,
}

impl Default for TabControllerOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl TabControllerOptions {
    pub fn new() -> Self {
        Self {
            tab_sizing: TabSizing::default(),
            center_select_tabs: false,
            tab_bar_height: DEFAULT_TAB_BAR_HEIGHT,
            num_to_preload: DEFAULT_NUM_TO_PRELOAD,
            indicator: IndicatorStyle::default(),
            divider: DividerStyle::default(),
            theme: LabelTheme::default(),
            cell_padding: DEFAULT_CELL_PADDING,
        }
    }

    pub fn with_tab_sizing(mut self, tab_sizing: TabSizing) -> Self {
        self.tab_sizing = tab_sizing;
        self
    }

    pub fn with_center_select_tabs(mut self, center_select_tabs: bool) -> Self {
        self.center_select_tabs = center_select_tabs;
        self
    }

    pub fn with_tab_bar_height(mut self, tab_bar_height: f32) -> Self {
        self.tab_bar_height = tab_bar_height;
        self
    }

    pub fn with_num_to_preload(mut self, num_to_preload: usize) -> Self {
        self.num_to_preload = num_to_preload;
        self
    }

    pub fn with_indicator(mut self, indicator: IndicatorStyle) -> Self {
        self.indicator = indicator;
        self
    }

    pub fn with_divider(mut self, divider: DividerStyle) -> Self {
        self.divider = divider;
        self
    }

    pub fn with_theme(mut self, theme: LabelTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_cell_padding(mut self, cell_padding: f32) -> Self {
        self.cell_padding = cell_padding;
        self
    }
}
