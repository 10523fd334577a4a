//! A headless paged tab controller.
//!
//! For adapter-level utilities (tween-driven page jumps, drag simulation), see the
//! `scrolling-tabs-adapter` crate.
//!
//! This crate keeps a horizontal strip of tab labels in sync with a horizontally paged content
//! area: it maps a continuous scroll position onto a current page and an indicator geometry,
//! attaches page content only inside a sliding window around the current page, and reconciles
//! user drags with programmatic page jumps.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - the page surface size (and size transitions)
//! - drag and scroll callbacks from its paged scroll view
//! - page content handles and, optionally, label text measurement
//!
//! and to react to [`PageEvent`]s and [`ScrollRequest`]s.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod controller;
mod host;
mod measure;
mod options;
mod source;
mod state;
mod strip;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use controller::ScrollSyncController;
pub use host::{ContainerId, PageContainer, PageHost};
pub use measure::{MeasuringCell, estimate_text_width};
pub use options::{
    DEFAULT_CELL_PADDING, DEFAULT_DIVIDER_MARGIN, DEFAULT_INDICATOR_HEIGHT,
    DEFAULT_NUM_TO_PRELOAD, DEFAULT_TAB_BAR_HEIGHT, DividerStyle, IndicatorStyle, LabelFont,
    LabelTheme, PageEventCallback, TabControllerOptions, TextMeasure,
};
pub use source::{Page, PageDataSource, default_title};
pub use state::ControllerState;
pub use strip::{IndicatorGeometry, TabCell, TabStrip};
pub use types::{
    Appearance, Color, EdgeInsets, PageEvent, Rect, ScrollRequest, SelectOutcome, Size,
    TabSizing, TransitionId, WindowChange,
};
pub use window::IntervalWindow;
