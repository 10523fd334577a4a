/// A width/height pair in host layout units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in host layout units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn min_x(&self) -> f32 {
        self.x
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }
}

/// Horizontal insets applied to the selection indicator.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeInsets {
    pub left: f32,
    pub right: f32,
}

impl EdgeInsets {
    pub const fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const TINT: Self = Self::rgb(0, 122, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// How tab cells are sized inside the strip.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TabSizing {
    /// Every cell is `available_width / tab_count` wide.
    #[default]
    FitViewFrameWidth,
    /// Every cell has the given constant width.
    FixedSize(f32),
    /// Every cell is as wide as its measured label plus padding.
    SizeToContent,
    /// Like `FitViewFrameWidth` until the measured labels no longer fit, then like
    /// `SizeToContent`.
    FlexibleWidth,
}

impl TabSizing {
    /// Whether cell widths depend on the available width.
    pub fn tracks_available_width(self) -> bool {
        matches!(self, Self::FitViewFrameWidth | Self::FlexibleWidth)
    }
}

/// An appearance transition for a page's content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Appearance {
    WillAppear,
    DidAppear,
    WillDisappear,
    DidDisappear,
}

/// Lifecycle notifications emitted to the host.
///
/// Attach/detach events bracket the moment the host should move a page's content into or out
/// of its container. Appearance events bracket navigation between pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageEvent {
    WillAttach {
        index: usize,
    },
    DidAttach {
        index: usize,
    },
    WillDetach {
        index: usize,
    },
    DidDetach {
        index: usize,
    },
    Appearance {
        index: usize,
        transition: Appearance,
        animated: bool,
    },
    /// The current page settled after a completed navigation.
    PageDisplayed {
        index: usize,
    },
}

/// The effect of a single `PageHost::load`/`PageHost::unload` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindowChange {
    Unchanged,
    Attached,
    Detached,
    /// A non-adjacent edit collapsed the window. `detached` pages were dropped from it.
    Reset { detached: usize },
}

/// The outcome of `ScrollSyncController::select_page`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectOutcome {
    Started,
    AlreadyCurrent,
    /// Remembered until the controller's view first appears.
    Deferred,
    /// Out of range; nothing happened.
    Ignored,
}

/// A programmatic scroll the host must perform on its page surface.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollRequest {
    pub offset: f32,
    pub animated: bool,
}

/// Identifies an in-flight size transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionId(pub(crate) u64);
