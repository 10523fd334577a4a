use crate::TabCell;

/// One entry of an injected page list.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<C> {
    pub content: C,
    pub title: Option<String>,
}

impl<C> Page<C> {
    pub fn new(content: C) -> Self {
        Self {
            content,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Title used for a page with no title of its own.
pub fn default_title(index: usize) -> String {
    format!("Tab {}", index + 1)
}

/// Supplies pages to a [`crate::ScrollSyncController`].
///
/// Every method is optional. Returning `None` means "not implemented" and the controller
/// falls back to the injected page list (count, content, title) or to the current
/// [`crate::TabSizing`] policy (width).
pub trait PageDataSource<C> {
    fn page_count(&self) -> Option<usize> {
        None
    }

    fn content(&self, index: usize) -> Option<C> {
        let _ = index;
        None
    }

    /// Customizes the label cell for `index`. `cell` arrives with its default title set.
    fn configure_cell(&self, index: usize, cell: &TabCell) -> Option<TabCell> {
        let _ = (index, cell);
        None
    }

    fn tab_width(&self, index: usize) -> Option<f32> {
        let _ = index;
        None
    }
}
