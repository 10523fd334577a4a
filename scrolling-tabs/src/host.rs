use std::sync::Arc;

use crate::options::PageEventCallback;
use crate::{IntervalWindow, PageEvent, Rect, Size, WindowChange};

/// Identity of a page container. Containers keep their id for the host's lifetime and get
/// fresh ids only when the page set is rebuilt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerId(pub u64);

/// The persistent surface that hosts one page's content.
#[derive(Clone, Debug)]
pub struct PageContainer<C> {
    id: ContainerId,
    index: usize,
    frame: Rect,
    content: Option<C>,
    attached: bool,
}

impl<C> PageContainer<C> {
    pub fn id(&self) -> ContainerId {
        self.id
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// The content handle resolved for this page, attached or not.
    pub fn content(&self) -> Option<&C> {
        self.content.as_ref()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

/// Owns one container per page and attaches page content inside a sliding window.
///
/// A page is attached exactly when it is inside [`PageHost::window`]; the window only ever
/// holds pages for which [`PageHost::should_load`] is true once a sweep has run.
///
/// Non-adjacent window edits are recovered leniently: a `load` that is not on a window edge
/// detaches the whole window and restarts it at the requested page, and an `unload` of a page
/// strictly inside the window detaches the whole window.
#[derive(Clone)]
pub struct PageHost<C> {
    containers: Vec<PageContainer<C>>,
    window: IntervalWindow,
    anchor: usize,
    num_to_preload: usize,
    page_size: Size,
    next_id: u64,
    on_event: Option<PageEventCallback<C>>,
}

impl<C> PageHost<C> {
    pub fn new(num_to_preload: usize) -> Self {
        Self {
            containers: Vec::new(),
            window: IntervalWindow::default(),
            anchor: 0,
            num_to_preload,
            page_size: Size::default(),
            next_id: 0,
            on_event: None,
        }
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    pub fn window(&self) -> IntervalWindow {
        self.window
    }

    /// The page the preload neighborhood is centered on.
    pub fn anchor(&self) -> usize {
        self.anchor
    }

    pub(crate) fn set_anchor(&mut self, page: usize) {
        self.anchor = page;
    }

    pub fn num_to_preload(&self) -> usize {
        self.num_to_preload
    }

    pub(crate) fn set_num_to_preload(&mut self, num_to_preload: usize) {
        self.num_to_preload = num_to_preload;
    }

    pub fn page_size(&self) -> Size {
        self.page_size
    }

    pub fn content_width(&self) -> f32 {
        self.page_size.width * self.containers.len() as f32
    }

    pub fn offset_for_page(&self, index: usize) -> f32 {
        self.page_size.width * index as f32
    }

    pub fn container(&self, index: usize) -> Option<&PageContainer<C>> {
        self.containers.get(index)
    }

    pub fn containers(&self) -> &[PageContainer<C>] {
        &self.containers
    }

    pub fn content(&self, index: usize) -> Option<&C> {
        self.containers.get(index).and_then(PageContainer::content)
    }

    pub fn is_loaded(&self, index: usize) -> bool {
        self.containers.get(index).is_some_and(|c| c.attached)
    }

    /// Attached pages in ascending order.
    pub fn loaded_pages(&self) -> impl Iterator<Item = usize> + '_ {
        self.containers
            .iter()
            .filter(|c| c.attached)
            .map(|c| c.index)
    }

    pub fn set_on_event(
        &mut self,
        on_event: Option<impl Fn(&PageHost<C>, PageEvent) + Send + Sync + 'static>,
    ) {
        self.on_event = on_event.map(|f| Arc::new(f) as _);
    }

    pub(crate) fn set_on_event_callback(&mut self, on_event: Option<PageEventCallback<C>>) {
        self.on_event = on_event;
    }

    pub(crate) fn emit(&self, event: PageEvent) {
        if let Some(cb) = &self.on_event {
            cb(self, event);
        }
    }

    /// `|index - anchor| <= num_to_preload`, for pages that exist.
    pub fn should_load(&self, index: usize) -> bool {
        index < self.containers.len() && index.abs_diff(self.anchor) <= self.num_to_preload
    }

    /// The half-open range of pages that should be attached, or `None` with no pages.
    pub fn neighborhood(&self) -> Option<(usize, usize)> {
        let count = self.containers.len();
        if count == 0 || self.anchor >= count {
            return None;
        }
        let lo = self.anchor.saturating_sub(self.num_to_preload);
        let hi = self
            .anchor
            .saturating_add(self.num_to_preload)
            .saturating_add(1)
            .min(count);
        Some((lo, hi))
    }

    /// Detaches everything, then creates one fresh container per content slot.
    pub fn rebuild(&mut self, contents: impl IntoIterator<Item = Option<C>>) {
        self.teardown();
        for content in contents {
            let index = self.containers.len();
            let id = ContainerId(self.next_id);
            let frame = self.frame_for(index);
            self.next_id += 1;
            self.containers.push(PageContainer {
                id,
                index,
                frame,
                content,
                attached: false,
            });
        }
        tdebug!(count = self.containers.len(), "PageHost::rebuild");
    }

    /// Detaches every attached page and drops all containers.
    pub fn teardown(&mut self) {
        for index in 0..self.containers.len() {
            self.detach_page(index);
        }
        self.containers.clear();
        self.window.reset(0);
        self.anchor = 0;
    }

    /// Re-lays out every container for a new page size. Containers are never recreated.
    pub fn resize(&mut self, size: Size) {
        let sanitize = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        self.page_size = Size::new(sanitize(size.width), sanitize(size.height));
        for index in 0..self.containers.len() {
            let frame = self.frame_for(index);
            self.containers[index].frame = frame;
        }
    }

    fn frame_for(&self, index: usize) -> Rect {
        Rect::new(
            self.offset_for_page(index),
            0.0,
            self.page_size.width,
            self.page_size.height,
        )
    }

    /// Re-evaluates one page: loads it if it should be attached, unloads it otherwise.
    pub fn lazy_load(&mut self, index: usize) -> WindowChange {
        if index >= self.containers.len() {
            return WindowChange::Unchanged;
        }
        if self.should_load(index) {
            self.load(index)
        } else {
            self.unload(index)
        }
    }

    /// Attaches `index` and grows the window by one page toward it.
    pub fn load(&mut self, index: usize) -> WindowChange {
        if !self.should_load(index) || self.window.contains(index) {
            return WindowChange::Unchanged;
        }

        if self.window.is_empty() {
            self.window.reset(index);
            self.window.extend_right(index);
            self.attach_page(index);
            return WindowChange::Attached;
        }

        if self.window.is_adjacent(index) {
            if !self.window.extend_left(index) {
                self.window.extend_right(index);
            }
            self.attach_page(index);
            return WindowChange::Attached;
        }

        twarn!(
            index,
            start = self.window.start(),
            end = self.window.end(),
            "PageHost::load: page is not adjacent to the loaded window; resetting"
        );
        let detached = self.detach_window();
        self.window.reset(index);
        self.window.extend_right(index);
        self.attach_page(index);
        WindowChange::Reset { detached }
    }

    /// Detaches `index` and shrinks the window by one page.
    pub fn unload(&mut self, index: usize) -> WindowChange {
        if index >= self.containers.len()
            || self.should_load(index)
            || !self.window.contains(index)
        {
            return WindowChange::Unchanged;
        }

        if self.window.is_boundary(index) {
            if !self.window.shrink_left(index) {
                self.window.shrink_right(index);
            }
            self.detach_page(index);
            return WindowChange::Detached;
        }

        twarn!(
            index,
            start = self.window.start(),
            end = self.window.end(),
            "PageHost::unload: page is inside the loaded window; resetting"
        );
        let detached = self.detach_window();
        self.window.reset(index);
        WindowChange::Reset { detached }
    }

    /// Converges the window onto the preload neighborhood of the anchor.
    ///
    /// Out-of-range pages are trimmed from the window edges first, then the window grows one
    /// edge at a time, so every step is adjacent.
    pub fn sweep(&mut self) {
        let Some((lo, hi)) = self.neighborhood() else {
            return;
        };

        while !self.window.is_empty() && !self.should_load(self.window.start()) {
            if self.unload(self.window.start()) == WindowChange::Unchanged {
                break;
            }
        }
        while !self.window.is_empty() && !self.should_load(self.window.end() - 1) {
            if self.unload(self.window.end() - 1) == WindowChange::Unchanged {
                break;
            }
        }

        if self.window.is_empty() {
            self.load(self.anchor);
        }
        while self.window.start() > lo {
            if self.load(self.window.start() - 1) == WindowChange::Unchanged {
                break;
            }
        }
        while self.window.end() < hi {
            if self.load(self.window.end()) == WindowChange::Unchanged {
                break;
            }
        }
        ttrace!(
            anchor = self.anchor,
            start = self.window.start(),
            end = self.window.end(),
            "PageHost::sweep"
        );
    }

    /// Sweeps, then unloads every page outside the preload neighborhood. Pages that are
    /// already unloaded are skipped. Returns how many pages the scan detached.
    pub fn cleanup(&mut self) -> usize {
        self.sweep();
        let mut detached = 0;
        for index in 0..self.containers.len() {
            if self.should_load(index) {
                continue;
            }
            match self.unload(index) {
                WindowChange::Detached => detached += 1,
                WindowChange::Reset { detached: n } => detached += n,
                WindowChange::Unchanged | WindowChange::Attached => {}
            }
        }
        detached
    }

    fn attach_page(&mut self, index: usize) {
        if self.containers[index].attached {
            return;
        }
        ttrace!(index, "attach page");
        self.emit(PageEvent::WillAttach { index });
        self.containers[index].attached = true;
        self.emit(PageEvent::DidAttach { index });
    }

    fn detach_page(&mut self, index: usize) -> bool {
        if !self.containers[index].attached {
            return false;
        }
        ttrace!(index, "detach page");
        self.emit(PageEvent::WillDetach { index });
        self.containers[index].attached = false;
        self.emit(PageEvent::DidDetach { index });
        true
    }

    fn detach_window(&mut self) -> usize {
        let mut detached = 0;
        for index in self.window.iter() {
            if self.detach_page(index) {
                detached += 1;
            }
        }
        self.window.reset(self.window.start());
        detached
    }
}

impl<C> core::fmt::Debug for PageHost<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PageHost")
            .field("len", &self.containers.len())
            .field("window", &self.window)
            .field("anchor", &self.anchor)
            .field("num_to_preload", &self.num_to_preload)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}
