use std::sync::Arc;

use crate::host::PageHost;
use crate::options::{DividerStyle, IndicatorStyle, LabelTheme, TabControllerOptions};
use crate::source::{Page, PageDataSource, default_title};
use crate::strip::{TabCell, TabStrip, snap_to_whole};
use crate::{
    Appearance, ControllerState, LabelFont, PageEvent, ScrollRequest, SelectOutcome, Size,
    TabSizing, TransitionId,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingSelection {
    index: usize,
    animated: bool,
}

/// A programmatic navigation whose appearance transitions are still open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Jump {
    from: usize,
    to: usize,
    animated: bool,
}

/// Keeps a [`TabStrip`] and a [`PageHost`] in sync with a horizontally paged scroll surface.
///
/// This type holds no UI objects. The host drives it:
/// - `on_container_resized` / `begin_size_transition` / `end_size_transition` for geometry
/// - `on_drag_begin`, `on_scroll`, `on_drag_end`, `on_deceleration_end` for user scrolling
/// - `select_page` / `tab_tapped` plus `on_scroll_animation_end` for programmatic jumps
///
/// and reacts to [`PageEvent`]s (through `set_on_event`) and polled [`ScrollRequest`]s.
/// Every operation runs synchronously; callbacks must not call back into the controller.
pub struct ScrollSyncController<C> {
    options: TabControllerOptions,
    strip: TabStrip,
    host: PageHost<C>,
    pages: Vec<Page<C>>,
    data_source: Option<Arc<dyn PageDataSource<C>>>,

    current_page: usize,
    content_offset: f32,
    is_realized: bool,
    is_tracking: bool,
    updating_current_page: bool,
    pending_selection: Option<PendingSelection>,
    jump: Option<Jump>,
    scroll_request: Option<ScrollRequest>,
    last_displayed: Option<usize>,
    transition: Option<TransitionId>,
    next_transition: u64,
}

impl<C: Clone> ScrollSyncController<C> {
    pub fn new(options: TabControllerOptions) -> Self {
        tdebug!(
            num_to_preload = options.num_to_preload,
            tab_bar_height = options.tab_bar_height,
            "ScrollSyncController::new"
        );
        let mut strip = TabStrip::default();
        strip.measurer_mut().set_padding(options.cell_padding);
        apply_strip_options(&mut strip, &options);
        strip.set_size(Size::new(0.0, options.tab_bar_height));

        Self {
            host: PageHost::new(options.num_to_preload),
            strip,
            options,
            pages: Vec::new(),
            data_source: None,
            current_page: 0,
            content_offset: 0.0,
            is_realized: false,
            is_tracking: false,
            updating_current_page: true,
            pending_selection: None,
            jump: None,
            scroll_request: None,
            last_displayed: None,
            transition: None,
            next_transition: 0,
        }
    }

    pub fn options(&self) -> &TabControllerOptions {
        &self.options
    }

    /// Applies new options, recomputing only what depends on the fields that changed.
    pub fn set_options(&mut self, options: TabControllerOptions) {
        let prev = core::mem::replace(&mut self.options, options);
        tdebug!(tab_sizing = ?self.options.tab_sizing, "ScrollSyncController::set_options");

        if prev.cell_padding != self.options.cell_padding {
            self.strip
                .measurer_mut()
                .set_padding(self.options.cell_padding);
            self.strip.relayout();
        }
        apply_strip_options(&mut self.strip, &self.options);
        if prev.tab_bar_height != self.options.tab_bar_height {
            let width = self.strip.size().width;
            self.strip
                .set_size(Size::new(width, self.options.tab_bar_height));
        }
        if prev.num_to_preload != self.options.num_to_preload {
            self.host.set_num_to_preload(self.options.num_to_preload);
            self.host.sweep();
        }
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut TabControllerOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_tab_sizing(&mut self, tab_sizing: TabSizing) {
        self.update_options(|o| o.tab_sizing = tab_sizing);
    }

    pub fn set_center_select_tabs(&mut self, center_select_tabs: bool) {
        self.update_options(|o| o.center_select_tabs = center_select_tabs);
    }

    pub fn set_tab_bar_height(&mut self, tab_bar_height: f32) {
        self.update_options(|o| o.tab_bar_height = tab_bar_height);
    }

    pub fn set_num_to_preload(&mut self, num_to_preload: usize) {
        self.update_options(|o| o.num_to_preload = num_to_preload);
    }

    pub fn set_indicator_style(&mut self, indicator: IndicatorStyle) {
        self.update_options(|o| o.indicator = indicator);
    }

    pub fn set_divider_style(&mut self, divider: DividerStyle) {
        self.update_options(|o| o.divider = divider);
    }

    pub fn set_theme(&mut self, theme: LabelTheme) {
        self.update_options(|o| o.theme = theme);
    }

    pub fn set_on_event(
        &mut self,
        on_event: Option<impl Fn(&PageHost<C>, PageEvent) + Send + Sync + 'static>,
    ) {
        self.host
            .set_on_event_callback(on_event.map(|f| Arc::new(f) as _));
    }

    /// Replaces the label measurement used by content-sized tabs.
    pub fn set_text_measure(
        &mut self,
        measure: impl Fn(&str, &LabelFont) -> f32 + Send + Sync + 'static,
    ) {
        self.strip.measurer_mut().set_text_measure(measure);
        self.strip.relayout();
    }

    pub fn strip(&self) -> &TabStrip {
        &self.strip
    }

    pub fn host(&self) -> &PageHost<C> {
        &self.host
    }

    pub fn pages(&self) -> &[Page<C>] {
        &self.pages
    }

    /// Injects the page list and rebuilds.
    pub fn set_pages(&mut self, pages: Vec<Page<C>>) {
        self.pages = pages;
        self.reload();
    }

    /// Installs (or removes) a data source and rebuilds.
    pub fn set_data_source(&mut self, data_source: Option<Arc<dyn PageDataSource<C>>>) {
        self.data_source = data_source;
        self.reload();
    }

    /// Tears down every container and rebuilds from the current page list and data source.
    ///
    /// The current page returns to 0 and the preload neighborhood of page 0 is attached.
    pub fn reload(&mut self) {
        let count = self.page_count();
        tdebug!(count, "ScrollSyncController::reload");

        let contents: Vec<Option<C>> = (0..count).map(|i| self.resolve_content(i)).collect();
        if let Some(jump) = self.jump.take() {
            self.finish_appearance(jump);
        }
        self.host.rebuild(contents);

        self.current_page = 0;
        self.host.set_anchor(0);
        self.last_displayed = None;
        if self.content_offset != 0.0 {
            self.content_offset = 0.0;
            self.scroll_request = Some(ScrollRequest {
                offset: 0.0,
                animated: false,
            });
        }
        self.host.sweep();

        let cells = (0..count).map(|i| self.resolve_cell(i)).collect();
        self.strip.set_cells(cells);
        self.strip.pan_to_percentage(0.0);

        if self.is_realized {
            self.settle();
        }
    }

    pub fn page_count(&self) -> usize {
        self.data_source
            .as_ref()
            .and_then(|ds| ds.page_count())
            .unwrap_or(self.pages.len())
    }

    fn resolve_content(&self, index: usize) -> Option<C> {
        let content = self
            .data_source
            .as_ref()
            .and_then(|ds| ds.content(index))
            .or_else(|| self.pages.get(index).map(|p| p.content.clone()));
        if content.is_none() {
            twarn!(index, "no content for page");
        }
        content
    }

    fn resolve_cell(&self, index: usize) -> TabCell {
        let title = self
            .pages
            .get(index)
            .and_then(|p| p.title.clone())
            .unwrap_or_else(|| default_title(index));
        let mut cell = TabCell::new(title);

        if let Some(ds) = &self.data_source {
            cell = cell.with_preferred_width(ds.tab_width(index));
            if let Some(custom) = ds.configure_cell(index, &cell) {
                cell = custom;
            }
        }
        cell
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn content_offset(&self) -> f32 {
        self.content_offset
    }

    pub fn is_realized(&self) -> bool {
        self.is_realized
    }

    pub fn is_tracking(&self) -> bool {
        self.is_tracking
    }

    /// Whether a programmatic jump is waiting for `on_scroll_animation_end`.
    pub fn is_jumping(&self) -> bool {
        self.jump.is_some()
    }

    /// Whether scroll-driven updates are suspended by a size transition.
    pub fn is_suspended(&self) -> bool {
        !self.updating_current_page
    }

    pub fn pending_selection(&self) -> Option<usize> {
        self.pending_selection.map(|p| p.index)
    }

    /// `content_offset / content_width`, or 0 when there is no content.
    pub fn scrolled_percentage(&self) -> f32 {
        let width = self.host.content_width();
        if !(width > 0.0) {
            return 0.0;
        }
        self.content_offset / width
    }

    /// Takes the scroll the host must apply to its page surface, if any.
    pub fn take_scroll_request(&mut self) -> Option<ScrollRequest> {
        self.scroll_request.take()
    }

    pub fn snapshot(&self) -> ControllerState {
        ControllerState {
            current_page: self.current_page,
            loaded: self.host.window(),
            content_offset: self.content_offset,
            scroll_percentage: self.scrolled_percentage(),
        }
    }

    /// Jumps (without animation) to the page recorded in `state`.
    pub fn restore_state(&mut self, state: &ControllerState) -> SelectOutcome {
        self.select_page(state.current_page, false)
    }

    /// Call once the host view is on screen. Runs any deferred selection.
    pub fn view_did_appear(&mut self) {
        self.is_realized = true;
        if let Some(pending) = self.pending_selection.take() {
            self.select_page(pending.index, pending.animated);
        } else if self.jump.is_none() {
            self.settle();
        }
        self.strip.pan_to_percentage(self.scrolled_percentage());
    }

    pub fn view_did_disappear(&mut self) {
        self.is_realized = false;
    }

    /// Same as `select_page(index, true)`; wire this to taps on strip cells.
    pub fn tab_tapped(&mut self, index: usize) -> SelectOutcome {
        self.select_page(index, true)
    }

    /// Navigates to `index`.
    ///
    /// Out-of-range indexes are ignored. Before the view appears the request is remembered
    /// (a later call replaces it). Otherwise the target and its neighborhood are attached
    /// immediately, appearance transitions begin, and a [`ScrollRequest`] is published. The
    /// transitions complete in `on_scroll_animation_end`, or right away when `animated` is
    /// false.
    pub fn select_page(&mut self, index: usize, animated: bool) -> SelectOutcome {
        let count = self.host.len();
        if index >= count {
            twarn!(index, count, "select_page: index out of range");
            return SelectOutcome::Ignored;
        }
        if !self.is_realized {
            tdebug!(index, animated, "select_page deferred until the view appears");
            self.pending_selection = Some(PendingSelection { index, animated });
            return SelectOutcome::Deferred;
        }

        let target = self.host.offset_for_page(index);
        if index == self.current_page {
            if self.jump.is_none() && self.content_offset != target {
                self.scroll_request = Some(ScrollRequest {
                    offset: target,
                    animated,
                });
                if !animated {
                    self.apply_offset(target);
                }
            }
            return SelectOutcome::AlreadyCurrent;
        }

        if let Some(jump) = self.jump.take() {
            self.finish_appearance(jump);
        }

        let from = self.current_page;
        tdebug!(from, to = index, animated, "select_page");
        self.emit_appearance(from, Appearance::WillDisappear, animated);
        self.set_current_page(index);
        self.emit_appearance(index, Appearance::WillAppear, animated);
        self.jump = Some(Jump {
            from,
            to: index,
            animated,
        });

        self.scroll_request = Some(ScrollRequest {
            offset: target,
            animated,
        });
        if !animated {
            self.apply_offset(target);
            self.on_scroll_animation_end();
        }
        SelectOutcome::Started
    }

    /// Completes a programmatic jump once the page surface stops animating.
    ///
    /// Reads the current page fresh, so a completion that arrives after a drag took over is
    /// harmless.
    pub fn on_scroll_animation_end(&mut self) {
        if let Some(jump) = self.jump.take() {
            self.finish_appearance(jump);
        }
        if self.is_tracking {
            return;
        }

        self.host.set_anchor(self.current_page);
        self.host.cleanup();
        self.strip.pan_to_percentage(self.scrolled_percentage());
        self.settle();
    }

    pub fn on_drag_begin(&mut self) {
        self.is_tracking = true;
        self.scroll_request = None;
        if let Some(jump) = self.jump.take() {
            tdebug!(to = jump.to, "drag supersedes programmatic jump");
            self.finish_appearance(jump);
        }
    }

    /// Call on every scroll offset change of the page surface.
    ///
    /// The indicator tracks every call; page boundaries are only checked while dragging.
    pub fn on_scroll(&mut self, offset: f32) {
        self.content_offset = if offset.is_finite() { offset } else { 0.0 };
        if !self.updating_current_page {
            return;
        }
        if self.is_tracking {
            self.check_and_load_pages();
        }
        self.strip.pan_to_percentage(self.scrolled_percentage());
    }

    pub fn on_drag_end(&mut self, will_decelerate: bool) {
        self.is_tracking = false;
        if !will_decelerate {
            self.check_and_load_pages();
            self.settle();
        }
    }

    pub fn on_deceleration_end(&mut self) {
        self.check_and_load_pages();
        self.settle();
    }

    /// The page surface changed size. Containers are re-laid out in place and the offset
    /// stays pinned to the current page.
    pub fn on_container_resized(&mut self, size: Size) {
        self.host.resize(size);
        self.strip
            .set_size(Size::new(size.width, self.options.tab_bar_height));

        if self.jump.is_none() && !self.is_tracking {
            let target = self.host.offset_for_page(self.current_page);
            if self.content_offset != target {
                self.content_offset = target;
                self.scroll_request = Some(ScrollRequest {
                    offset: target,
                    animated: false,
                });
            }
        }
        if self.updating_current_page {
            self.strip.pan_to_percentage(self.scrolled_percentage());
        }
    }

    /// Suspends scroll-driven updates until the returned transition ends.
    ///
    /// Starting a new transition supersedes the previous one; only the latest id resumes
    /// updates.
    pub fn begin_size_transition(&mut self, size: Size) -> TransitionId {
        if self.transition.is_some() {
            twarn!("begin_size_transition: superseding an in-flight transition");
        }
        let id = TransitionId(self.next_transition);
        self.next_transition += 1;
        self.transition = Some(id);
        self.updating_current_page = false;
        self.strip
            .set_size(Size::new(size.width, self.options.tab_bar_height));
        id
    }

    /// Resumes updates and snaps the indicator to the post-resize position. Returns `false`
    /// for a stale or unknown id.
    pub fn end_size_transition(&mut self, id: TransitionId) -> bool {
        if self.transition != Some(id) {
            twarn!(id = id.0, "end_size_transition: stale transition ignored");
            return false;
        }
        self.transition = None;
        self.updating_current_page = true;
        self.strip.pan_to_percentage(self.scrolled_percentage());
        true
    }

    fn apply_offset(&mut self, offset: f32) {
        self.content_offset = offset;
        if self.updating_current_page {
            self.strip.pan_to_percentage(self.scrolled_percentage());
        }
    }

    fn check_and_load_pages(&mut self) {
        let count = self.host.len();
        let width = self.host.page_size().width;
        if count == 0 || !(width > 0.0) {
            return;
        }

        let raw = snap_to_whole(self.content_offset / width).floor();
        let page = if raw <= 0.0 {
            0
        } else {
            (raw as usize).min(count - 1)
        };
        if page != self.current_page {
            self.cross_boundary(page);
        }
    }

    fn cross_boundary(&mut self, page: usize) {
        let from = self.current_page;
        tdebug!(from, to = page, "page boundary crossed");
        self.emit_appearance(from, Appearance::WillDisappear, true);
        self.emit_appearance(page, Appearance::WillAppear, true);
        self.set_current_page(page);
        self.emit_appearance(from, Appearance::DidDisappear, true);
        self.emit_appearance(page, Appearance::DidAppear, true);
    }

    fn set_current_page(&mut self, page: usize) {
        self.current_page = page;
        self.host.set_anchor(page);
        self.host.sweep();
    }

    fn finish_appearance(&mut self, jump: Jump) {
        self.emit_appearance(jump.from, Appearance::DidDisappear, jump.animated);
        self.emit_appearance(jump.to, Appearance::DidAppear, jump.animated);
    }

    fn emit_appearance(&self, index: usize, transition: Appearance, animated: bool) {
        self.host.emit(PageEvent::Appearance {
            index,
            transition,
            animated,
        });
    }

    fn settle(&mut self) {
        if self.host.is_empty() || self.last_displayed == Some(self.current_page) {
            return;
        }
        self.last_displayed = Some(self.current_page);
        tdebug!(index = self.current_page, "page displayed");
        self.host.emit(PageEvent::PageDisplayed {
            index: self.current_page,
        });
    }
}

fn apply_strip_options(strip: &mut TabStrip, options: &TabControllerOptions) {
    strip.set_sizing(options.tab_sizing);
    strip.set_center_select(options.center_select_tabs);
    strip.set_indicator_style(options.indicator);
    strip.set_divider_style(options.divider);
    strip.set_theme(options.theme.clone());
}

impl<C> core::fmt::Debug for ScrollSyncController<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollSyncController")
            .field("options", &self.options)
            .field("current_page", &self.current_page)
            .field("content_offset", &self.content_offset)
            .field("is_realized", &self.is_realized)
            .field("is_tracking", &self.is_tracking)
            .field("updating_current_page", &self.updating_current_page)
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}
