use scrolling_tabs::{ScrollSyncController, SelectOutcome, Size, TabControllerOptions};

use crate::{Easing, Tween};

pub const DEFAULT_PAGE_ANIMATION_MS: u64 = 250;

/// Fraction of a page a drag must pass before release snaps to the next page.
pub const SNAP_THRESHOLD: f32 = 0.5;

/// What finishes when the running tween completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Motion {
    /// A programmatic page jump.
    Jump,
    /// Deceleration after a released drag.
    Settle,
}

/// A framework-neutral driver that wraps a [`ScrollSyncController`] and plays the part of the
/// paged scroll surface.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_container_resized` when the page surface changes size
/// - `select_page` / `tab_tapped` for programmatic navigation
/// - `drag_begin`, `drag_to`, `release` for user drags
/// - `tick(now_ms)` each frame/timer tick
///
/// and render from `offset()` and the wrapped controller's strip.
#[derive(Debug)]
pub struct Driver<C> {
    c: ScrollSyncController<C>,
    tween: Option<Tween>,
    motion: Option<Motion>,
    duration_ms: u64,
    easing: Easing,
}

impl<C: Clone> Driver<C> {
    pub fn new(options: TabControllerOptions) -> Self {
        Self::from_controller(ScrollSyncController::new(options))
    }

    pub fn from_controller(c: ScrollSyncController<C>) -> Self {
        Self {
            c,
            tween: None,
            motion: None,
            duration_ms: DEFAULT_PAGE_ANIMATION_MS,
            easing: Easing::default(),
        }
    }

    pub fn controller(&self) -> &ScrollSyncController<C> {
        &self.c
    }

    pub fn controller_mut(&mut self) -> &mut ScrollSyncController<C> {
        &mut self.c
    }

    pub fn into_controller(self) -> ScrollSyncController<C> {
        self.c
    }

    pub fn with_animation(mut self, duration_ms: u64, easing: Easing) -> Self {
        self.set_animation(duration_ms, easing);
        self
    }

    pub fn set_animation(&mut self, duration_ms: u64, easing: Easing) {
        self.duration_ms = duration_ms;
        self.easing = easing;
    }

    /// The page-surface offset to render.
    pub fn offset(&self) -> f32 {
        self.c.content_offset()
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Stops the running tween where it is, without completing its motion.
    pub fn cancel_animation(&mut self) {
        self.tween = None;
        self.motion = None;
    }

    pub fn on_container_resized(&mut self, size: Size) {
        self.cancel_animation();
        self.c.on_container_resized(size);
        self.c.take_scroll_request();
    }

    /// Selects a page and starts animating toward it.
    ///
    /// Non-animated selections complete before this returns.
    pub fn select_page(&mut self, index: usize, animated: bool, now_ms: u64) -> SelectOutcome {
        let outcome = self.c.select_page(index, animated);
        self.pump(now_ms);
        outcome
    }

    pub fn tab_tapped(&mut self, index: usize, now_ms: u64) -> SelectOutcome {
        self.select_page(index, true, now_ms)
    }

    /// Marks the view as appeared and runs any deferred selection.
    pub fn view_did_appear(&mut self, now_ms: u64) {
        self.c.view_did_appear();
        self.pump(now_ms);
    }

    /// Consumes the controller's pending scroll request, if any. A running tween is retargeted.
    fn pump(&mut self, now_ms: u64) {
        let Some(req) = self.c.take_scroll_request() else {
            return;
        };
        if !req.animated {
            self.cancel_animation();
            return;
        }
        match &mut self.tween {
            // A jump issued mid-flight continues from where the surface currently is.
            Some(tween) => tween.retarget(now_ms, req.offset, self.duration_ms),
            None => {
                let from = self.c.content_offset();
                self.tween = Some(Tween::new(
                    from,
                    req.offset,
                    now_ms,
                    self.duration_ms,
                    self.easing,
                ));
            }
        }
        self.motion = Some(Motion::Jump);
    }

    /// Advances the running tween.
    ///
    /// Returns the new offset while animating, `None` otherwise. The tick that reaches the end
    /// of the tween also completes the jump or the deceleration.
    pub fn tick(&mut self, now_ms: u64) -> Option<f32> {
        self.pump(now_ms);
        let tween = self.tween?;

        let off = tween.sample(now_ms);
        self.c.on_scroll(off);

        if tween.is_done(now_ms) {
            self.tween = None;
            match self.motion.take() {
                Some(Motion::Jump) => self.c.on_scroll_animation_end(),
                Some(Motion::Settle) => self.c.on_deceleration_end(),
                None => {}
            }
        }
        Some(off)
    }

    /// Starts a user drag. A running jump is handed over to the drag.
    pub fn drag_begin(&mut self) {
        self.cancel_animation();
        self.c.on_drag_begin();
    }

    /// Moves the page surface under the user's finger, clamped to the pages.
    pub fn drag_to(&mut self, offset: f32) {
        let offset = offset.clamp(0.0, self.max_offset());
        self.c.on_scroll(offset);
    }

    /// Ends the drag and decelerates onto the nearest page.
    ///
    /// Returns the offset of the page being settled on.
    pub fn release(&mut self, now_ms: u64) -> f32 {
        let target = self.snap_target();
        let from = self.c.content_offset();
        if from == target {
            self.c.on_drag_end(false);
            return target;
        }

        self.c.on_drag_end(true);
        self.tween = Some(Tween::new(
            from,
            target,
            now_ms,
            self.duration_ms,
            self.easing,
        ));
        self.motion = Some(Motion::Settle);
        target
    }

    fn max_offset(&self) -> f32 {
        let host = self.c.host();
        (host.content_width() - host.page_size().width).max(0.0)
    }

    fn snap_target(&self) -> f32 {
        let host = self.c.host();
        let width = host.page_size().width;
        if host.is_empty() || !(width > 0.0) {
            return 0.0;
        }
        let position = self.c.content_offset() / width;
        let base = position.floor();
        let page = if position - base >= SNAP_THRESHOLD {
            base + 1.0
        } else {
            base
        };
        let last = (host.len() - 1) as f32;
        page.clamp(0.0, last) * width
    }
}
