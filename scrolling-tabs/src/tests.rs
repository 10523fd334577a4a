use crate::*;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        let span = (end_exclusive - start) as u64;
        start + (self.next_u64() % span) as usize
    }

    fn gen_unit_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

type Events = Arc<Mutex<Vec<PageEvent>>>;

const PAGE: f32 = 100.0;

fn controller(count: usize, options: TabControllerOptions) -> (ScrollSyncController<u32>, Events) {
    let mut c = ScrollSyncController::new(options);
    let events: Events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    c.set_on_event(Some(move |_: &PageHost<u32>, e: PageEvent| {
        sink.lock().unwrap().push(e)
    }));
    c.on_container_resized(Size::new(PAGE, 400.0));
    c.set_pages((0..count).map(|i| Page::new(i as u32)).collect());
    (c, events)
}

fn realized(count: usize) -> (ScrollSyncController<u32>, Events) {
    let (mut c, events) = controller(count, TabControllerOptions::new());
    c.view_did_appear();
    events.lock().unwrap().clear();
    (c, events)
}

fn loaded<C>(host: &PageHost<C>) -> Vec<usize> {
    host.loaded_pages().collect()
}

fn displayed(events: &Events, index: usize) -> usize {
    events
        .lock()
        .unwrap()
        .iter()
        .filter(|e| **e == PageEvent::PageDisplayed { index })
        .count()
}

fn appearance(index: usize, transition: Appearance, animated: bool) -> PageEvent {
    PageEvent::Appearance {
        index,
        transition,
        animated,
    }
}

fn drag_to(c: &mut ScrollSyncController<u32>, page: usize) {
    c.on_drag_begin();
    let from = c.content_offset();
    let to = page as f32 * PAGE;
    for step in 1..=4 {
        c.on_scroll(from + (to - from) * step as f32 / 4.0);
    }
    c.on_drag_end(false);
}

fn strip_with(count: usize, width: f32, sizing: TabSizing) -> TabStrip {
    let mut strip = TabStrip::default();
    strip.set_sizing(sizing);
    strip.set_size(Size::new(width, 44.0));
    strip.set_cells((0..count).map(|i| TabCell::new(default_title(i))).collect());
    strip
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn interval_window_edits_require_adjacency() {
    let mut w = IntervalWindow::empty_at(3);
    assert!(w.is_empty());
    assert!(!w.extend_left(1));
    assert!(w.extend_right(3));
    assert!(w.extend_right(4));
    assert!(w.extend_left(2));
    assert_eq!(w.iter(), 2..5);
    assert!(w.is_boundary(2));
    assert!(w.is_boundary(4));
    assert!(!w.is_boundary(3));
    assert!(w.is_adjacent(1));
    assert!(w.is_adjacent(5));
    assert!(!w.is_adjacent(6));

    assert!(!w.shrink_left(3));
    assert!(!w.shrink_right(3));
    assert!(w.shrink_right(4));
    assert!(w.shrink_left(2));
    assert_eq!(w.iter(), 3..4);
    assert!(w.shrink_left(3));
    assert!(w.is_empty());
    assert!(!w.shrink_left(4));

    let mut w = IntervalWindow::empty_at(0);
    assert!(!w.extend_left(0));
    assert!(w.extend_right(0));
    assert_eq!(w.len(), 1);
    w.reset(7);
    assert_eq!((w.start(), w.end()), (7, 7));
}

#[test]
fn pan_selects_one_of_the_two_blended_tabs() {
    let mut rng = Lcg::new(0x5eed_1234);
    for _ in 0..500 {
        let n = rng.gen_range_usize(1, 20);
        let p = rng.gen_unit_f32();
        let mut strip = strip_with(n, 320.0, TabSizing::FitViewFrameWidth);
        strip.pan_to_percentage(p);

        let lo = ((p * n as f32).floor() as usize).min(n - 1);
        let hi = (lo + 1).min(n - 1);
        let active = strip.active_index().unwrap();
        assert!(active == lo || active == hi, "p={p} n={n} active={active}");

        let selected: Vec<usize> = strip
            .cells()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.selected)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(selected, vec![active]);
    }
}

#[test]
fn pan_tie_goes_to_the_earlier_tab() {
    let mut strip = strip_with(4, 400.0, TabSizing::FitViewFrameWidth);
    strip.pan_to_percentage(0.125);
    assert_eq!(strip.active_index(), Some(0));
    assert!(approx(strip.indicator().frame.x, 50.0));

    strip.pan_to_percentage(0.13);
    assert_eq!(strip.active_index(), Some(1));
    assert_eq!(strip.label_color(1), strip.theme().selected_color);
    assert_eq!(strip.label_color(0), strip.theme().default_color);
}

#[test]
fn pan_clamps_out_of_range_percentages() {
    for n in 1..8 {
        let mut at_zero = strip_with(n, 300.0, TabSizing::FixedSize(120.0));
        at_zero.pan_to_percentage(0.0);
        let mut below = strip_with(n, 300.0, TabSizing::FixedSize(120.0));
        below.pan_to_percentage(-0.75);
        assert_eq!(below.indicator(), at_zero.indicator());
        assert_eq!(below.active_index(), at_zero.active_index());
        assert_eq!(below.content_offset(), at_zero.content_offset());

        let mut at_one = strip_with(n, 300.0, TabSizing::FixedSize(120.0));
        at_one.pan_to_percentage(1.0);
        let mut above = strip_with(n, 300.0, TabSizing::FixedSize(120.0));
        above.pan_to_percentage(3.5);
        assert_eq!(above.indicator(), at_one.indicator());
        assert_eq!(above.active_index(), Some(n - 1));
        assert_eq!(above.content_offset(), at_one.content_offset());
    }
}

#[test]
fn indicator_applies_style_and_follows_into_view() {
    let mut strip = strip_with(5, 250.0, TabSizing::FixedSize(100.0));
    strip.set_indicator_style(IndicatorStyle {
        height: 3.0,
        offset: 2.0,
        insets: EdgeInsets::new(10.0, 5.0),
    });
    strip.pan_to_percentage(0.0);
    assert_eq!(strip.indicator().frame, Rect::new(10.0, 39.0, 85.0, 3.0));
    assert_eq!(strip.content_offset(), 0.0);

    // Last cell spans [400, 500); the strip scrolls just enough to show it.
    strip.pan_to_percentage(1.0);
    assert_eq!(strip.active_index(), Some(4));
    assert!(approx(strip.content_offset(), 250.0));
    assert_eq!(strip.visible_range(), 2..5);

    strip.pan_to_percentage(0.0);
    assert_eq!(strip.content_offset(), 0.0);
    assert_eq!(strip.visible_range(), 0..3);
}

#[test]
fn center_select_keeps_active_tab_centered() {
    let mut strip = strip_with(5, 300.0, TabSizing::FixedSize(100.0));
    strip.set_center_select(true);
    assert_eq!(strip.content_inset(), (100.0, 100.0));

    strip.pan_to_percentage(0.0);
    assert!(approx(strip.content_offset(), -100.0));

    strip.pan_to_percentage(0.4);
    assert_eq!(strip.active_index(), Some(2));
    assert!(approx(strip.content_offset(), 100.0));

    strip.pan_to_percentage(1.0);
    assert!(approx(strip.content_offset(), 300.0));
}

#[test]
fn dividers_sit_at_cell_trailing_edges() {
    let mut strip = strip_with(3, 300.0, TabSizing::FitViewFrameWidth);
    assert_eq!(strip.divider_frames().count(), 0);

    strip.set_divider_style(DividerStyle {
        visible: true,
        ..DividerStyle::default()
    });
    let frames: Vec<Rect> = strip.divider_frames().collect();
    assert_eq!(
        frames,
        vec![
            Rect::new(100.0, 10.0, 1.0, 24.0),
            Rect::new(200.0, 10.0, 1.0, 24.0),
            Rect::new(300.0, 10.0, 1.0, 24.0),
        ]
    );
}

#[test]
fn flexible_width_switches_to_natural_widths_when_labels_overflow() {
    let measurer = MeasuringCell::with_text_measure(5.0, |t: &str, _: &LabelFont| {
        t.chars().count() as f32 * 10.0
    });
    let mut strip = TabStrip::new(measurer);
    strip.set_sizing(TabSizing::FlexibleWidth);
    strip.set_size(Size::new(400.0, 44.0));
    strip.set_cells((0..3).map(|i| TabCell::new(default_title(i))).collect());

    // "Tab 1" is 50 wide plus 2 * 5 padding; 180 total fits in 400.
    for cell in strip.cells() {
        assert!(approx(cell.frame.width, 400.0 / 3.0));
    }

    strip.set_size(Size::new(100.0, 44.0));
    for cell in strip.cells() {
        assert!(approx(cell.frame.width, 60.0));
    }
    assert!(approx(strip.content_width(), 180.0));

    strip.set_sizing(TabSizing::SizeToContent);
    strip.set_size(Size::new(1000.0, 44.0));
    assert!(approx(strip.cells()[2].frame.x, 120.0));
}

#[test]
fn estimate_text_width_uses_display_columns() {
    let font = LabelFont {
        family: String::from("mono"),
        size: 10.0,
    };
    assert!(approx(estimate_text_width("abc", &font), 18.0));
    assert!(approx(estimate_text_width("中", &font), 12.0));
    assert_eq!(estimate_text_width("", &font), 0.0);

    let mut cell = MeasuringCell::new(4.0);
    assert!(approx(cell.measure("abc", &font), 26.0));
    cell.set_text_measure(|_: &str, _: &LabelFont| f32::NAN);
    assert_eq!(cell.measure("abc", &font), 8.0);
}

#[test]
fn fixed_size_tabs_ignore_resize() {
    let options = TabControllerOptions::new().with_tab_sizing(TabSizing::FixedSize(200.0));
    let (mut c, _) = controller(3, options);
    for cell in c.strip().cells() {
        assert_eq!(cell.frame.width, 200.0);
    }
    c.on_container_resized(Size::new(640.0, 400.0));
    for cell in c.strip().cells() {
        assert_eq!(cell.frame.width, 200.0);
    }
    assert_eq!(c.strip().size().width, 640.0);

    let (mut fit, _) = controller(3, TabControllerOptions::new());
    assert!(approx(fit.strip().cells()[0].frame.width, PAGE / 3.0));
    fit.on_container_resized(Size::new(600.0, 400.0));
    assert!(approx(fit.strip().cells()[0].frame.width, 200.0));
}

#[test]
fn set_pages_loads_first_neighborhood() {
    let (c, events) = controller(5, TabControllerOptions::new());
    assert_eq!(c.current_page(), 0);
    assert_eq!(loaded(c.host()), vec![0, 1]);
    assert_eq!(c.host().window().iter(), 0..2);
    assert_eq!(
        *events.lock().unwrap(),
        vec![
            PageEvent::WillAttach { index: 0 },
            PageEvent::DidAttach { index: 0 },
            PageEvent::WillAttach { index: 1 },
            PageEvent::DidAttach { index: 1 },
        ]
    );
    let titles: Vec<&str> = c.strip().cells().iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Tab 1", "Tab 2", "Tab 3", "Tab 4", "Tab 5"]);
}

#[test]
fn set_pages_twice_rebuilds_to_the_same_state() {
    let (mut c, events) = realized(4);
    c.select_page(2, false);
    let ids_before: Vec<ContainerId> = c.host().containers().iter().map(|c| c.id()).collect();
    events.lock().unwrap().clear();

    let pages: Vec<Page<u32>> = (0..4).map(|i| Page::new(i as u32)).collect();
    c.set_pages(pages.clone());
    let first = (
        c.current_page(),
        c.host().window(),
        loaded(c.host()),
        c.strip().cells().to_vec(),
        c.strip().indicator(),
    );
    c.set_pages(pages);
    let second = (
        c.current_page(),
        c.host().window(),
        loaded(c.host()),
        c.strip().cells().to_vec(),
        c.strip().indicator(),
    );

    assert_eq!(first, second);
    assert_eq!(second.0, 0);
    assert_eq!(second.2, vec![0, 1]);
    assert_eq!(c.content_offset(), 0.0);

    let ids_after: Vec<ContainerId> = c.host().containers().iter().map(|c| c.id()).collect();
    assert!(ids_after.iter().all(|id| !ids_before.contains(id)));

    // The previous neighborhood of page 2 was detached by the first rebuild.
    let events = events.lock().unwrap();
    for index in 1..4 {
        assert!(events.contains(&PageEvent::DidDetach { index }));
    }
    assert_eq!(
        events
            .iter()
            .filter(|e| **e == PageEvent::PageDisplayed { index: 0 })
            .count(),
        2
    );
}

#[test]
fn select_then_drag_scenario() {
    let (mut c, events) = realized(5);
    assert_eq!(loaded(c.host()), vec![0, 1]);

    assert_eq!(c.select_page(3, true), SelectOutcome::Started);
    assert!(c.is_jumping());
    assert_eq!(
        c.take_scroll_request(),
        Some(ScrollRequest {
            offset: 300.0,
            animated: true
        })
    );
    assert_eq!(c.take_scroll_request(), None);
    assert_eq!(loaded(c.host()), vec![2, 3, 4]);

    for offset in [75.0, 150.0, 225.0, 300.0] {
        c.on_scroll(offset);
    }
    c.on_scroll_animation_end();
    assert!(!c.is_jumping());
    assert_eq!(c.current_page(), 3);
    assert_eq!(loaded(c.host()), vec![2, 3, 4]);
    assert_eq!(displayed(&events, 3), 1);
    assert_eq!(c.strip().active_index(), Some(3));

    events.lock().unwrap().clear();
    drag_to(&mut c, 1);
    assert_eq!(c.current_page(), 1);
    assert_eq!(loaded(c.host()), vec![0, 1, 2]);
    assert!(!c.host().is_loaded(3));
    assert!(
        events
            .lock()
            .unwrap()
            .contains(&PageEvent::DidDetach { index: 3 })
    );
    assert_eq!(displayed(&events, 1), 1);
    assert_eq!(displayed(&events, 2), 0);

    // A redundant settle does not re-announce the page.
    c.on_deceleration_end();
    assert_eq!(displayed(&events, 1), 1);
}

#[test]
fn non_animated_select_emits_full_sequence() {
    let (mut c, events) = realized(5);
    assert_eq!(c.select_page(2, false), SelectOutcome::Started);
    assert_eq!(c.content_offset(), 200.0);
    assert_eq!(
        c.take_scroll_request(),
        Some(ScrollRequest {
            offset: 200.0,
            animated: false
        })
    );
    assert_eq!(
        *events.lock().unwrap(),
        vec![
            appearance(0, Appearance::WillDisappear, false),
            PageEvent::WillDetach { index: 0 },
            PageEvent::DidDetach { index: 0 },
            PageEvent::WillAttach { index: 2 },
            PageEvent::DidAttach { index: 2 },
            PageEvent::WillAttach { index: 3 },
            PageEvent::DidAttach { index: 3 },
            appearance(2, Appearance::WillAppear, false),
            appearance(0, Appearance::DidDisappear, false),
            appearance(2, Appearance::DidAppear, false),
            PageEvent::PageDisplayed { index: 2 },
        ]
    );
}

#[test]
fn selecting_the_current_page_again_is_a_no_op() {
    let (mut c, events) = realized(5);
    c.select_page(2, false);
    c.take_scroll_request();
    let indicator = c.strip().indicator();
    let window = c.host().window();
    events.lock().unwrap().clear();

    assert_eq!(c.select_page(2, false), SelectOutcome::AlreadyCurrent);
    assert_eq!(c.select_page(2, true), SelectOutcome::AlreadyCurrent);
    assert!(events.lock().unwrap().is_empty());
    assert_eq!(c.strip().indicator(), indicator);
    assert_eq!(c.host().window(), window);
    assert_eq!(c.take_scroll_request(), None);
}

#[test]
fn out_of_range_select_is_ignored() {
    let (mut c, events) = realized(3);
    assert_eq!(c.select_page(3, true), SelectOutcome::Ignored);
    assert_eq!(c.select_page(usize::MAX, false), SelectOutcome::Ignored);
    assert_eq!(c.current_page(), 0);
    assert!(events.lock().unwrap().is_empty());
    assert_eq!(c.take_scroll_request(), None);
}

#[test]
fn selection_before_appearance_is_deferred_and_overwritten() {
    let (mut c, events) = controller(5, TabControllerOptions::new());
    events.lock().unwrap().clear();

    assert_eq!(c.select_page(3, true), SelectOutcome::Deferred);
    assert_eq!(c.tab_tapped(1), SelectOutcome::Deferred);
    assert_eq!(c.select_page(2, false), SelectOutcome::Deferred);
    assert_eq!(c.pending_selection(), Some(2));
    assert_eq!(c.current_page(), 0);
    assert!(events.lock().unwrap().is_empty());

    c.view_did_appear();
    assert_eq!(c.pending_selection(), None);
    assert_eq!(c.current_page(), 2);
    assert_eq!(loaded(c.host()), vec![1, 2, 3]);
    assert_eq!(displayed(&events, 2), 1);
    assert_eq!(displayed(&events, 0), 0);
    assert_eq!(displayed(&events, 3), 0);
}

#[test]
fn random_boundary_crossings_keep_window_on_neighborhood() {
    let mut rng = Lcg::new(42);
    for _ in 0..40 {
        let count = rng.gen_range_usize(1, 12);
        let preload = rng.gen_range_usize(0, 3);
        let options = TabControllerOptions::new().with_num_to_preload(preload);
        let (mut c, _) = controller(count, options);
        c.view_did_appear();

        for _ in 0..30 {
            let target = rng.gen_range_usize(0, count);
            if rng.gen_bool() {
                c.on_drag_begin();
                c.on_scroll(target as f32 * PAGE + rng.gen_unit_f32() * 0.9 * PAGE);
                c.on_drag_end(rng.gen_bool());
                c.on_deceleration_end();
            } else {
                c.select_page(target, rng.gen_bool());
                c.on_scroll_animation_end();
            }

            let current = c.current_page();
            let expected: Vec<usize> = (0..count)
                .filter(|i| i.abs_diff(current) <= preload)
                .collect();
            assert_eq!(loaded(c.host()), expected, "count={count} preload={preload}");
            assert_eq!(c.host().window().iter().collect::<Vec<_>>(), expected);
        }
    }
}

#[test]
fn drag_supersedes_in_flight_jump() {
    let (mut c, events) = realized(6);
    c.select_page(4, true);
    assert!(c.is_jumping());

    c.on_drag_begin();
    assert!(!c.is_jumping());
    assert_eq!(c.take_scroll_request(), None);
    {
        let events = events.lock().unwrap();
        assert!(events.contains(&appearance(0, Appearance::DidDisappear, true)));
        assert!(events.contains(&appearance(4, Appearance::DidAppear, true)));
    }

    c.on_scroll(250.0);
    assert_eq!(c.current_page(), 2);

    // The scroll animation reports completion late, while the user still drags.
    c.on_scroll_animation_end();
    assert_eq!(c.current_page(), 2);
    assert_eq!(displayed(&events, 4), 0);

    c.on_drag_end(false);
    assert_eq!(displayed(&events, 2), 1);
    assert_eq!(loaded(c.host()), vec![1, 2, 3]);

    c.on_scroll_animation_end();
    assert_eq!(displayed(&events, 2), 1);
    assert_eq!(loaded(c.host()), vec![1, 2, 3]);
}

#[test]
fn scroll_outside_drag_does_not_change_page() {
    let (mut c, _) = realized(4);
    c.on_scroll(250.0);
    assert_eq!(c.current_page(), 0);
    assert_eq!(c.strip().active_index(), Some(2));
    assert!(approx(c.scrolled_percentage(), 0.625));
}

#[test]
fn lenient_non_adjacent_load_resets_window() {
    let mut host = PageHost::new(1);
    let events: Events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    host.set_on_event(Some(move |_: &PageHost<u32>, e: PageEvent| {
        sink.lock().unwrap().push(e)
    }));
    host.rebuild((0..10u32).map(Some));
    host.sweep();
    assert_eq!(loaded(&host), vec![0, 1]);
    events.lock().unwrap().clear();

    host.set_anchor(5);
    assert_eq!(host.load(5), WindowChange::Reset { detached: 2 });
    assert_eq!(host.window().iter(), 5..6);
    assert_eq!(loaded(&host), vec![5]);
    assert_eq!(
        *events.lock().unwrap(),
        vec![
            PageEvent::WillDetach { index: 0 },
            PageEvent::DidDetach { index: 0 },
            PageEvent::WillDetach { index: 1 },
            PageEvent::DidDetach { index: 1 },
            PageEvent::WillAttach { index: 5 },
            PageEvent::DidAttach { index: 5 },
        ]
    );

    // Loading a page outside the neighborhood, or twice, does nothing.
    assert_eq!(host.load(8), WindowChange::Unchanged);
    assert_eq!(host.load(5), WindowChange::Unchanged);
    assert_eq!(host.load(4), WindowChange::Attached);
    assert_eq!(host.window().iter(), 4..6);
}

#[test]
fn lenient_interior_unload_resets_window() {
    let mut host = PageHost::new(1);
    host.rebuild((0..10u32).map(Some));
    host.set_anchor(5);
    host.sweep();
    assert_eq!(loaded(&host), vec![4, 5, 6]);

    host.set_anchor(9);
    assert_eq!(host.unload(5), WindowChange::Reset { detached: 3 });
    assert_eq!(host.window().iter(), 5..5);
    assert!(loaded(&host).is_empty());

    // Already unloaded pages are tolerated.
    assert_eq!(host.unload(4), WindowChange::Unchanged);

    host.sweep();
    assert_eq!(loaded(&host), vec![8, 9]);
}

#[test]
fn lazy_load_and_cleanup_converge() {
    let mut host = PageHost::new(1);
    host.rebuild((0..6u32).map(Some));
    host.sweep();
    assert_eq!(host.lazy_load(2), WindowChange::Unchanged);
    assert_eq!(host.lazy_load(42), WindowChange::Unchanged);

    host.set_anchor(1);
    assert_eq!(host.lazy_load(2), WindowChange::Attached);
    assert_eq!(loaded(&host), vec![0, 1, 2]);

    host.set_anchor(4);
    assert_eq!(host.cleanup(), 0);
    assert_eq!(loaded(&host), vec![3, 4, 5]);
    assert_eq!(host.neighborhood(), Some((3, 6)));
}

#[test]
fn zero_pages_and_zero_width_stay_finite() {
    let (mut c, events) = controller(0, TabControllerOptions::new());
    c.view_did_appear();
    assert_eq!(c.select_page(0, true), SelectOutcome::Ignored);
    c.on_drag_begin();
    c.on_scroll(50.0);
    c.on_drag_end(false);
    assert_eq!(c.scrolled_percentage(), 0.0);
    assert!(c.host().window().is_empty());
    assert_eq!(c.strip().active_index(), None);
    assert!(events.lock().unwrap().is_empty());

    let mut c: ScrollSyncController<u32> = ScrollSyncController::new(TabControllerOptions::new());
    c.set_pages((0..3).map(Page::new).collect());
    c.view_did_appear();
    c.on_drag_begin();
    c.on_scroll(10.0);
    c.on_scroll(f32::NAN);
    c.on_drag_end(false);
    assert_eq!(c.current_page(), 0);
    assert_eq!(c.scrolled_percentage(), 0.0);
    let frame = c.strip().indicator().frame;
    assert!(frame.x.is_finite() && frame.width.is_finite());
    assert_eq!(frame.width, 0.0);
    let snapshot = c.snapshot();
    assert!(snapshot.scroll_percentage.is_finite());
}

#[test]
fn only_the_latest_size_transition_resumes_updates() {
    let (mut c, _) = realized(3);
    let first = c.begin_size_transition(Size::new(200.0, 400.0));
    let second = c.begin_size_transition(Size::new(300.0, 400.0));
    assert_ne!(first, second);
    assert!(c.is_suspended());

    c.on_scroll(200.0);
    assert_eq!(c.strip().active_index(), Some(0));

    assert!(!c.end_size_transition(first));
    assert!(c.is_suspended());
    assert!(c.end_size_transition(second));
    assert!(!c.is_suspended());
    assert_eq!(c.strip().active_index(), Some(2));
    assert!(!c.end_size_transition(second));
}

#[test]
fn resize_keeps_containers_and_pins_offset() {
    let (mut c, _) = realized(3);
    c.select_page(2, false);
    c.take_scroll_request();
    let ids: Vec<ContainerId> = c.host().containers().iter().map(|c| c.id()).collect();

    c.on_container_resized(Size::new(300.0, 500.0));
    let after: Vec<ContainerId> = c.host().containers().iter().map(|c| c.id()).collect();
    assert_eq!(ids, after);
    assert_eq!(c.content_offset(), 600.0);
    assert_eq!(
        c.take_scroll_request(),
        Some(ScrollRequest {
            offset: 600.0,
            animated: false
        })
    );
    assert_eq!(
        c.host().container(2).map(PageContainer::frame),
        Some(Rect::new(600.0, 0.0, 300.0, 500.0))
    );
    assert_eq!(c.strip().active_index(), Some(2));
}

struct Source;

impl PageDataSource<u32> for Source {
    fn page_count(&self) -> Option<usize> {
        Some(4)
    }

    fn configure_cell(&self, index: usize, _cell: &TabCell) -> Option<TabCell> {
        (index == 2).then(|| TabCell::new("Custom"))
    }

    fn tab_width(&self, index: usize) -> Option<f32> {
        (index == 1).then_some(50.0)
    }
}

#[test]
fn data_source_capabilities_fall_back_independently() {
    let (mut c, _) = controller(0, TabControllerOptions::new());
    c.on_container_resized(Size::new(400.0, 400.0));
    c.set_pages(vec![Page::new(10).with_title("A"), Page::new(11)]);

    let source: Arc<dyn PageDataSource<u32>> = Arc::new(Source);
    c.set_data_source(Some(source));
    assert_eq!(c.page_count(), 4);
    assert_eq!(c.host().len(), 4);

    let titles: Vec<&str> = c.strip().cells().iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "Tab 2", "Custom", "Tab 4"]);
    let widths: Vec<f32> = c.strip().cells().iter().map(|c| c.frame.width).collect();
    assert_eq!(widths, vec![100.0, 50.0, 100.0, 100.0]);

    assert_eq!(c.host().content(0), Some(&10));
    assert_eq!(c.host().content(1), Some(&11));
    assert_eq!(c.host().content(3), None);

    c.set_data_source(None);
    assert_eq!(c.page_count(), 2);
    assert_eq!(c.strip().tab_count(), 2);
}

#[test]
fn options_apply_at_runtime() {
    let (mut c, _) = realized(6);
    c.set_num_to_preload(2);
    assert_eq!(loaded(c.host()), vec![0, 1, 2]);
    c.set_num_to_preload(0);
    assert_eq!(loaded(c.host()), vec![0]);

    c.set_tab_bar_height(60.0);
    assert_eq!(c.strip().size().height, 60.0);
    assert_eq!(c.strip().indicator().frame.y, 55.0);

    c.update_options(|o| {
        o.tab_sizing = TabSizing::FixedSize(30.0);
        o.divider.visible = true;
    });
    assert_eq!(c.strip().cells()[0].frame.width, 30.0);
    assert_eq!(c.strip().divider_frames().count(), 6);

    c.set_center_select_tabs(true);
    assert!(c.strip().center_select());
    assert_eq!(c.options().tab_sizing, TabSizing::FixedSize(30.0));
}

#[test]
fn snapshot_restores_navigation() {
    let (mut a, _) = realized(7);
    a.select_page(5, true);
    a.on_scroll(500.0);
    a.on_scroll_animation_end();
    let state = a.snapshot();
    assert_eq!(state.current_page, 5);
    assert_eq!(state.loaded.iter(), 4..7);

    let (mut b, events) = realized(7);
    assert_eq!(b.restore_state(&state), SelectOutcome::Started);
    assert_eq!(b.snapshot(), state);
    assert_eq!(displayed(&events, 5), 1);
}

struct Growing(Arc<AtomicUsize>);

impl PageDataSource<u32> for Growing {
    fn page_count(&self) -> Option<usize> {
        Some(self.0.load(Ordering::SeqCst))
    }
}

#[test]
fn pages_beyond_built_containers_are_ignored_until_reload() {
    let count = Arc::new(AtomicUsize::new(3));
    let (mut c, events) = controller(0, TabControllerOptions::new());
    let source: Arc<dyn PageDataSource<u32>> = Arc::new(Growing(Arc::clone(&count)));
    c.set_data_source(Some(source));
    c.view_did_appear();
    events.lock().unwrap().clear();

    count.store(6, Ordering::SeqCst);
    assert_eq!(c.page_count(), 6);
    assert_eq!(c.select_page(5, false), SelectOutcome::Ignored);
    assert_eq!(c.current_page(), 0);
    assert_eq!(loaded(c.host()), vec![0, 1]);
    assert!(events.lock().unwrap().is_empty());

    c.on_drag_begin();
    c.on_scroll(550.0);
    c.on_drag_end(false);
    assert_eq!(c.current_page(), 2);
    assert_eq!(loaded(c.host()), vec![1, 2]);
    assert_eq!(displayed(&events, 5), 0);

    c.reload();
    assert_eq!(c.host().len(), 6);
    assert_eq!(c.select_page(5, false), SelectOutcome::Started);
    assert_eq!(loaded(c.host()), vec![4, 5]);
    assert_eq!(displayed(&events, 5), 1);
}

#[test]
fn rebuild_completes_an_in_flight_jump() {
    let (mut c, events) = realized(5);
    c.select_page(3, true);
    assert!(c.is_jumping());
    events.lock().unwrap().clear();

    c.set_pages((0..5).map(Page::new).collect());
    assert!(!c.is_jumping());
    assert_eq!(c.current_page(), 0);
    {
        let events = events.lock().unwrap();
        let did_appear = events
            .iter()
            .position(|e| *e == appearance(3, Appearance::DidAppear, true));
        let did_disappear = events
            .iter()
            .position(|e| *e == appearance(0, Appearance::DidDisappear, true));
        let first_detach = events
            .iter()
            .position(|e| matches!(e, PageEvent::WillDetach { .. }));
        assert!(did_appear.is_some() && did_disappear.is_some());
        assert!(did_appear < first_detach);
        assert!(did_disappear < first_detach);
    }

    // The surface reports its animation end after the rebuild.
    c.on_scroll_animation_end();
    let events = events.lock().unwrap();
    let did_appears = events
        .iter()
        .filter(|e| matches!(e, PageEvent::Appearance { transition: Appearance::DidAppear, .. }))
        .count();
    assert_eq!(did_appears, 1);
    assert_eq!(
        events
            .iter()
            .filter(|e| **e == PageEvent::PageDisplayed { index: 0 })
            .count(),
        1
    );
}

#[test]
fn width_change_relayouts_only_width_tracking_policies() {
    let mut fixed = strip_with(4, 300.0, TabSizing::FixedSize(120.0));
    fixed.pan_to_percentage(1.0);
    let frames: Vec<Rect> = fixed.cells().iter().map(|c| c.frame).collect();
    fixed.set_size(Size::new(200.0, 44.0));
    assert_eq!(fixed.cells().iter().map(|c| c.frame).collect::<Vec<_>>(), frames);
    assert!(approx(fixed.content_offset(), 280.0));

    fixed.set_size(Size::new(200.0, 60.0));
    assert_eq!(fixed.cells()[0].frame.height, 60.0);
    assert_eq!(fixed.indicator().frame.y, 55.0);

    let mut fit = strip_with(4, 300.0, TabSizing::FitViewFrameWidth);
    fit.set_size(Size::new(200.0, 44.0));
    assert_eq!(fit.cells()[1].frame, Rect::new(50.0, 0.0, 50.0, 44.0));
}
