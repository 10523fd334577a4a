// Example: adapter-driven page jump, interrupted by a drag that snaps on release.
use scrolling_tabs::{Page, Size, TabControllerOptions};
use scrolling_tabs_adapter::{Driver, Easing};

fn main() {
    let mut d: Driver<u32> =
        Driver::new(TabControllerOptions::new()).with_animation(300, Easing::EaseInOutCubic);
    d.on_container_resized(Size::new(400.0, 700.0));
    d.controller_mut()
        .set_pages((0..8).map(|i| Page::new(i).with_title(format!("Day {i}"))).collect());
    d.view_did_appear(0);

    d.tab_tapped(6, 0);

    let mut now_ms = 0u64;
    loop {
        // Simulate a 60fps "tick".
        now_ms += 16;
        let Some(off) = d.tick(now_ms) else { break };
        let strip = d.controller().strip();
        println!(
            "t={now_ms}ms off={off:.1} active_tab={:?} indicator_x={:.1}",
            strip.active_index(),
            strip.indicator().frame.x
        );

        // The user grabs the surface mid-flight and flicks back a little.
        if now_ms == 160 {
            d.drag_begin();
            d.drag_to(off - 260.0);
            let target = d.release(now_ms);
            println!("released, settling on offset {target}");
        }
    }

    let c = d.controller();
    println!(
        "done: current={} loaded={:?}",
        c.current_page(),
        c.host().loaded_pages().collect::<Vec<_>>()
    );
}
