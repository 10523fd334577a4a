// Example: minimal usage, a programmatic jump and a user drag.
use scrolling_tabs::{Page, PageEvent, PageHost, ScrollSyncController, Size, TabControllerOptions};

fn main() {
    let mut c = ScrollSyncController::new(TabControllerOptions::new());
    c.set_on_event(Some(|host: &PageHost<&'static str>, e: PageEvent| {
        if let PageEvent::DidAttach { index } | PageEvent::DidDetach { index } = e {
            println!("{e:?} content={:?}", host.content(index));
        } else {
            println!("{e:?}");
        }
    }));

    c.on_container_resized(Size::new(320.0, 480.0));
    c.set_pages(
        ["Inbox", "Drafts", "Sent", "Archive", "Trash"]
            .into_iter()
            .map(|name| Page::new(name).with_title(name))
            .collect(),
    );
    c.view_did_appear();
    println!("loaded={:?}", c.host().loaded_pages().collect::<Vec<_>>());

    // A tap on "Archive": the host scrolls its page surface, then reports completion.
    c.tab_tapped(3);
    if let Some(req) = c.take_scroll_request() {
        println!("scroll to {} (animated={})", req.offset, req.animated);
        c.on_scroll(req.offset);
    }
    c.on_scroll_animation_end();
    println!(
        "current={} loaded={:?} indicator={:?}",
        c.current_page(),
        c.host().loaded_pages().collect::<Vec<_>>(),
        c.strip().indicator()
    );

    // The user drags back to "Drafts".
    c.on_drag_begin();
    for offset in [900.0, 700.0, 500.0, 320.0] {
        c.on_scroll(offset);
    }
    c.on_drag_end(false);
    println!(
        "current={} loaded={:?} active_tab={:?}",
        c.current_page(),
        c.host().loaded_pages().collect::<Vec<_>>(),
        c.strip().active_index()
    );
}
